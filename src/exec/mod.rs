// src/exec/mod.rs

//! Process execution layer.
//!
//! This module is responsible for actually running the actions described by
//! handlers, using `tokio::process::Command`.
//!
//! - [`process`] launches one action, logs its output and waits for it.
//! - [`backend`] provides the `ActionBackend` trait and the concrete
//!   `RealActionBackend` used in production, which tests can replace with a
//!   recording implementation.

pub mod backend;
pub mod process;

pub use backend::{ActionBackend, RealActionBackend};
