// src/config/mod.rs

//! Configuration loading and validation for minideploy.
//!
//! Responsibilities:
//! - Define the TOML-backed data model (`model.rs`).
//! - Load a config file from disk, or fall back to defaults (`loader.rs`).
//! - Validate layout and handler settings (`validate.rs`).

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{load_and_validate, load_from_path, resolve_config};
pub use model::{ConfigFile, DetectionSection, HandlerSection, LayoutSection, RawConfigFile};
