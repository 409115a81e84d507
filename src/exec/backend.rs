// src/exec/backend.rs

//! Pluggable action backend abstraction.
//!
//! Handlers talk to an `ActionBackend` instead of spawning processes
//! directly. This makes it easy to swap in a recording backend in tests
//! while keeping the production process runner in [`super::process`].
//!
//! - `RealActionBackend` is the default implementation used by `minideploy`.
//!   It launches the process and waits for it to exit.
//! - Tests can provide their own `ActionBackend` that, for example, records
//!   which actions were requested and returns scripted exit codes.

use std::future::Future;
use std::pin::Pin;

use crate::handlers::Action;

use super::process::run_process;

/// Trait abstracting how a handler's action is performed.
pub trait ActionBackend: Send {
    /// Launch `action` and wait for it to finish.
    ///
    /// Resolves to the exit code (`-1` when the process was terminated
    /// without one), or an IO error if the process could not be launched or
    /// waited on.
    fn run_action<'a>(
        &'a mut self,
        action: &'a Action,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<i32>> + Send + 'a>>;
}

/// Real backend used in production: spawns OS processes.
#[derive(Debug, Default)]
pub struct RealActionBackend;

impl RealActionBackend {
    pub fn new() -> Self {
        Self
    }
}

impl ActionBackend for RealActionBackend {
    fn run_action<'a>(
        &'a mut self,
        action: &'a Action,
    ) -> Pin<Box<dyn Future<Output = std::io::Result<i32>> + Send + 'a>> {
        Box::pin(run_process(action))
    }
}
