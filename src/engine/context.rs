// src/engine/context.rs

//! Per-run, read-only context.

use std::path::PathBuf;
use std::sync::OnceLock;

use crate::cli::CliArgs;
use crate::platform::Platform;
use crate::types::RunMode;

/// Settings for one invocation plus the facts memoized during it.
///
/// The flags are fixed at construction. The machine model and the
/// virtual-machine flag are computed on first use and reused for the rest of
/// the run.
#[derive(Debug, Default)]
pub struct RunContext {
    pub mode: RunMode,
    pub model_override: Option<String>,
    pub log_file: Option<PathBuf>,
    pub real_only: bool,
    pub usermode: bool,

    detected_model: OnceLock<Option<String>>,
    virtual_machine: OnceLock<bool>,
}

impl RunContext {
    pub fn new(mode: RunMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn from_args(args: &CliArgs) -> Self {
        Self {
            mode: RunMode::from_execute_flag(args.execute),
            model_override: args.model.clone(),
            log_file: args.log.clone(),
            real_only: args.realonly,
            usermode: args.usermode,
            ..Self::default()
        }
    }

    pub fn with_model_override(mut self, model: impl Into<String>) -> Self {
        self.model_override = Some(model.into());
        self
    }

    pub fn with_log_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.log_file = Some(path.into());
        self
    }

    pub fn with_real_only(mut self, real_only: bool) -> Self {
        self.real_only = real_only;
        self
    }

    pub fn with_usermode(mut self, usermode: bool) -> Self {
        self.usermode = usermode;
        self
    }

    /// Effective machine model: the override if set, otherwise the value
    /// reported by `platform` (queried at most once per context).
    pub fn machine_model(&self, platform: &dyn Platform) -> Option<&str> {
        if let Some(model) = self.model_override.as_deref() {
            return Some(model);
        }

        self.detected_model
            .get_or_init(|| platform.query_machine_model())
            .as_deref()
    }

    /// Whether the effective machine model is the hypervisor's model string.
    pub fn is_virtual_machine(&self, platform: &dyn Platform, vm_model: &str) -> bool {
        *self
            .virtual_machine
            .get_or_init(|| self.machine_model(platform) == Some(vm_model))
    }
}
