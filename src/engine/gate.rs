// src/engine/gate.rs

//! Pre-run gating: virtual-machine check and elevation.

use crate::engine::RunContext;
use crate::errors::Result;
use crate::fs::FileSystem;
use crate::platform::{self, Platform};

/// Whether a run may start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Go ahead with the run.
    Proceed,
    /// `--realonly` was given and this is a virtual machine.
    VirtualMachine,
    /// An elevated instance was launched; this process should exit.
    Relaunched,
}

/// Evaluate the gating conditions in order: virtual-machine check first,
/// then elevation.
///
/// On the virtual-machine path the log file (if one was requested) is
/// removed when present; failure to remove it is ignored.
///
/// Runs before logging is initialised, so it reports only through the
/// returned decision.
pub fn evaluate(
    ctx: &RunContext,
    platform: &dyn Platform,
    fs: &dyn FileSystem,
    vm_model: &str,
) -> Result<GateDecision> {
    if ctx.real_only && ctx.is_virtual_machine(platform, vm_model) {
        if let Some(log) = &ctx.log_file {
            if fs.exists(log) {
                let _ = fs.remove_file(log);
            }
        }
        return Ok(GateDecision::VirtualMachine);
    }

    if !ctx.usermode && platform::request_elevation(platform)? {
        return Ok(GateDecision::Relaunched);
    }

    Ok(GateDecision::Proceed)
}
