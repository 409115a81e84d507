// src/handlers/invoke.rs

//! Run a resolved handler and apply the failure policy.

use std::path::Path;

use tracing::{info, warn};

use crate::errors::{DeployError, Result};
use crate::exec::ActionBackend;
use crate::handlers::Action;
use crate::types::ErrorPolicy;

/// What happened when a handler was invoked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The action ran and exited with code 0.
    Succeeded,
    /// The action could not be launched (`-1`) or exited non-zero.
    Failed(i32),
    /// The handler filtered the file out; nothing was launched.
    NoOp,
}

/// Run `action` (if any) for the task file at `path` and wait for it.
///
/// With [`ErrorPolicy::Suppress`] a launch error or non-zero exit is logged
/// and reported as [`HandlerOutcome::Failed`]. With
/// [`ErrorPolicy::Propagate`] the same conditions come back as errors.
pub async fn invoke(
    backend: &mut dyn ActionBackend,
    path: &Path,
    action: Option<&Action>,
    policy: ErrorPolicy,
) -> Result<HandlerOutcome> {
    let Some(action) = action else {
        return Ok(HandlerOutcome::NoOp);
    };

    info!(%action, "running action");

    match backend.run_action(action).await {
        Ok(0) => Ok(HandlerOutcome::Succeeded),
        Ok(code) => match policy {
            ErrorPolicy::Suppress => {
                warn!(path = ?path, exit_code = code, "action exited with non-zero code");
                Ok(HandlerOutcome::Failed(code))
            }
            ErrorPolicy::Propagate => Err(DeployError::ActionFailed {
                path: path.to_path_buf(),
                code,
            }),
        },
        Err(source) => match policy {
            ErrorPolicy::Suppress => {
                warn!(path = ?path, error = %source, "failed to launch action");
                Ok(HandlerOutcome::Failed(-1))
            }
            ErrorPolicy::Propagate => Err(DeployError::Launch {
                path: path.to_path_buf(),
                source,
            }),
        },
    }
}
