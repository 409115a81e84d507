// src/platform/mod.rs

//! Host collaborators the dispatcher consults before a run starts.
//!
//! The engine only depends on the [`Platform`] trait. [`SystemPlatform`]
//! queries the real machine; tests use a scripted implementation.

pub mod system;

use crate::errors::Result;

pub use system::SystemPlatform;

/// Facts about, and privileged operations on, the current host.
pub trait Platform: Send + Sync {
    /// Hardware model string of this machine, if it can be determined.
    fn query_machine_model(&self) -> Option<String>;

    /// Whether the current process already runs with elevated privileges.
    fn is_elevated(&self) -> bool;

    /// Start a new elevated instance of this program with the same arguments
    /// and working directory.
    fn relaunch_elevated(&self) -> Result<()>;
}

/// Ask for elevation.
///
/// Returns `true` when a new elevated process was launched and the caller
/// should exit, `false` when the current process is already elevated.
pub fn request_elevation(platform: &dyn Platform) -> Result<bool> {
    if platform.is_elevated() {
        return Ok(false);
    }
    platform.relaunch_elevated()?;
    Ok(true)
}
