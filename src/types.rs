/// Whether a run performs its actions or only reports them.
///
/// - `DryRun`: discover, order and resolve every task and log what would
///   happen, but never launch anything (default behaviour).
/// - `Execute`: launch each resolved action and wait for it to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    DryRun,
    Execute,
}

impl RunMode {
    pub fn from_execute_flag(execute: bool) -> Self {
        if execute {
            RunMode::Execute
        } else {
            RunMode::DryRun
        }
    }

    pub fn is_dry_run(self) -> bool {
        matches!(self, RunMode::DryRun)
    }
}

/// How a handler reports a failed action (launch error or non-zero exit).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Log the failure and report it as an outcome; never return an error.
    #[default]
    Suppress,
    /// Return the failure as a [`crate::errors::DeployError`].
    Propagate,
}
