// src/handlers/action.rs

//! Description of the single OS-level action a handler performs.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

/// A process launch: program, arguments and optional working directory.
///
/// Handlers only *describe* what they would run; the
/// [`crate::exec::ActionBackend`] performs it. Dry runs log the description
/// and stop there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub program: PathBuf,
    pub args: Vec<OsString>,
    pub working_dir: Option<PathBuf>,
}

impl Action {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Run inside the directory containing `task_path`, so resources shipped
    /// next to the task file resolve.
    pub fn in_dir_of(mut self, task_path: &Path) -> Self {
        self.working_dir = task_path.parent().map(Path::to_path_buf);
        self
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.display())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        if let Some(dir) = &self.working_dir {
            write!(f, " (in {})", dir.display())?;
        }
        Ok(())
    }
}
