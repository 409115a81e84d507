use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use minideploy::exec::ActionBackend;
use minideploy::handlers::Action;

/// Scripted result for actions whose last argument (or program) matches.
#[derive(Debug, Clone, Copy)]
pub enum Scripted {
    Exit(i32),
    LaunchError,
}

/// A fake backend that:
/// - records every action it was asked to run, in order
/// - returns exit code 0 unless a result was scripted for the task file.
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    executed: Arc<Mutex<Vec<Action>>>,
    scripted: HashMap<PathBuf, Scripted>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the result for the action that targets `task_path`.
    pub fn with_result(mut self, task_path: impl Into<PathBuf>, result: Scripted) -> Self {
        self.scripted.insert(task_path.into(), result);
        self
    }

    /// Shared handle to the recorded actions.
    pub fn executed(&self) -> Arc<Mutex<Vec<Action>>> {
        Arc::clone(&self.executed)
    }

    pub fn executed_count(&self) -> usize {
        self.executed.lock().unwrap().len()
    }

    fn scripted_for(&self, action: &Action) -> Option<Scripted> {
        self.scripted
            .iter()
            .find(|(path, _)| {
                action.program == **path
                    || action.args.iter().any(|a| a.as_os_str() == path.as_os_str())
            })
            .map(|(_, s)| *s)
    }
}

impl ActionBackend for RecordingBackend {
    fn run_action<'a>(
        &'a mut self,
        action: &'a Action,
    ) -> Pin<Box<dyn Future<Output = io::Result<i32>> + Send + 'a>> {
        Box::pin(async move {
            self.executed.lock().unwrap().push(action.clone());
            match self.scripted_for(action) {
                Some(Scripted::Exit(code)) => Ok(code),
                Some(Scripted::LaunchError) => Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    "scripted launch failure",
                )),
                None => Ok(0),
            }
        })
    }
}
