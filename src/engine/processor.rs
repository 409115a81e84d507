// src/engine/processor.rs

//! Task-directory processor.
//!
//! Lists the files of one task directory, orders them naturally, resolves a
//! handler for each by extension and either invokes it (execute mode) or
//! only logs what it would do (dry run). A failing or unhandled file never
//! stops the remaining files.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, info_span, trace, warn, Instrument};

use crate::config::HandlerSection;
use crate::exec::ActionBackend;
use crate::fs::{self, FileSystem};
use crate::handlers::{self, Action, HandlerKind, HandlerOutcome};
use crate::order::sort_natural_by;
use crate::types::{ErrorPolicy, RunMode};

/// A single file to act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub name: String,
    pub path: PathBuf,
    /// Lower-cased, without the dot; empty if the name has none.
    pub extension: String,
}

impl TaskItem {
    pub fn from_path(path: PathBuf) -> Self {
        let name = fs::entry_name(&path);
        let extension = handlers::task_extension(&name);
        Self {
            name,
            path,
            extension,
        }
    }
}

/// What happened to one task item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskStatus {
    /// No handler is registered for the extension.
    Skipped,
    /// Dry run: the action that would have run (`None` for a handler no-op).
    Planned(Option<Action>),
    /// Execute mode: the handler ran and reported this outcome.
    Completed(HandlerOutcome),
    /// Execute mode: the handler returned an error, which was contained here.
    Failed(String),
}

/// Per-item record produced while processing a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskRecord {
    pub item: TaskItem,
    pub handler: Option<HandlerKind>,
    pub status: TaskStatus,
}

/// Everything that happened in one task directory, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryReport {
    pub directory: PathBuf,
    pub records: Vec<TaskRecord>,
}

impl DirectoryReport {
    /// `(path, handler)` pairs for every item that resolved to a handler.
    pub fn resolved(&self) -> Vec<(PathBuf, HandlerKind)> {
        self.records
            .iter()
            .filter_map(|r| r.handler.map(|h| (r.item.path.clone(), h)))
            .collect()
    }
}

/// Processes task directories one at a time, strictly sequentially.
pub struct TaskDirProcessor<'a> {
    fs: &'a dyn FileSystem,
    backend: &'a mut dyn ActionBackend,
    settings: &'a HandlerSection,
    mode: RunMode,
    policy: ErrorPolicy,
}

impl<'a> TaskDirProcessor<'a> {
    pub fn new(
        fs: &'a dyn FileSystem,
        backend: &'a mut dyn ActionBackend,
        settings: &'a HandlerSection,
        mode: RunMode,
    ) -> Self {
        Self {
            fs,
            backend,
            settings,
            mode,
            policy: ErrorPolicy::default(),
        }
    }

    /// Override how handlers report failed actions. The default suppresses
    /// them; with [`ErrorPolicy::Propagate`] they are recorded as
    /// [`TaskStatus::Failed`] instead of [`TaskStatus::Completed`].
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Ordered task items of `dir`. Subdirectories are ignored.
    pub fn list_items(&self, dir: &Path) -> anyhow::Result<Vec<TaskItem>> {
        let mut items: Vec<TaskItem> = fs::files(self.fs, dir)?
            .into_iter()
            .map(TaskItem::from_path)
            .collect();
        sort_natural_by(&mut items, |item| item.name.as_str());
        Ok(items)
    }

    /// Process every task item in `dir`, in natural order.
    pub async fn process(&mut self, dir: &Path) -> DirectoryReport {
        info!(directory = ?dir, "processing task directory");

        let mut report = DirectoryReport {
            directory: dir.to_path_buf(),
            records: Vec::new(),
        };

        let items = match self.list_items(dir) {
            Ok(items) => items,
            Err(e) => {
                warn!(directory = ?dir, error = %e, "could not list task directory");
                return report;
            }
        };

        for item in items {
            let record = self.process_item(item).await;
            report.records.push(record);
        }

        report
    }

    async fn process_item(&mut self, item: TaskItem) -> TaskRecord {
        let Some(handler) = HandlerKind::from_extension(&item.extension) else {
            trace!(path = ?item.path, extension = %item.extension, "no handler, skipping");
            return TaskRecord {
                item,
                handler: None,
                status: TaskStatus::Skipped,
            };
        };

        debug!(
            path = ?item.path,
            extension = %item.extension,
            %handler,
            "resolved task handler"
        );

        let action = handler.resolve(&item.path, self.settings);

        let status = if self.mode.is_dry_run() {
            match &action {
                Some(action) => info!(path = ?item.path, %action, "dry run: would run"),
                None => info!(path = ?item.path, %handler, "dry run: handler ignores file"),
            }
            TaskStatus::Planned(action)
        } else {
            let span = info_span!("task", path = %item.path.display(), %handler);
            let result =
                handlers::invoke(&mut *self.backend, &item.path, action.as_ref(), self.policy)
                    .instrument(span)
                    .await;

            match result {
                Ok(HandlerOutcome::NoOp) => {
                    debug!(path = ?item.path, %handler, "handler ignored file");
                    TaskStatus::Completed(HandlerOutcome::NoOp)
                }
                Ok(outcome) => TaskStatus::Completed(outcome),
                Err(e) => {
                    error!(path = ?item.path, %handler, error = %e, "task failed, continuing");
                    TaskStatus::Failed(e.to_string())
                }
            }
        };

        TaskRecord {
            item,
            handler: Some(handler),
            status,
        }
    }
}
