// src/engine/dispatch.rs

//! Top-level dispatch: gate the run, assemble the pool, process every task
//! directory in order.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::ConfigFile;
use crate::engine::gate::{self, GateDecision};
use crate::engine::pool::{PoolAssembler, TaskPool};
use crate::engine::processor::{DirectoryReport, TaskDirProcessor};
use crate::engine::RunContext;
use crate::errors::Result;
use crate::exec::ActionBackend;
use crate::fs::FileSystem;
use crate::platform::Platform;

/// Everything processed in one run, in execution order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Effective machine model the pool was assembled for.
    pub model: Option<String>,
    pub directories: Vec<DirectoryReport>,
}

/// Wires the pool assembler and the directory processor together for one
/// run rooted at `root`.
pub struct Dispatcher<'a> {
    fs: &'a dyn FileSystem,
    platform: &'a dyn Platform,
    config: &'a ConfigFile,
    ctx: &'a RunContext,
    root: PathBuf,
}

impl<'a> Dispatcher<'a> {
    /// `root` is made absolute so every task path handed to a handler is
    /// absolute as well.
    pub fn new(
        fs: &'a dyn FileSystem,
        platform: &'a dyn Platform,
        config: &'a ConfigFile,
        ctx: &'a RunContext,
        root: &Path,
    ) -> Self {
        let root = std::path::absolute(root).unwrap_or_else(|_| root.to_path_buf());
        Self {
            fs,
            platform,
            config,
            ctx,
            root,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Pre-run gating. Must be consulted before [`Dispatcher::dispatch`].
    pub fn gate(&self) -> Result<GateDecision> {
        gate::evaluate(
            self.ctx,
            self.platform,
            self.fs,
            &self.config.detection.virtual_machine_model,
        )
    }

    /// Assemble the task pool for the effective machine model.
    pub fn pool(&self) -> TaskPool {
        let model = self.ctx.machine_model(self.platform);
        PoolAssembler::new(self.fs, &self.root, &self.config.layout).assemble(model)
    }

    /// Process every task directory of the pool, one after another.
    ///
    /// Never fails: discovery problems and task failures are logged and the
    /// run moves on.
    pub async fn dispatch(&self, backend: &mut dyn ActionBackend) -> RunReport {
        info!(root = ?self.root, mode = ?self.ctx.mode, "starting deployment");

        // Usually detected during gating, before any subscriber existed.
        let model = self.ctx.machine_model(self.platform);
        match model {
            Some(m) => info!(model = %m, "machine model"),
            None => warn!("could not determine machine model"),
        }

        let pool = self.pool();
        let mut processor =
            TaskDirProcessor::new(self.fs, backend, &self.config.handlers, self.ctx.mode);

        let mut report = RunReport {
            model: model.map(str::to_string),
            ..RunReport::default()
        };
        for dir in &pool {
            report.directories.push(processor.process(&dir.path).await);
        }

        debug!(directories = pool.len(), "deployment finished");
        report
    }
}
