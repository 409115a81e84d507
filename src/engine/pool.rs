// src/engine/pool.rs

//! Task pool assembly.
//!
//! The pool is every immediate subdirectory of the global pool root plus
//! every immediate subdirectory of the current model's directory under the
//! models root, merged into a single natural ordering by directory name.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::config::LayoutSection;
use crate::fs::{self, FileSystem};
use crate::order::sort_natural_by;

/// A directory whose files are task items.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDirectory {
    pub name: String,
    pub path: PathBuf,
}

impl TaskDirectory {
    pub fn from_path(path: PathBuf) -> Self {
        Self {
            name: fs::entry_name(&path),
            path,
        }
    }
}

/// Ordered task directories for one run. Immutable once assembled.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPool {
    dirs: Vec<TaskDirectory>,
}

impl TaskPool {
    /// Build a pool from unordered directories, applying the natural order.
    ///
    /// The sort is stable: entries with the same name keep their input order.
    pub fn from_unsorted(mut dirs: Vec<TaskDirectory>) -> Self {
        sort_natural_by(&mut dirs, |d| d.name.as_str());
        Self { dirs }
    }

    pub fn iter(&self) -> impl Iterator<Item = &TaskDirectory> {
        self.dirs.iter()
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.dirs.iter().map(|d| d.name.as_str()).collect()
    }
}

impl<'a> IntoIterator for &'a TaskPool {
    type Item = &'a TaskDirectory;
    type IntoIter = std::slice::Iter<'a, TaskDirectory>;

    fn into_iter(self) -> Self::IntoIter {
        self.dirs.iter()
    }
}

/// Builds the [`TaskPool`] from the on-disk layout under `root`.
#[derive(Debug)]
pub struct PoolAssembler<'a> {
    fs: &'a dyn FileSystem,
    root: &'a Path,
    layout: &'a LayoutSection,
}

impl<'a> PoolAssembler<'a> {
    pub fn new(fs: &'a dyn FileSystem, root: &'a Path, layout: &'a LayoutSection) -> Self {
        Self { fs, root, layout }
    }

    /// Assemble the pool for `model`.
    ///
    /// Missing or unreadable roots are logged as warnings and contribute
    /// nothing; this never fails.
    pub fn assemble(&self, model: Option<&str>) -> TaskPool {
        let mut dirs = self.global_dirs();

        if let Some(model_root) = self.model_root(model) {
            match fs::subdirectories(self.fs, &model_root) {
                Ok(found) => dirs.extend(found.into_iter().map(TaskDirectory::from_path)),
                Err(e) => warn!(
                    path = ?model_root,
                    error = %e,
                    "could not read model deployments"
                ),
            }
        }

        let pool = TaskPool::from_unsorted(dirs);
        debug!(directories = ?pool.names(), "assembled task pool");
        pool
    }

    fn global_dirs(&self) -> Vec<TaskDirectory> {
        let global_root = self.root.join(&self.layout.global_pool);
        match fs::subdirectories(self.fs, &global_root) {
            Ok(found) => found.into_iter().map(TaskDirectory::from_path).collect(),
            Err(e) => {
                warn!(path = ?global_root, error = %e, "could not find global deployments");
                Vec::new()
            }
        }
    }

    /// Directory holding the task directories for `model`, if the models
    /// root has a subdirectory whose name matches it exactly.
    pub fn model_root(&self, model: Option<&str>) -> Option<PathBuf> {
        let models_root = self.root.join(&self.layout.models_root);

        let models = match fs::subdirectories(self.fs, &models_root) {
            Ok(found) => found,
            Err(e) => {
                warn!(path = ?models_root, error = %e, "could not find model deployments");
                return None;
            }
        };

        let matched = model.and_then(|model| {
            models
                .into_iter()
                .find(|path| fs::entry_name(path) == model)
        });

        if matched.is_none() {
            warn!(
                model = model.unwrap_or("<unknown>"),
                "no deployment information found for device"
            );
        }
        matched
    }
}
