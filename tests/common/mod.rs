#![allow(dead_code)]

use std::path::{Path, PathBuf};

use minideploy::engine::DirectoryReport;
use minideploy::handlers::Action;

pub use minideploy_test_utils::{init_tracing, with_timeout};

/// File names of the records in `report`, in processing order.
pub fn names(report: &DirectoryReport) -> Vec<String> {
    report.records.iter().map(|r| r.item.name.clone()).collect()
}

/// Task file targeted by each recorded action (the program or argument that
/// lives under `root`), in launch order.
pub fn launched_paths(root: &Path, actions: &[Action]) -> Vec<PathBuf> {
    actions
        .iter()
        .filter_map(|a| {
            std::iter::once(a.program.as_os_str())
                .chain(a.args.iter().map(|s| s.as_os_str()))
                .map(|s| {
                    let s = s.to_string_lossy();
                    PathBuf::from(s.trim_start_matches("filename=\"").trim_end_matches('"'))
                })
                .find(|p| p.starts_with(root))
        })
        .collect()
}
