// tests/real_fs_dry_run.rs
mod common;
use crate::common::{init_tracing, names};

use std::fs;

use minideploy::config::ConfigFile;
use minideploy::engine::{Dispatcher, RunContext, TaskStatus};
use minideploy::fs::RealFileSystem;
use minideploy::handlers::HandlerKind;
use minideploy::types::RunMode;
use minideploy_test_utils::fake_backend::RecordingBackend;
use minideploy_test_utils::fake_platform::FakePlatform;
use tempfile::tempdir;

#[tokio::test]
async fn dry_run_over_a_real_tree() {
    init_tracing();

    let tmp = tempdir().unwrap();
    let root = tmp.path();
    for (dir, file) in [
        ("All/10-late", "finish.ps1"),
        ("All/2-early", "Wi-Fi-Lab.xml"),
        ("All/2-early", "Notes.xml"),
        ("All/2-early", "10-b.reg"),
        ("All/2-early", "9-a.reg"),
        ("Models/Lab PC/3-mid", "driver.msi"),
    ] {
        fs::create_dir_all(root.join(dir)).unwrap();
        fs::write(root.join(dir).join(file), b"").unwrap();
    }
    fs::create_dir_all(root.join("All/2-early/nested")).unwrap();

    let cfg = ConfigFile::default();
    let platform = FakePlatform::with_model("Lab PC");
    let ctx = RunContext::new(RunMode::DryRun);
    let real = RealFileSystem;
    let dispatcher = Dispatcher::new(&real, &platform, &cfg, &ctx, root);

    let mut backend = RecordingBackend::new();
    let report = dispatcher.dispatch(&mut backend).await;

    assert_eq!(backend.executed_count(), 0);

    let dirs: Vec<_> = report
        .directories
        .iter()
        .map(|d| d.directory.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(dirs, vec!["2-early", "3-mid", "10-late"]);

    let early = &report.directories[0];
    assert_eq!(
        names(early),
        vec!["9-a.reg", "10-b.reg", "Notes.xml", "Wi-Fi-Lab.xml"]
    );
    assert_eq!(early.records[2].status, TaskStatus::Planned(None));
    assert!(matches!(early.records[3].status, TaskStatus::Planned(Some(_))));
    assert_eq!(early.records[3].handler, Some(HandlerKind::Xml));
    assert!(early.records.iter().all(|r| r.item.path.is_absolute()));
}
