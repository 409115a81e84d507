// tests/task_directory.rs
mod common;
use crate::common::{init_tracing, launched_paths, names};

use std::path::Path;

use minideploy::config::HandlerSection;
use minideploy::engine::{TaskDirProcessor, TaskStatus};
use minideploy::handlers::{HandlerKind, HandlerOutcome};
use minideploy::types::{ErrorPolicy, RunMode};
use minideploy_test_utils::builders::LayoutBuilder;
use minideploy_test_utils::fake_backend::{RecordingBackend, Scripted};

const DIR: &str = "1-base";

fn one_of_each() -> LayoutBuilder {
    LayoutBuilder::new("/deploy")
        .global_task(DIR, "app.msi")
        .global_task(DIR, "tweaks.reg")
        .global_task(DIR, "Browser.lnk")
        .global_task(DIR, "Wi-Fi-Office.xml")
        .global_task(DIR, "cleanup.bat")
        .global_task(DIR, "tool.exe")
        .global_task(DIR, "setup.ps1")
}

#[tokio::test]
async fn dry_run_resolves_everything_and_launches_nothing() {
    init_tracing();

    let layout = one_of_each();
    let dir = layout.root().join("All").join(DIR);
    let (fs, _) = layout.build();

    let settings = HandlerSection::default();
    let mut backend = RecordingBackend::new();
    let executed = backend.executed();

    let report = TaskDirProcessor::new(&fs, &mut backend, &settings, RunMode::DryRun)
        .process(&dir)
        .await;

    assert!(executed.lock().unwrap().is_empty());
    assert_eq!(report.resolved().len(), 7);
    for record in &report.records {
        match &record.status {
            TaskStatus::Planned(Some(_)) => {}
            other => panic!("{} not planned with an action: {other:?}", record.item.name),
        }
    }
}

#[tokio::test]
async fn execute_runs_files_in_natural_order() {
    init_tracing();

    let layout = LayoutBuilder::new("/deploy")
        .global_task(DIR, "10-last.bat")
        .global_task(DIR, "2-second.reg")
        .global_task(DIR, "1-first.msi");
    let expected = vec![
        layout.global_path(DIR, "1-first.msi"),
        layout.global_path(DIR, "2-second.reg"),
        layout.global_path(DIR, "10-last.bat"),
    ];
    let (fs, root) = layout.build();

    let settings = HandlerSection::default();
    let mut backend = RecordingBackend::new();
    let executed = backend.executed();

    let report = TaskDirProcessor::new(&fs, &mut backend, &settings, RunMode::Execute)
        .process(&root.join("All").join(DIR))
        .await;

    assert_eq!(names(&report), vec!["1-first.msi", "2-second.reg", "10-last.bat"]);
    assert_eq!(launched_paths(&root, &executed.lock().unwrap()), expected);
    assert!(report
        .records
        .iter()
        .all(|r| r.status == TaskStatus::Completed(HandlerOutcome::Succeeded)));
}

#[tokio::test]
async fn unknown_extension_is_skipped_and_later_files_still_run() {
    init_tracing();

    let layout = LayoutBuilder::new("/deploy")
        .global_task(DIR, "1-notes.txt")
        .global_task(DIR, "2-install.msi")
        .global_task(DIR, "3-README");
    let (fs, root) = layout.build();

    let settings = HandlerSection::default();
    let mut backend = RecordingBackend::new();
    let executed = backend.executed();

    let report = TaskDirProcessor::new(&fs, &mut backend, &settings, RunMode::Execute)
        .process(&root.join("All").join(DIR))
        .await;

    assert_eq!(report.records.len(), 3);
    assert_eq!(report.records[0].handler, None);
    assert_eq!(report.records[0].status, TaskStatus::Skipped);
    assert_eq!(report.records[1].handler, Some(HandlerKind::Msi));
    assert_eq!(report.records[2].status, TaskStatus::Skipped);
    assert_eq!(executed.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn failing_tasks_do_not_stop_the_directory() {
    init_tracing();

    let layout = LayoutBuilder::new("/deploy")
        .global_task(DIR, "1-broken.exe")
        .global_task(DIR, "2-missing.bat")
        .global_task(DIR, "3-fine.reg");
    let broken = layout.global_path(DIR, "1-broken.exe");
    let missing = layout.global_path(DIR, "2-missing.bat");
    let (fs, root) = layout.build();

    let settings = HandlerSection::default();
    let mut backend = RecordingBackend::new()
        .with_result(&broken, Scripted::Exit(1603))
        .with_result(&missing, Scripted::LaunchError);
    let executed = backend.executed();

    let report = TaskDirProcessor::new(&fs, &mut backend, &settings, RunMode::Execute)
        .process(&root.join("All").join(DIR))
        .await;

    let statuses: Vec<_> = report.records.iter().map(|r| r.status.clone()).collect();
    assert_eq!(
        statuses,
        vec![
            TaskStatus::Completed(HandlerOutcome::Failed(1603)),
            TaskStatus::Completed(HandlerOutcome::Failed(-1)),
            TaskStatus::Completed(HandlerOutcome::Succeeded),
        ]
    );
    assert_eq!(executed.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn propagated_failures_are_contained_per_task() {
    init_tracing();

    let layout = LayoutBuilder::new("/deploy")
        .global_task(DIR, "1-broken.exe")
        .global_task(DIR, "2-fine.exe");
    let broken = layout.global_path(DIR, "1-broken.exe");
    let (fs, root) = layout.build();

    let settings = HandlerSection::default();
    let mut backend = RecordingBackend::new().with_result(&broken, Scripted::Exit(2));

    let report = TaskDirProcessor::new(&fs, &mut backend, &settings, RunMode::Execute)
        .with_error_policy(ErrorPolicy::Propagate)
        .process(&root.join("All").join(DIR))
        .await;

    match &report.records[0].status {
        TaskStatus::Failed(msg) => assert!(msg.contains("exited with code 2")),
        other => panic!("expected Failed, got {other:?}"),
    }
    assert_eq!(
        report.records[1].status,
        TaskStatus::Completed(HandlerOutcome::Succeeded)
    );
}

#[tokio::test]
async fn xml_profiles_are_filtered_by_name() {
    init_tracing();

    let layout = LayoutBuilder::new("/deploy")
        .global_task(DIR, "Notes.xml")
        .global_task(DIR, "Wi-Fi-Home.xml");
    let wifi = layout.global_path(DIR, "Wi-Fi-Home.xml");
    let (fs, root) = layout.build();

    let settings = HandlerSection::default();
    let mut backend = RecordingBackend::new();
    let executed = backend.executed();

    let report = TaskDirProcessor::new(&fs, &mut backend, &settings, RunMode::Execute)
        .process(&root.join("All").join(DIR))
        .await;

    assert_eq!(names(&report), vec!["Notes.xml", "Wi-Fi-Home.xml"]);
    assert_eq!(
        report.records[0].status,
        TaskStatus::Completed(HandlerOutcome::NoOp)
    );
    assert_eq!(
        report.records[1].status,
        TaskStatus::Completed(HandlerOutcome::Succeeded)
    );

    let executed = executed.lock().unwrap();
    assert_eq!(executed.len(), 1);
    assert_eq!(executed[0].program, Path::new("netsh"));
    assert_eq!(launched_paths(&root, &executed), vec![wifi]);
}

#[tokio::test]
async fn subdirectories_are_not_task_items() {
    init_tracing();

    let layout = LayoutBuilder::new("/deploy")
        .global_task(DIR, "1-run.bat")
        .global_task(DIR, "payload/setup.msi");
    let (fs, root) = layout.build();

    let settings = HandlerSection::default();
    let mut backend = RecordingBackend::new();

    let report = TaskDirProcessor::new(&fs, &mut backend, &settings, RunMode::Execute)
        .process(&root.join("All").join(DIR))
        .await;

    assert_eq!(names(&report), vec!["1-run.bat"]);
    assert_eq!(backend.executed_count(), 1);
}

#[tokio::test]
async fn missing_directory_yields_empty_report() {
    init_tracing();

    let (fs, root) = LayoutBuilder::new("/deploy").build();
    let settings = HandlerSection::default();
    let mut backend = RecordingBackend::new();

    let report = TaskDirProcessor::new(&fs, &mut backend, &settings, RunMode::Execute)
        .process(&root.join("All").join("gone"))
        .await;

    assert!(report.records.is_empty());
    assert_eq!(backend.executed_count(), 0);
}

#[tokio::test]
async fn extension_match_is_case_insensitive() {
    init_tracing();

    let layout = LayoutBuilder::new("/deploy").global_task(DIR, "Driver.MSI");
    let (fs, root) = layout.build();
    let settings = HandlerSection::default();
    let mut backend = RecordingBackend::new();

    let report = TaskDirProcessor::new(&fs, &mut backend, &settings, RunMode::DryRun)
        .process(&root.join("All").join(DIR))
        .await;

    assert_eq!(report.records[0].item.extension, "msi");
    assert_eq!(report.records[0].handler, Some(HandlerKind::Msi));
}
