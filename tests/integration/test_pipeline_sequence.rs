//! Integration Tests for the Build and Test Pipeline
//!
//! Runs the three-stage job against a stub build tool planted in the
//! workspace source space (the same path the real farm uses for a
//! catkin checkout), recording every invocation to verify sequencing,
//! short-circuiting, and cleanup.

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use wsbuild::config::Config;
use wsbuild::error::Error;
use wsbuild::models::BuildTool;
use wsbuild::pipeline::BuildAndTestJob;
use wsbuild::workspace::Workspace;

/// Plant an executable stub at `src/catkin/bin/catkin_make_isolated`
/// that appends its arguments to a log file and exits per the given
/// script body.
fn plant_stub_tool(root: &Path, body: &str) -> PathBuf {
    let log = root.join("invocations.log");
    let bin = root.join("src/catkin/bin");
    fs::create_dir_all(&bin).unwrap();
    let script = bin.join("catkin_make_isolated");
    fs::write(
        &script,
        format!("#!/bin/sh\necho \"$@\" >> \"{}\"\n{}\n", log.display(), body),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    log
}

fn job_for(root: &Path) -> BuildAndTestJob {
    BuildAndTestJob {
        rosdistro_name: "noetic".to_string(),
        build_tool: BuildTool::CatkinMakeIsolated,
        workspace: Workspace::new(root),
        build_tool_args: Vec::new(),
        parent_result_spaces: None,
        clean_before: false,
        clean_after: false,
        require_gpu_support: false,
        run_only_gpu_tests: false,
        config: Config::default(),
    }
}

fn logged_invocations(log: &Path) -> Vec<String> {
    if !log.exists() {
        return Vec::new();
    }
    fs::read_to_string(log)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[tokio::test]
async fn full_sequence_runs_three_stages() {
    let temp = TempDir::new().unwrap();
    let log = plant_stub_tool(temp.path(), "exit 0");

    let rc = job_for(temp.path()).run().await.unwrap();
    assert_eq!(rc, 0);

    let calls = logged_invocations(&log);
    assert_eq!(calls.len(), 3, "expected build, build-tests, run-tests");

    // build stage enables testing in cmake
    assert!(calls[0].contains("--cmake-args -DBUILD_TESTING=1"));
    assert!(calls[0].contains("-DCATKIN_TEST_RESULTS_DIR="));
    // second stage builds the tests target
    assert!(calls[1].contains("--catkin-make-args tests"));
    // third stage forces cmake and runs the tests target
    assert!(calls[2].contains("--force-cmake"));
    assert!(calls[2].contains("--catkin-make-args run_tests"));
}

#[tokio::test]
async fn sequence_stops_at_first_failure() {
    let temp = TempDir::new().unwrap();
    let log = plant_stub_tool(temp.path(), "exit 5");

    let rc = job_for(temp.path()).run().await.unwrap();
    assert_eq!(rc, 5);
    assert_eq!(logged_invocations(&log).len(), 1);
}

#[tokio::test]
async fn test_run_failure_propagates_after_full_sequence() {
    let temp = TempDir::new().unwrap();
    let log = plant_stub_tool(
        temp.path(),
        "case \"$@\" in *run_tests*) exit 7;; esac\nexit 0",
    );

    let rc = job_for(temp.path()).run().await.unwrap();
    assert_eq!(rc, 7);
    assert_eq!(logged_invocations(&log).len(), 3);
}

#[tokio::test]
async fn scan_markers_exist_while_the_tool_runs() {
    let temp = TempDir::new().unwrap();
    // the stub observes the marker the runner must have written before
    // spawning it
    let _log = plant_stub_tool(
        temp.path(),
        "test -f build_isolated/COLCON_IGNORE || exit 41\nexit 0",
    );

    let rc = job_for(temp.path()).run().await.unwrap();
    assert_eq!(rc, 0);
}

#[tokio::test]
async fn clean_after_runs_even_on_failure() {
    let temp = TempDir::new().unwrap();
    plant_stub_tool(temp.path(), "exit 5");

    let mut job = job_for(temp.path());
    job.clean_after = true;
    let rc = job.run().await.unwrap();
    assert_eq!(rc, 5);

    let ws = Workspace::new(temp.path());
    assert!(!ws.build_space().exists());
    assert!(!ws.devel_space().exists());
    assert!(!ws.install_space().exists());
    assert!(!ws.test_results().exists());
    // the source space survives cleanup
    assert!(ws.source_space().exists());
}

#[tokio::test]
async fn clean_before_removes_stale_results() {
    let temp = TempDir::new().unwrap();
    plant_stub_tool(temp.path(), "exit 0");

    let ws = Workspace::new(temp.path());
    fs::create_dir_all(ws.test_results()).unwrap();
    fs::write(ws.test_results().join("stale.xml"), "<old/>").unwrap();

    let mut job = job_for(temp.path());
    job.clean_before = true;
    let rc = job.run().await.unwrap();
    assert_eq!(rc, 0);

    assert!(!ws.test_results().join("stale.xml").exists());
}

#[tokio::test]
async fn missing_workspace_aborts_before_any_invocation() {
    let temp = TempDir::new().unwrap();
    let log = plant_stub_tool(temp.path(), "exit 0");

    let mut job = job_for(temp.path());
    job.workspace = Workspace::new(temp.path().join("elsewhere"));
    let err = job.run().await.unwrap_err();

    assert!(matches!(err, Error::WorkspaceNotFound { .. }));
    assert!(logged_invocations(&log).is_empty());
}

#[tokio::test]
async fn forwarded_build_tool_args_reach_the_build_stages() {
    let temp = TempDir::new().unwrap();
    let log = plant_stub_tool(temp.path(), "exit 0");

    let mut job = job_for(temp.path());
    job.build_tool_args = vec!["--merge".to_string()];
    let rc = job.run().await.unwrap();
    assert_eq!(rc, 0);

    let calls = logged_invocations(&log);
    assert!(calls[0].contains("--merge"));
    assert!(calls[1].contains("--merge"));
    assert!(calls[2].contains("--merge"));
}
