//! Unit Tests for Command Composition
//!
//! Verifies the shell command lines composed for both build tools
//! across the flag combinations the pipeline uses, including the
//! environment-sourcing chain for parent result spaces.

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use wsbuild::compose::compose;
use wsbuild::models::{BuildTool, ColconVerb, InvocationOptions};
use wsbuild::workspace::Workspace;

fn workspace() -> (TempDir, Workspace) {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("src")).unwrap();
    let ws = Workspace::new(temp.path());
    (temp, ws)
}

#[test]
fn composed_command_carries_python_env_prefixes() {
    let (_temp, ws) = workspace();
    for tool in [BuildTool::CatkinMakeIsolated, BuildTool::Colcon] {
        let cmd = compose(tool, "noetic", &ws, &InvocationOptions::new(), Path::new("/opt/ros"));
        assert!(
            cmd.command
                .starts_with("PYTHONIOENCODING=utf_8 PYTHONUNBUFFERED=1 "),
            "missing env prefixes for {}: {}",
            tool,
            cmd.command
        );
    }
}

#[test]
fn colcon_build_matches_catkin_directory_naming() {
    let (_temp, ws) = workspace();
    let cmd = compose(
        BuildTool::Colcon,
        "noetic",
        &ws,
        &InvocationOptions::new(),
        Path::new("/opt/ros"),
    );
    assert!(cmd.command.contains(
        "colcon build --build-base build_isolated --install-base install_isolated \
         --test-result-base test_results"
    ));
    assert!(cmd.command.contains("--event-handlers console_cohesion+"));
}

#[test]
fn colcon_test_runs_sequentially_with_direct_console() {
    let (_temp, ws) = workspace();
    let opts = InvocationOptions::new().colcon_verb(ColconVerb::Test);
    let cmd = compose(BuildTool::Colcon, "noetic", &ws, &opts, Path::new("/opt/ros"));
    assert!(cmd.command.contains("colcon test "));
    assert!(cmd
        .command
        .contains("--event-handlers console_direct+ --executor sequential"));
}

#[test]
fn full_build_stage_command_for_cmi() {
    let (_temp, ws) = workspace();
    let opts = InvocationOptions::new()
        .cmake_clean_cache(true)
        .cmake_args(vec![
            "-DBUILD_TESTING=1".to_string(),
            "-DCATKIN_ENABLE_TESTING=1".to_string(),
        ]);
    let cmd = compose(
        BuildTool::CatkinMakeIsolated,
        "noetic",
        &ws,
        &opts,
        Path::new("/opt/ros"),
    );

    assert!(cmd.clear_cmake_caches);
    assert!(cmd
        .command
        .contains("catkin_make_isolated --cmake-args -DBUILD_TESTING=1 -DCATKIN_ENABLE_TESTING=1"));
}

#[test]
fn make_args_flag_differs_per_tool() {
    let (_temp, ws) = workspace();
    let opts = InvocationOptions::new().make_args(vec!["tests".to_string()]);

    let cmi = compose(
        BuildTool::CatkinMakeIsolated,
        "noetic",
        &ws,
        &opts,
        Path::new("/opt/ros"),
    );
    assert!(cmi.command.ends_with("--catkin-make-args tests"));

    let colcon = compose(BuildTool::Colcon, "noetic", &ws, &opts, Path::new("/opt/ros"));
    assert!(colcon.command.ends_with("--cmake-target tests"));
}

#[test]
fn sourcing_chain_spans_all_parent_spaces() {
    let (_temp, ws) = workspace();

    let underlay = TempDir::new().unwrap();
    fs::write(underlay.path().join("setup.sh"), "").unwrap();
    fs::write(underlay.path().join(".catkin"), "").unwrap();

    let overlay = TempDir::new().unwrap();
    fs::write(overlay.path().join("setup.sh"), "").unwrap();
    fs::write(overlay.path().join(".colcon_install_layout"), "isolated").unwrap();

    let opts = InvocationOptions::new().parent_result_spaces(Some(vec![
        underlay.path().to_path_buf(),
        overlay.path().to_path_buf(),
    ]));
    let cmd = compose(BuildTool::Colcon, "noetic", &ws, &opts, Path::new("/opt/ros"));

    let underlay_setup = format!(". {}/setup.sh", underlay.path().display());
    let overlay_setup = format!(". {}/setup.sh", overlay.path().display());
    let idx_underlay = cmd.command.find(&underlay_setup).unwrap();
    let idx_overlay = cmd.command.find(&overlay_setup).unwrap();
    assert!(
        idx_underlay < idx_overlay,
        "underlay must be sourced before the overlay: {}",
        cmd.command
    );

    // marker-driven prefixes wrap the respective setup file
    assert!(cmd
        .command
        .contains(&format!("_CATKIN_SETUP_DIR={} . {}", underlay.path().display(), underlay.path().join("setup.sh").display())));
    assert!(cmd
        .command
        .contains(&format!("COLCON_CURRENT_PREFIX={} . {}", overlay.path().display(), overlay.path().join("setup.sh").display())));
}

#[test]
fn implicit_parent_space_derives_from_ros_root() {
    let (_temp, ws) = workspace();
    let ros_root = TempDir::new().unwrap();
    let distro = ros_root.path().join("humble");
    fs::create_dir(&distro).unwrap();
    fs::write(distro.join("setup.sh"), "").unwrap();

    let cmd = compose(
        BuildTool::Colcon,
        "humble",
        &ws,
        &InvocationOptions::new(),
        ros_root.path(),
    );
    assert!(cmd
        .command
        .starts_with(&format!(". {}/setup.sh && ", distro.display())));
}

#[test]
fn missing_setup_files_leave_command_unwrapped() {
    let (_temp, ws) = workspace();
    let cmd = compose(
        BuildTool::Colcon,
        "noetic",
        &ws,
        &InvocationOptions::new().parent_result_spaces(Some(vec!["/nonexistent/space".into()])),
        Path::new("/opt/ros"),
    );
    assert!(cmd.command.starts_with("PYTHONIOENCODING"));
    assert!(!cmd.command.contains("&&"));
}
