//! Integration Tests for Workspace Lifecycle
//!
//! Exercises validation, cleaning, and scan-marker creation on real
//! temporary directory trees.

use std::fs;

use tempfile::TempDir;

use wsbuild::error::Error;
use wsbuild::workspace::{Workspace, SCAN_MARKER};

fn workspace_with_src() -> (TempDir, Workspace) {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("src")).unwrap();
    let ws = Workspace::new(temp.path());
    (temp, ws)
}

#[test]
fn validation_runs_before_any_build_step() {
    let temp = TempDir::new().unwrap();

    // no root at all
    let ws = Workspace::new(temp.path().join("gone"));
    assert!(matches!(
        ws.ensure_exists().unwrap_err(),
        Error::WorkspaceNotFound { .. }
    ));

    // root without a source space
    let ws = Workspace::new(temp.path());
    assert!(matches!(
        ws.ensure_exists().unwrap_err(),
        Error::SourceSpaceNotFound { .. }
    ));

    // full layout
    fs::create_dir(temp.path().join("src")).unwrap();
    assert!(ws.ensure_exists().is_ok());
}

#[test]
fn clean_removes_generated_output_only() {
    let (_temp, ws) = workspace_with_src();

    for dir in [
        ws.build_space(),
        ws.devel_space(),
        ws.install_space(),
        ws.test_results(),
    ] {
        fs::create_dir_all(dir.join("inner")).unwrap();
        fs::write(dir.join("inner/artifact.txt"), "stale").unwrap();
    }
    fs::write(ws.source_space().join("keep.txt"), "source").unwrap();

    let removed = ws.clean().unwrap();
    assert_eq!(removed.len(), 4);

    assert!(!ws.build_space().exists());
    assert!(!ws.devel_space().exists());
    assert!(!ws.install_space().exists());
    assert!(!ws.test_results().exists());
    assert!(ws.source_space().join("keep.txt").exists());
}

#[test]
fn clean_twice_is_safe() {
    let (_temp, ws) = workspace_with_src();
    fs::create_dir_all(ws.build_space()).unwrap();

    assert_eq!(ws.clean().unwrap().len(), 1);
    assert!(ws.clean().unwrap().is_empty());
}

#[test]
fn scan_markers_cover_the_three_output_spaces() {
    let (_temp, ws) = workspace_with_src();
    ws.write_scan_markers().unwrap();

    for dir in [ws.build_space(), ws.devel_space(), ws.install_space()] {
        let marker = dir.join(SCAN_MARKER);
        assert!(marker.is_file(), "missing marker in {}", dir.display());
        assert_eq!(fs::metadata(&marker).unwrap().len(), 0);
    }
}

#[test]
fn scan_markers_do_not_clobber_existing_output() {
    let (_temp, ws) = workspace_with_src();
    fs::create_dir_all(ws.build_space().join("pkg")).unwrap();
    fs::write(ws.build_space().join("pkg/result.txt"), "built").unwrap();

    ws.write_scan_markers().unwrap();
    ws.write_scan_markers().unwrap();

    assert!(ws.build_space().join("pkg/result.txt").exists());
    assert_eq!(
        fs::metadata(ws.build_space().join(SCAN_MARKER)).unwrap().len(),
        0
    );
}

#[test]
fn cmake_cache_clearing_visits_packages_in_order() {
    let (_temp, ws) = workspace_with_src();
    for pkg in ["zeta", "alpha", "midway"] {
        let dir = ws.build_space().join(pkg);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("CMakeCache.txt"), "# CMake cache").unwrap();
        fs::write(dir.join("Makefile"), "all:").unwrap();
    }

    let cleared = ws.clear_cmake_caches().unwrap();
    assert_eq!(cleared, vec!["alpha", "midway", "zeta"]);

    for pkg in ["zeta", "alpha", "midway"] {
        let dir = ws.build_space().join(pkg);
        assert!(!dir.join("CMakeCache.txt").exists());
        // everything else stays
        assert!(dir.join("Makefile").exists());
    }
}
