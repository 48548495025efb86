//! Workspace Layout and Bookkeeping
//!
//! A workspace is a directory tree with a `src` folder of packages plus
//! the generated build, devel, install, and test-result folders. This
//! module validates the layout, cleans generated output, and drops the
//! marker files that keep one build tool from crawling another's output.

pub mod packages;

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Marker file that tells colcon to skip a directory when crawling
pub const SCAN_MARKER: &str = "COLCON_IGNORE";

/// A catkin/colcon workspace rooted at a directory
#[derive(Debug, Clone)]
pub struct Workspace {
    root: PathBuf,
}

impl Workspace {
    /// Wrap an existing or prospective workspace root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The source space (`src`)
    pub fn source_space(&self) -> PathBuf {
        self.root.join("src")
    }

    /// The isolated build space (`build_isolated`)
    pub fn build_space(&self) -> PathBuf {
        self.root.join("build_isolated")
    }

    /// The isolated devel space (`devel_isolated`)
    pub fn devel_space(&self) -> PathBuf {
        self.root.join("devel_isolated")
    }

    /// The isolated install space (`install_isolated`)
    pub fn install_space(&self) -> PathBuf {
        self.root.join("install_isolated")
    }

    /// The test results directory (`test_results`)
    pub fn test_results(&self) -> PathBuf {
        self.root.join("test_results")
    }

    /// Validate that the workspace root and its source space exist
    pub fn ensure_exists(&self) -> Result<()> {
        if !self.root.exists() {
            return Err(Error::WorkspaceNotFound {
                path: self.root.clone(),
            });
        }
        let source_space = self.source_space();
        if !source_space.exists() {
            return Err(Error::SourceSpaceNotFound { path: source_space });
        }
        Ok(())
    }

    /// Remove the generated build, devel, install, and test-result
    /// directories. Absent directories are skipped. Returns the paths
    /// that were actually removed.
    pub fn clean(&self) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for dir in [
            self.build_space(),
            self.devel_space(),
            self.install_space(),
            self.test_results(),
        ] {
            if dir.exists() {
                debug!("Removing '{}'", dir.display());
                fs::remove_dir_all(&dir).map_err(|e| Error::CleanFailed {
                    path: dir.clone(),
                    reason: e.to_string(),
                })?;
                removed.push(dir);
            }
        }
        if !removed.is_empty() {
            info!("Cleaned {} directories under '{}'", removed.len(), self.root.display());
        }
        Ok(removed)
    }

    /// Create the generated output directories if needed and drop an
    /// empty scan marker in each, so a later colcon run does not crawl
    /// the catkin results. Idempotent.
    pub fn write_scan_markers(&self) -> Result<()> {
        for dir in [self.build_space(), self.devel_space(), self.install_space()] {
            fs::create_dir_all(&dir)?;
            let marker = dir.join(SCAN_MARKER);
            fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(&marker)
                .map_err(|e| Error::MarkerCreationFailed {
                    path: marker.clone(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }

    /// Delete each per-package `CMakeCache.txt` under the build space.
    ///
    /// catkin_make_isolated has no `--cmake-clean-cache` flag, so the
    /// caches are removed by hand before the tool runs. Packages are
    /// visited in sorted order. Returns the package directory names
    /// whose cache file was removed.
    pub fn clear_cmake_caches(&self) -> Result<Vec<String>> {
        let build_space = self.build_space();
        let mut cleared = Vec::new();
        if !build_space.is_dir() {
            return Ok(cleared);
        }

        let mut names: Vec<String> = fs::read_dir(&build_space)?
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect();
        names.sort();

        for name in names {
            let cache_file = build_space.join(&name).join("CMakeCache.txt");
            if cache_file.exists() {
                info!("- rm '{}/CMakeCache.txt'", name);
                fs::remove_file(&cache_file)?;
                cleared.push(name);
            }
        }
        Ok(cleared)
    }
}
