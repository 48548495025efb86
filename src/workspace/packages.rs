//! Package Manifest Discovery
//!
//! Walks a source space for `package.xml` manifests and extracts the
//! package names. Directories holding an ignore marker are not entered,
//! matching how the build tools themselves crawl a source tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

/// Manifest file that marks a package root
pub const MANIFEST_NAME: &str = "package.xml";

/// Markers that stop the crawl from descending into a directory
const IGNORE_MARKERS: [&str; 2] = ["CATKIN_IGNORE", "COLCON_IGNORE"];

static NAME_ELEMENT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<name>\s*([^<\s]+)\s*</name>").expect("valid manifest name pattern"));

/// Find all package manifests under a source space and map package name
/// to the directory holding its manifest. Later occurrences of a
/// duplicated name win.
pub fn find_packages(source_space: &Path) -> Result<BTreeMap<String, PathBuf>> {
    let mut packages = BTreeMap::new();
    crawl(source_space, &mut packages)?;
    debug!(
        "Found {} packages under '{}'",
        packages.len(),
        source_space.display()
    );
    Ok(packages)
}

fn crawl(dir: &Path, packages: &mut BTreeMap<String, PathBuf>) -> Result<()> {
    if !dir.is_dir() {
        return Ok(());
    }
    if IGNORE_MARKERS.iter().any(|m| dir.join(m).exists()) {
        return Ok(());
    }

    let manifest = dir.join(MANIFEST_NAME);
    if manifest.is_file() {
        let name = package_name(&manifest)?;
        packages.insert(name, dir.to_path_buf());
        // a package root does not nest further packages
        return Ok(());
    }

    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_dir())
        .collect();
    entries.sort();

    for entry in entries {
        crawl(&entry, packages)?;
    }
    Ok(())
}

/// Extract the package name from a manifest file
pub fn package_name(manifest: &Path) -> Result<String> {
    let content = fs::read_to_string(manifest)?;
    NAME_ELEMENT
        .captures(&content)
        .map(|caps| caps[1].to_string())
        .ok_or_else(|| Error::ManifestParseFailed {
            path: manifest.to_path_buf(),
            reason: "no <name> element found".to_string(),
        })
}
