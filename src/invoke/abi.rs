//! ABI Checker Invocation
//!
//! Runs the farm's auto-abi checker against the packages of one or more
//! workspaces, comparing the released packages with the locally built
//! tree.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::invoke::run_shell_command;
use crate::models::InvocationOptions;
use crate::workspace::{packages, Workspace};

/// Location of the auto-abi checker on farm machines
pub const ABI_CHECKER: &str = "/tmp/auto-abi-checker/auto-abi.py";

/// Compose the ABI checker command for the given workspaces.
///
/// Package names are collected across all source spaces; the first
/// workspace receives the comparison and the report.
pub fn compose_abi_command(rosdistro: &str, workspace_roots: &[PathBuf]) -> Result<String> {
    let first_root = workspace_roots
        .first()
        .ok_or_else(|| Error::Other("No workspace root given for ABI check".to_string()))?;

    let mut pkg_names = Vec::new();
    for root in workspace_roots {
        let ws = Workspace::new(root);
        for name in packages::find_packages(&ws.source_space())?.keys() {
            if !pkg_names.contains(name) {
                pkg_names.push(name.clone());
            }
        }
    }

    Ok(format!(
        "ROS_DISTRO={} {} --orig-type ros-pkg --orig {} --new-type local-dir --new {} --report-dir {}",
        rosdistro,
        ABI_CHECKER,
        pkg_names.join(","),
        first_root.display(),
        first_root.display(),
    ))
}

/// Run the ABI checker, returning its exit code.
pub async fn call_abi_checker(
    rosdistro: &str,
    workspace_roots: &[PathBuf],
    opts: &InvocationOptions,
    shell: &str,
) -> Result<i32> {
    let command = compose_abi_command(rosdistro, workspace_roots)?;
    let workspace = Workspace::new(&workspace_roots[0]);
    run_shell_command(&command, &workspace, opts, shell).await
}
