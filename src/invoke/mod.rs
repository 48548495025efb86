//! Build Tool Invocation
//!
//! Spawns the composed command line through the shell inside the
//! workspace root and waits for it to exit. Build output streams
//! straight to the farm log (inherited stdio).

pub mod abi;

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;

use crate::compose::{self, ComposedCommand};
use crate::error::{Error, Result};
use crate::models::{BuildTool, Invocation, InvocationOptions};
use crate::workspace::Workspace;

/// Shell used to run composed command lines
pub const DEFAULT_SHELL: &str = "sh";

/// Compose and run one build-tool invocation on a workspace.
///
/// Returns the child's exit code; `-1` when the child was terminated by
/// a signal.
pub async fn call_build_tool(
    tool: BuildTool,
    rosdistro: &str,
    workspace: &Workspace,
    opts: &InvocationOptions,
    ros_root: &Path,
    shell: &str,
) -> Result<i32> {
    let ComposedCommand {
        command,
        clear_cmake_caches,
    } = compose::compose(tool, rosdistro, workspace, opts, ros_root);

    if clear_cmake_caches {
        info!("Emulating '--cmake-clean-cache' in '{}'", workspace.root().display());
        workspace.clear_cmake_caches()?;
    }

    // prevent colcon from crawling the catkin results
    if tool.needs_scan_markers() {
        workspace.write_scan_markers()?;
    }

    run_shell_command(&command, workspace, opts, shell).await
}

/// Run an already-composed command line through the shell in the
/// workspace root.
pub async fn run_shell_command(
    command: &str,
    workspace: &Workspace,
    opts: &InvocationOptions,
    shell: &str,
) -> Result<i32> {
    let mut invocation = Invocation::new(command.to_string(), workspace.root().to_path_buf());

    info!("Invoking '{}' in '{}'", command, workspace.root().display());

    let mut cmd = Command::new(shell);
    cmd.arg("-c")
        .arg(command)
        .current_dir(workspace.root())
        .stdin(Stdio::null())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(env) = &opts.env {
        cmd.envs(env);
    }

    let mut child = cmd.spawn().map_err(|e| Error::CommandSpawnFailed {
        command: command.to_string(),
        reason: e.to_string(),
    })?;
    invocation.mark_started();

    let status = child.wait().await?;
    let exit_code = status.code().unwrap_or(-1);
    invocation.mark_terminated(exit_code);

    if exit_code == 0 {
        debug!("Invocation {} finished: {}", invocation.id, invocation);
    } else {
        warn!("Invocation {} failed: {}", invocation.id, invocation);
    }
    Ok(exit_code)
}
