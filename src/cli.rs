//! Command Line Interface
//!
//! Argument surface of the `wsbuild` binary. The flag names match what
//! the farm's job templates have always passed to this tool.

use std::path::PathBuf;

use clap::Parser;

use crate::config::{Config, ConfigLoader};
use crate::error::Result;
use crate::models::BuildTool;
use crate::pipeline::BuildAndTestJob;
use crate::workspace::Workspace;

/// Invoke the build tool on a workspace while enabling and running the
/// tests
#[derive(Parser, Debug, Clone)]
#[command(name = "wsbuild", version, about)]
pub struct Cli {
    /// The name of the ROS distro to identify the setup file to be
    /// sourced (if available)
    #[arg(long, value_name = "DISTRO")]
    pub rosdistro_name: String,

    /// The build tool to invoke on the workspace
    #[arg(long, value_enum)]
    pub build_tool: BuildTool,

    /// Arbitrary arguments passed to the build tool
    #[arg(long, num_args = 0.., allow_hyphen_values = true, value_name = "ARG")]
    pub build_tool_args: Vec<String>,

    /// The root path of the workspace to compile
    #[arg(long, value_name = "PATH")]
    pub workspace_root: PathBuf,

    /// The paths of the parent result spaces
    #[arg(long, num_args = 0.., value_name = "PATH")]
    pub parent_result_space: Vec<PathBuf>,

    /// The flag if the workspace should be cleaned before the
    /// invocation
    #[arg(long)]
    pub clean_before: bool,

    /// The flag if the workspace should be cleaned after the invocation
    #[arg(long)]
    pub clean_after: bool,

    /// Abort the job unless the agent has NVIDIA GPU support
    #[arg(long)]
    pub require_gpu_support: bool,

    /// Run only the tests labeled as needing a GPU
    #[arg(long, requires = "require_gpu_support")]
    pub run_only_gpu_tests: bool,

    /// Path to a farm configuration file (defaults to the standard
    /// search locations)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Load the farm configuration named by `--config`, or from the
    /// standard search locations.
    pub fn load_config(&self) -> Result<Config> {
        match &self.config {
            Some(path) => ConfigLoader::load_from_path(path),
            None => ConfigLoader::load(),
        }
    }

    /// Turn the parsed arguments into a runnable job.
    pub fn into_job(self, config: Config) -> BuildAndTestJob {
        let parent_result_spaces = if self.parent_result_space.is_empty() {
            None
        } else {
            Some(self.parent_result_space)
        };
        BuildAndTestJob {
            rosdistro_name: self.rosdistro_name,
            build_tool: self.build_tool,
            workspace: Workspace::new(self.workspace_root),
            build_tool_args: self.build_tool_args,
            parent_result_spaces,
            clean_before: self.clean_before,
            clean_after: self.clean_after,
            require_gpu_support: self.require_gpu_support,
            run_only_gpu_tests: self.run_only_gpu_tests,
            config,
        }
    }
}
