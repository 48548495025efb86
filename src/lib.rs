//! wsbuild - workspace build and test orchestration for a CI farm
//!
//! This library prepares a catkin/colcon workspace, composes the shell
//! command line for one of the two supported build tools, and invokes
//! it as a subprocess to build and test the workspace.
//!
//! ## Module Organization
//!
//! - [`workspace`] - Workspace layout, validation, cleaning, scan markers
//! - [`compose`] - Command-line composition for a build-tool invocation
//! - [`invoke`] - Subprocess execution and the ABI checker
//! - [`pipeline`] - The build, build-tests, run-tests job sequence
//! - [`models`] - Data structures (BuildTool, Invocation, options)
//! - [`config`] - Farm agent configuration
//! - [`gpu`] - NVIDIA support detection
//! - [`scope`] - Log section bracketing
//! - [`cli`] - Argument parsing for the `wsbuild` binary
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Quick Start
//!
//! ```no_run
//! use wsbuild::config::Config;
//! use wsbuild::models::BuildTool;
//! use wsbuild::pipeline::BuildAndTestJob;
//! use wsbuild::workspace::Workspace;
//!
//! # async fn run() -> wsbuild::Result<()> {
//! let job = BuildAndTestJob {
//!     rosdistro_name: "noetic".to_string(),
//!     build_tool: BuildTool::Colcon,
//!     workspace: Workspace::new("/jobs/ws"),
//!     build_tool_args: Vec::new(),
//!     parent_result_spaces: None,
//!     clean_before: true,
//!     clean_after: false,
//!     require_gpu_support: false,
//!     run_only_gpu_tests: false,
//!     config: Config::default(),
//! };
//! let exit_code = job.run().await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Behavior
//!
//! - Each stage blocks until the child exits; the first non-zero exit
//!   code stops the sequence and becomes the job result
//! - Cleaning after the job is deferred and runs on failure too
//! - Non-colcon invocations drop `COLCON_IGNORE` markers so a later
//!   colcon run does not crawl their output

#[macro_use]
extern crate tracing;

pub mod cli;
pub mod compose;
pub mod config;
pub mod error;
pub mod gpu;
pub mod invoke;
pub mod models;
pub mod pipeline;
pub mod scope;
pub mod workspace;

// Re-exports for core functionality
pub use config::Config;
pub use error::{Error, Result};
pub use models::{BuildTool, ColconVerb, Invocation, InvocationOptions};
pub use pipeline::BuildAndTestJob;
pub use workspace::Workspace;

// Version information
/// The current version of wsbuild from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");
