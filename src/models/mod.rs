//! Core data models for wsbuild
//!
//! This module contains the data structures that represent the domain
//! entities of a farm job: the supported build tools, the options of a
//! single build-tool call, and the lifecycle record of an invocation.

pub mod build_tool;
pub mod invocation;
pub mod options;

// Re-exports for convenience
pub use build_tool::{BuildTool, ColconVerb};
pub use invocation::{Invocation, InvocationState};
pub use options::InvocationOptions;
