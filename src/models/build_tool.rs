//! Build Tool Definitions
//!
//! Canonical definition of the build tools a farm job may invoke on a
//! workspace. Only the two catkin-capable builders are supported.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Build tool used to compile and test a workspace
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default, clap::ValueEnum,
)]
pub enum BuildTool {
    /// catkin_make_isolated from the catkin repository
    #[default]
    #[value(name = "catkin_make_isolated")]
    CatkinMakeIsolated,
    /// colcon
    #[value(name = "colcon")]
    Colcon,
}

impl BuildTool {
    /// Name of the program to invoke
    pub fn program(&self) -> &'static str {
        match self {
            BuildTool::CatkinMakeIsolated => "catkin_make_isolated",
            BuildTool::Colcon => "colcon",
        }
    }

    /// Whether invoking this tool must drop scan markers so a later
    /// colcon run does not crawl its output directories
    pub fn needs_scan_markers(&self) -> bool {
        !matches!(self, BuildTool::Colcon)
    }
}

impl fmt::Display for BuildTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program())
    }
}

impl FromStr for BuildTool {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "catkin_make_isolated" => Ok(BuildTool::CatkinMakeIsolated),
            "colcon" => Ok(BuildTool::Colcon),
            other => Err(Error::UnknownBuildTool {
                name: other.to_string(),
            }),
        }
    }
}

/// Verb passed to colcon for a given pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum ColconVerb {
    /// Compile the workspace
    #[default]
    Build,
    /// Run the workspace tests
    Test,
}

impl ColconVerb {
    /// The verb word as colcon expects it on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            ColconVerb::Build => "build",
            ColconVerb::Test => "test",
        }
    }
}

impl fmt::Display for ColconVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
