//! Farm Configuration
//!
//! Agent-level defaults that parameterize every job on the machine: the
//! shell used for invocations, the default `MAKEFLAGS`, and where the
//! installed distributions live. Loaded from a TOML (or JSON) file via
//! [`loader::ConfigLoader`]; all values have working defaults.

pub mod loader;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub use loader::ConfigLoader;

/// Farm agent configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build invocation defaults
    pub build: BuildConfig,
    /// Filesystem locations
    pub paths: PathsConfig,
}

/// Build invocation defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Value for `MAKEFLAGS` when the job environment does not set one;
    /// serial by default so test output stays readable
    pub makeflags: String,
    /// Shell used to run composed command lines
    pub shell: String,
}

/// Filesystem locations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Root of the installed distributions; the implicit parent result
    /// space is `<ros_root>/<rosdistro>`
    pub ros_root: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            makeflags: "-j1".to_string(),
            shell: "sh".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            ros_root: PathBuf::from("/opt/ros"),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            paths: PathsConfig::default(),
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Shell cannot be empty")]
    EmptyShell,

    #[error("MAKEFLAGS default cannot be empty")]
    EmptyMakeflags,

    #[error("Distribution root cannot be empty")]
    EmptyRosRoot,
}

impl ConfigError {
    /// The configuration field the error refers to
    pub fn field(&self) -> &'static str {
        match self {
            ConfigError::EmptyShell => "build.shell",
            ConfigError::EmptyMakeflags => "build.makeflags",
            ConfigError::EmptyRosRoot => "paths.ros_root",
        }
    }
}

impl Config {
    /// Validate the configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build.shell.trim().is_empty() {
            return Err(ConfigError::EmptyShell);
        }
        if self.build.makeflags.trim().is_empty() {
            return Err(ConfigError::EmptyMakeflags);
        }
        if self.paths.ros_root.as_os_str().is_empty() {
            return Err(ConfigError::EmptyRosRoot);
        }
        Ok(())
    }
}
