//! Invocation Options
//!
//! All the knobs of a single build-tool call. The pipeline composes one
//! of these per stage and hands it to the command composer.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::models::ColconVerb;

/// Options for one build-tool invocation
#[derive(Debug, Clone, Default)]
pub struct InvocationOptions {
    /// Arguments forwarded after `--cmake-args`
    pub cmake_args: Vec<String>,

    /// Arguments forwarded after `--catkin-make-args` (catkin_make_isolated)
    /// or `--cmake-target` (colcon)
    pub make_args: Vec<String>,

    /// CTest label filter arguments, appended to the cmake args verbatim
    pub ctest_args: Vec<String>,

    /// Extra arguments appended verbatim at the end of the command
    pub extra_args: Vec<String>,

    /// Force a CMake configure run
    pub force_cmake: bool,

    /// Clear per-package CMake caches before building
    pub cmake_clean_cache: bool,

    /// Install the workspace (catkin_make_isolated only)
    pub install: bool,

    /// Result spaces whose setup files are sourced before the command;
    /// `None` means the implicit `<ros_root>/<rosdistro>` space
    pub parent_result_spaces: Option<Vec<PathBuf>>,

    /// Verb used when the tool is colcon
    pub colcon_verb: ColconVerb,

    /// Environment overrides applied on top of the inherited environment
    pub env: Option<HashMap<String, String>>,
}

impl InvocationOptions {
    /// Create options with all defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the cmake args
    pub fn cmake_args(mut self, args: Vec<String>) -> Self {
        self.cmake_args = args;
        self
    }

    /// Set the make args
    pub fn make_args(mut self, args: Vec<String>) -> Self {
        self.make_args = args;
        self
    }

    /// Set the ctest label filter args
    pub fn ctest_args(mut self, args: Vec<String>) -> Self {
        self.ctest_args = args;
        self
    }

    /// Set the verbatim trailing args
    pub fn extra_args(mut self, args: Vec<String>) -> Self {
        self.extra_args = args;
        self
    }

    /// Force a CMake configure run
    pub fn force_cmake(mut self, force: bool) -> Self {
        self.force_cmake = force;
        self
    }

    /// Clear per-package CMake caches before building
    pub fn cmake_clean_cache(mut self, clean: bool) -> Self {
        self.cmake_clean_cache = clean;
        self
    }

    /// Install the workspace (catkin_make_isolated only)
    pub fn install(mut self, install: bool) -> Self {
        self.install = install;
        self
    }

    /// Set the parent result spaces
    pub fn parent_result_spaces(mut self, spaces: Option<Vec<PathBuf>>) -> Self {
        self.parent_result_spaces = spaces;
        self
    }

    /// Set the colcon verb
    pub fn colcon_verb(mut self, verb: ColconVerb) -> Self {
        self.colcon_verb = verb;
        self
    }

    /// Set the environment overrides
    pub fn env(mut self, env: Option<HashMap<String, String>>) -> Self {
        self.env = env;
        self
    }

    /// Look up a variable in the overrides, falling back to the process
    /// environment (overrides are applied on top of the inherited
    /// environment when the subprocess is spawned)
    pub fn env_var(&self, key: &str) -> Option<String> {
        if let Some(value) = self.env.as_ref().and_then(|env| env.get(key)) {
            return Some(value.clone());
        }
        std::env::var(key).ok()
    }
}
