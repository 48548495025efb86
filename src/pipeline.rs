//! Build and Test Pipeline
//!
//! Orchestrates the three sequential build-tool invocations of a farm
//! job: build the workspace in isolation, build its tests, run the
//! tests. Each stage only runs when the previous one exited zero; the
//! first non-zero exit code is the job's result. Optional workspace
//! cleaning happens before the first stage and, deferred, after the
//! last regardless of failure.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::config::Config;
use crate::error::{Error, Result};
use crate::gpu::has_gpu_support;
use crate::invoke::call_build_tool;
use crate::models::{BuildTool, ColconVerb, InvocationOptions};
use crate::scope::Scope;
use crate::workspace::Workspace;

/// GPU test label used by packages to mark tests needing a GPU
pub const GPU_TEST_LABEL: &str = "gpu_test";

/// One build-and-test job on a workspace
#[derive(Debug, Clone)]
pub struct BuildAndTestJob {
    /// Name of the distro whose setup file is sourced (if available)
    pub rosdistro_name: String,
    /// Build tool to invoke
    pub build_tool: BuildTool,
    /// Workspace to compile
    pub workspace: Workspace,
    /// Arguments forwarded verbatim to the build tool
    pub build_tool_args: Vec<String>,
    /// Parent result spaces layered under the workspace
    pub parent_result_spaces: Option<Vec<PathBuf>>,
    /// Clean the workspace before the invocation
    pub clean_before: bool,
    /// Clean the workspace after the invocation
    pub clean_after: bool,
    /// Abort unless the agent has GPU support
    pub require_gpu_support: bool,
    /// Run only the GPU-labeled tests
    pub run_only_gpu_tests: bool,
    /// Farm agent configuration
    pub config: Config,
}

impl BuildAndTestJob {
    /// Run the whole job, returning the exit code of the last stage
    /// that ran.
    pub async fn run(&self) -> Result<i32> {
        self.workspace.ensure_exists()?;

        if self.clean_before {
            self.workspace.clean()?;
        }

        let result = self.run_stages().await;

        // deferred cleanup runs on success and failure alike
        if self.clean_after {
            if let Err(e) = self.workspace.clean() {
                warn!("Cleanup after the job failed: {}", e);
            }
        }

        result
    }

    async fn run_stages(&self) -> Result<i32> {
        let ctest_args = self.ctest_filter()?;
        let env = self.job_env();

        let rc = {
            let _scope = Scope::subsection("build workspace in isolation");
            self.invoke(self.build_stage_options(env.clone())).await?
        };
        if rc != 0 {
            return Ok(rc);
        }

        let rc = {
            let _scope = Scope::subsection("build tests");
            self.invoke(self.build_tests_stage_options(env.clone())).await?
        };
        if rc != 0 {
            return Ok(rc);
        }

        let _scope = Scope::subsection("run tests");
        self.invoke(self.run_tests_stage_options(ctest_args, env)).await
    }

    async fn invoke(&self, opts: InvocationOptions) -> Result<i32> {
        call_build_tool(
            self.build_tool,
            &self.rosdistro_name,
            &self.workspace,
            &opts,
            &self.config.paths.ros_root,
            &self.config.build.shell,
        )
        .await
    }

    /// The cmake arguments shared by the build stages
    fn testing_cmake_args(&self) -> Vec<String> {
        vec![
            "-DBUILD_TESTING=1".to_string(),
            "-DCATKIN_ENABLE_TESTING=1".to_string(),
            "-DCATKIN_SKIP_TESTING=0".to_string(),
            format!(
                "-DCATKIN_TEST_RESULTS_DIR={}",
                self.workspace.test_results().display()
            ),
        ]
    }

    /// CTest label filter for the test run.
    ///
    /// Without GPU support the `gpu_test` label is excluded by default.
    /// When GPU support is required, its absence aborts the job; with
    /// support present either all tests run or only the GPU-labeled
    /// ones.
    fn ctest_filter(&self) -> Result<Vec<String>> {
        if !self.require_gpu_support {
            return Ok(vec![format!("-LE \"{}\"", GPU_TEST_LABEL)]);
        }
        if !has_gpu_support() {
            return Err(Error::GpuSupportMissing);
        }
        if self.run_only_gpu_tests {
            Ok(vec![format!("-L \"{}\"", GPU_TEST_LABEL)])
        } else {
            Ok(Vec::new())
        }
    }

    /// Environment overrides shared by all stages: `MAKEFLAGS` gets the
    /// configured default unless the job environment already sets one.
    fn job_env(&self) -> Option<HashMap<String, String>> {
        if std::env::var_os("MAKEFLAGS").is_some() {
            return None;
        }
        Some(HashMap::from([(
            "MAKEFLAGS".to_string(),
            self.config.build.makeflags.clone(),
        )]))
    }

    fn build_stage_options(&self, env: Option<HashMap<String, String>>) -> InvocationOptions {
        let mut additional_args = self.build_tool_args.clone();
        if self.build_tool == BuildTool::Colcon {
            additional_args.push("--test-result-base".to_string());
            additional_args.push(self.workspace.test_results().display().to_string());
        }
        InvocationOptions::new()
            .cmake_clean_cache(true)
            .cmake_args(self.testing_cmake_args())
            .extra_args(additional_args)
            .parent_result_spaces(self.parent_result_spaces.clone())
            .env(env)
    }

    fn build_tests_stage_options(&self, env: Option<HashMap<String, String>>) -> InvocationOptions {
        let mut additional_args = self.build_tool_args.clone();
        if self.build_tool == BuildTool::Colcon {
            additional_args.push("--cmake-target-skip-unavailable".to_string());
        }
        InvocationOptions::new()
            .cmake_args(self.testing_cmake_args())
            .make_args(vec!["tests".to_string()])
            .extra_args(additional_args)
            .parent_result_spaces(self.parent_result_spaces.clone())
            .env(env)
    }

    fn run_tests_stage_options(
        &self,
        ctest_args: Vec<String>,
        env: Option<HashMap<String, String>>,
    ) -> InvocationOptions {
        // for workspaces with only plain cmake packages the setup files
        // generated by cmi won't implicitly source the underlays
        let mut parent_result_spaces = self.parent_result_spaces.clone().unwrap_or_else(|| {
            vec![self.config.paths.ros_root.join(&self.rosdistro_name)]
        });
        match self.build_tool {
            BuildTool::CatkinMakeIsolated => {
                // cmi provides no custom environment to run tests, so the
                // fresh devel space is sourced and a CMake run is forced
                parent_result_spaces.push(self.workspace.devel_space());
                InvocationOptions::new()
                    .cmake_args(self.testing_cmake_args())
                    .ctest_args(ctest_args)
                    .force_cmake(true)
                    .make_args(vec!["run_tests".to_string()])
                    .extra_args(self.build_tool_args.clone())
                    .parent_result_spaces(Some(parent_result_spaces))
                    .env(env)
            }
            BuildTool::Colcon => InvocationOptions::new()
                .ctest_args(ctest_args)
                .extra_args(vec![
                    "--test-result-base".to_string(),
                    self.workspace.test_results().display().to_string(),
                ])
                .colcon_verb(ColconVerb::Test)
                .parent_result_spaces(Some(parent_result_spaces))
                .env(env),
        }
    }
}
