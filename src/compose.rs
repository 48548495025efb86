//! Build Command Composition
//!
//! Assembles the single shell command line that runs a build tool on a
//! workspace: environment prefixes, the tool's flags for the requested
//! stage, and the chain of `setup.sh` sources for parent result spaces.
//! No subprocess is spawned here.

use std::path::Path;

use crate::models::{BuildTool, ColconVerb, InvocationOptions};
use crate::workspace::Workspace;

/// Marker a catkin result space leaves in its root
const CATKIN_MARKER: &str = ".catkin";

/// Marker a colcon install space leaves in its root
const COLCON_LAYOUT_MARKER: &str = ".colcon_install_layout";

/// A composed command line plus the side work the runner must do first
#[derive(Debug, Clone)]
pub struct ComposedCommand {
    /// The full shell command line
    pub command: String,

    /// The runner must delete per-package CMake caches before spawning
    /// (catkin_make_isolated has no flag for it)
    pub clear_cmake_caches: bool,
}

/// Compose the shell command line for one build-tool invocation.
///
/// `ros_root` locates the implicit parent result space
/// (`<ros_root>/<rosdistro>`) used when the options carry none.
pub fn compose(
    tool: BuildTool,
    rosdistro: &str,
    workspace: &Workspace,
    opts: &InvocationOptions,
    ros_root: &Path,
) -> ComposedCommand {
    let mut tokens: Vec<String> = vec![
        "PYTHONIOENCODING=utf_8".to_string(),
        "PYTHONUNBUFFERED=1".to_string(),
    ];

    let mut script_name = tool.program().to_string();
    if tool == BuildTool::CatkinMakeIsolated {
        // use the script from the source space if available
        let script_from_source = workspace
            .source_space()
            .join("catkin")
            .join("bin")
            .join(tool.program());
        if script_from_source.exists() {
            script_name = script_from_source.to_string_lossy().into_owned();
            // override the shebang line if necessary
            if opts.env_var("ROS_PYTHON_VERSION").as_deref() == Some("3") {
                tokens.push("python3".to_string());
            }
        }
    }
    tokens.push(script_name);

    if tool == BuildTool::Colcon {
        let verb = opts.colcon_verb;
        tokens.push(verb.to_string());
        // match directory naming of catkin_make_isolated
        tokens.extend(
            [
                "--build-base",
                "build_isolated",
                "--install-base",
                "install_isolated",
                "--test-result-base",
                "test_results",
            ]
            .map(String::from),
        );

        match verb {
            // output cohesion per package to avoid interleaving
            ColconVerb::Build => {
                tokens.extend(["--event-handlers", "console_cohesion+"].map(String::from));
            }
            // process packages sequentially assuming tests from different
            // packages can't be executed in parallel
            ColconVerb::Test => {
                tokens.extend(
                    ["--event-handlers", "console_direct+", "--executor", "sequential"]
                        .map(String::from),
                );
            }
        }
    }

    if opts.force_cmake {
        tokens.push(
            match tool {
                BuildTool::CatkinMakeIsolated => "--force-cmake",
                BuildTool::Colcon => "--cmake-force-configure",
            }
            .to_string(),
        );
    }

    let mut clear_cmake_caches = false;
    if opts.cmake_clean_cache {
        match tool {
            // cmi doesn't have such an option, the runner deletes the
            // caches instead
            BuildTool::CatkinMakeIsolated => clear_cmake_caches = true,
            BuildTool::Colcon => tokens.push("--cmake-clean-cache".to_string()),
        }
    }

    if opts.install && tool == BuildTool::CatkinMakeIsolated {
        tokens.push("--install".to_string());
    }

    if !opts.cmake_args.is_empty() {
        tokens.push("--cmake-args".to_string());
        tokens.extend(opts.cmake_args.iter().cloned());
    }

    if !opts.ctest_args.is_empty() {
        match tool {
            BuildTool::Colcon => {
                tokens.push("--ctest-args".to_string());
                tokens.extend(opts.ctest_args.iter().cloned());
            }
            BuildTool::CatkinMakeIsolated => {
                // cmi runs tests through make targets and takes no ctest
                // filter of its own
                debug!("Dropping ctest args for {}: {:?}", tool, opts.ctest_args);
            }
        }
    }

    if !opts.make_args.is_empty() {
        tokens.push(
            match tool {
                BuildTool::CatkinMakeIsolated => "--catkin-make-args",
                BuildTool::Colcon => "--cmake-target",
            }
            .to_string(),
        );
        tokens.extend(opts.make_args.iter().cloned());
    }

    tokens.extend(opts.extra_args.iter().cloned());

    let mut command = tokens.join(" ");

    // prepend setup files if available
    let default_spaces = vec![ros_root.join(rosdistro)];
    let parent_result_spaces = opts.parent_result_spaces.as_ref().unwrap_or(&default_spaces);
    for space in parent_result_spaces.iter().rev() {
        let setup_file = space.join("setup.sh");
        if setup_file.exists() {
            command = format!(". {} && {}", setup_file.display(), command);
            if space.join(CATKIN_MARKER).is_file() {
                command = format!("_CATKIN_SETUP_DIR={} {}", space.display(), command);
            }
            if space.join(COLCON_LAYOUT_MARKER).is_file() {
                command = format!("COLCON_CURRENT_PREFIX={} {}", space.display(), command);
            }
        }
    }

    ComposedCommand {
        command,
        clear_cmake_caches,
    }
}
