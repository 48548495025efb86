//! Build Tool Invocation Model
//!
//! Lifecycle record of one build-tool subprocess: the composed command
//! line, where it ran, when it started and finished, and how it exited.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the state of a build-tool invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InvocationState {
    /// Command line has been composed but not spawned
    #[default]
    Created,
    /// Subprocess is currently running
    Running,
    /// Subprocess has terminated
    Terminated,
}

/// Record of one build-tool subprocess run against a workspace
#[derive(Debug, Clone)]
pub struct Invocation {
    /// Unique id of this invocation within the farm job
    pub id: Uuid,

    /// The full shell command line that was (or will be) run
    pub command: String,

    /// Workspace root the command runs in
    pub workspace_root: PathBuf,

    /// Current state of the invocation
    pub state: InvocationState,

    /// When the subprocess was started
    pub start_time: Option<DateTime<Utc>>,

    /// When the subprocess terminated (if applicable)
    pub end_time: Option<DateTime<Utc>>,

    /// Exit code (if the subprocess has terminated)
    pub exit_code: Option<i32>,
}

impl Invocation {
    /// Create a new invocation in the Created state
    pub fn new(command: String, workspace_root: PathBuf) -> Self {
        Self {
            id: Uuid::new_v4(),
            command,
            workspace_root,
            state: InvocationState::Created,
            start_time: None,
            end_time: None,
            exit_code: None,
        }
    }

    /// Mark the invocation as started
    pub fn mark_started(&mut self) {
        self.state = InvocationState::Running;
        self.start_time = Some(Utc::now());
    }

    /// Mark the invocation as terminated with the given exit code
    pub fn mark_terminated(&mut self, exit_code: i32) {
        self.state = InvocationState::Terminated;
        self.end_time = Some(Utc::now());
        self.exit_code = Some(exit_code);
    }

    /// Check if the subprocess is currently running
    pub fn is_running(&self) -> bool {
        matches!(self.state, InvocationState::Running)
    }

    /// Check if the subprocess has terminated
    pub fn is_terminated(&self) -> bool {
        matches!(self.state, InvocationState::Terminated)
    }

    /// Check if the subprocess exited successfully (exit code 0)
    pub fn exited_successfully(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Get the wall time of the run if the subprocess has terminated
    pub fn execution_duration(&self) -> Option<std::time::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                Some(end.signed_duration_since(start).to_std().unwrap_or_default())
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state_str = match self.state {
            InvocationState::Created => "Created",
            InvocationState::Running => "Running",
            InvocationState::Terminated => "Terminated",
        };
        write!(
            f,
            "[{}] {} in '{}' {}",
            state_str,
            self.command,
            self.workspace_root.display(),
            self.exit_code
                .map_or(String::new(), |code| format!("(exit: {})", code))
        )
    }
}
