//! Error types and Result aliases for wsbuild

use std::fmt;
use std::path::PathBuf;

/// Result type alias for wsbuild operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for wsbuild
#[derive(Debug)]
pub enum Error {
    // === Workspace errors ===
    /// Workspace root directory does not exist
    WorkspaceNotFound {
        path: PathBuf,
    },

    /// Source space (`src`) is missing under the workspace root
    SourceSpaceNotFound {
        path: PathBuf,
    },

    /// Failed to remove a generated workspace directory
    CleanFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to create a scan-marker file
    MarkerCreationFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to parse a package manifest
    ManifestParseFailed {
        path: PathBuf,
        reason: String,
    },

    // === Invocation errors ===
    /// Failed to spawn the build-tool subprocess
    CommandSpawnFailed {
        command: String,
        reason: String,
    },

    /// Build tool name not recognized
    UnknownBuildTool {
        name: String,
    },

    /// GPU support was required but none was detected
    GpuSupportMissing,

    // === Configuration errors ===
    /// Failed to load configuration file
    ConfigLoadFailed {
        path: PathBuf,
        reason: String,
    },

    /// Failed to parse configuration
    ConfigParseFailed {
        format: String,
        reason: String,
    },

    /// Configuration validation failed
    ConfigValidationFailed {
        field: String,
        reason: String,
    },

    /// Configuration file not found
    ConfigNotFound,

    // === I/O and serialization errors ===
    /// I/O errors
    Io(std::io::Error),

    /// Serialization errors
    Serde(serde_json::Error),

    /// TOML parsing errors
    Toml(toml::de::Error),

    // === Generic fallback (use sparingly) ===
    /// Generic errors (for cases not yet categorized)
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Workspace errors
            Error::WorkspaceNotFound { path } => {
                write!(f, "Workspace root '{}' does not exist", path.display())
            }
            Error::SourceSpaceNotFound { path } => {
                write!(f, "Source space '{}' does not exist", path.display())
            }
            Error::CleanFailed { path, reason } => {
                write!(f, "Failed to remove '{}': {}", path.display(), reason)
            }
            Error::MarkerCreationFailed { path, reason } => {
                write!(f, "Failed to create marker '{}': {}", path.display(), reason)
            }
            Error::ManifestParseFailed { path, reason } => {
                write!(f, "Failed to parse manifest '{}': {}", path.display(), reason)
            }

            // Invocation errors
            Error::CommandSpawnFailed { command, reason } => {
                write!(f, "Failed to spawn command '{}': {}", command, reason)
            }
            Error::UnknownBuildTool { name } => {
                write!(f, "Unknown build tool '{}'", name)
            }
            Error::GpuSupportMissing => {
                write!(
                    f,
                    "GPU support is required but no NVIDIA support was detected"
                )
            }

            // Configuration errors
            Error::ConfigLoadFailed { path, reason } => {
                write!(f, "Failed to load config from '{}': {}", path.display(), reason)
            }
            Error::ConfigParseFailed { format, reason } => {
                write!(f, "Failed to parse {} config: {}", format, reason)
            }
            Error::ConfigValidationFailed { field, reason } => {
                write!(f, "Configuration validation failed for '{}': {}", field, reason)
            }
            Error::ConfigNotFound => {
                write!(f, "Configuration file not found")
            }

            // I/O and serialization errors
            Error::Io(err) => write!(f, "I/O error: {}", err),
            Error::Serde(err) => write!(f, "Serialization error: {}", err),
            Error::Toml(err) => write!(f, "TOML parsing error: {}", err),

            // Generic fallback
            Error::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serde(err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Toml(err)
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}

impl From<&str> for Error {
    fn from(err: &str) -> Self {
        Error::Other(err.to_string())
    }
}
