//! Error types for the harness

use stevedore_core::retry::{FailureClass, FailureKind};
use thiserror::Error;

/// Result type alias using the harness Error type
pub type Result<T> = std::result::Result<T, HarnessError>;

/// Harness error taxonomy
///
/// Every variant maps to a [`FailureKind`] so retry predicates can filter
/// on the category of a failure without inspecting its concrete shape.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// A command exited non-zero or could not be launched
    #[error("command failed (exit {code:?}): {command}\n{stderr}")]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// A command exceeded its time budget
    #[error("command timed out after {seconds}s: {command}")]
    Timeout { command: String, seconds: u64 },

    /// The host refused an operation
    #[error("permission denied: {context}")]
    PermissionDenied { context: String },

    /// A required tool is not installed
    #[error("required tool not found: {tool}. {hint}")]
    MissingPrerequisite { tool: String, hint: String },

    /// Configuration file not found
    #[error("configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Invalid configuration
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlParse(#[from] serde_yaml_ng::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HarnessError {
    /// Create a command failure from a command line, exit code, and stderr
    pub fn command_failed(
        command: impl Into<String>,
        code: Option<i32>,
        stderr: impl Into<String>,
    ) -> Self {
        Self::CommandFailed {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Create a timeout error
    pub fn timeout(command: impl Into<String>, seconds: u64) -> Self {
        Self::Timeout {
            command: command.into(),
            seconds,
        }
    }

    /// Create a permission denied error
    pub fn permission_denied(context: impl Into<String>) -> Self {
        Self::PermissionDenied {
            context: context.into(),
        }
    }

    /// Create a missing prerequisite error
    pub fn missing_prerequisite(tool: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::MissingPrerequisite {
            tool: tool.into(),
            hint: hint.into(),
        }
    }

    /// Create a config not found error
    pub fn config_not_found(path: impl Into<String>) -> Self {
        Self::ConfigNotFound { path: path.into() }
    }

    /// Create an invalid config error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }
}

impl FailureClass for HarnessError {
    fn failure_kind(&self) -> FailureKind {
        match self {
            HarnessError::CommandFailed { .. } => FailureKind::Execution,
            HarnessError::Timeout { .. } => FailureKind::Timeout,
            HarnessError::PermissionDenied { .. } => FailureKind::Permission,
            HarnessError::MissingPrerequisite { .. } => FailureKind::NotFound,
            HarnessError::ConfigNotFound { .. }
            | HarnessError::InvalidConfig { .. }
            | HarnessError::YamlParse(_)
            | HarnessError::Io(_) => FailureKind::Other,
        }
    }
}
