//! Error types for sqlpush.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (4=validation, 6=remote, 7=config, 8=io)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers
//!
//! Only startup failures travel through this type to `main`. Per-file
//! failures during a push are recorded in the run summary instead.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for sqlpush operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Validation (exit 4)
    InvalidArgument,
    InvalidRepository,
    RootNotFound,

    // Remote (exit 6)
    RepositoryUnreachable,
    SyncIncomplete,

    // Config (exit 7)
    MissingToken,
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::InvalidRepository => "INVALID_REPOSITORY",
            Self::RootNotFound => "ROOT_NOT_FOUND",
            Self::RepositoryUnreachable => "REPOSITORY_UNREACHABLE",
            Self::SyncIncomplete => "SYNC_INCOMPLETE",
            Self::MissingToken => "MISSING_TOKEN",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::InvalidArgument | Self::InvalidRepository | Self::RootNotFound => 4,
            Self::RepositoryUnreachable | Self::SyncIncomplete => 6,
            Self::MissingToken | Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether re-running the same command could succeed without changes.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::RepositoryUnreachable | Self::SyncIncomplete)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in sqlpush operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("No GitHub token configured")]
    MissingToken,

    #[error("Invalid repository '{value}': expected OWNER/NAME")]
    InvalidRepository { value: String },

    #[error("Root directory not found: {}", path.display())]
    RootNotFound { path: PathBuf },

    #[error("Failed to connect to repository {repo}: {reason}")]
    RepositoryUnreachable { repo: String, reason: String },

    #[error("{failed} file(s) failed to sync")]
    SyncIncomplete { failed: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::MissingToken => ErrorCode::MissingToken,
            Self::InvalidRepository { .. } => ErrorCode::InvalidRepository,
            Self::RootNotFound { .. } => ErrorCode::RootNotFound,
            Self::RepositoryUnreachable { .. } => ErrorCode::RepositoryUnreachable,
            Self::SyncIncomplete { .. } => ErrorCode::SyncIncomplete,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::MissingToken => Some(
                "Set GITHUB_TOKEN in the environment or a .env file, or pass --token.".to_string(),
            ),
            Self::InvalidRepository { .. } => {
                Some("Pass --repo OWNER/NAME, e.g. --repo octocat/sql-notes".to_string())
            }
            Self::RootNotFound { path } => Some(format!(
                "Check that {} exists and is a directory, or pass --root.",
                path.display()
            )),
            Self::RepositoryUnreachable { .. } => Some(
                "Verify the repository name and that the token has access to it.".to_string(),
            ),
            Self::SyncIncomplete { .. } => {
                Some("Re-run the push; unchanged files are skipped automatically.".to_string())
            }
            Self::Io(_)
            | Self::Json(_)
            | Self::InvalidArgument(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }
}
