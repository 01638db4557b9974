//! Error types for the Dynalist mirror.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (3=not_found, 4=validation, 6=transport, etc.)
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for mirror operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Not Found (exit 3)
    NotFound,

    // Validation (exit 4)
    InvalidType,
    InvalidArgument,

    // Structure (exit 5)
    CycleDetected,

    // Remote (exit 6)
    TransportError,

    // Config (exit 7)
    MissingSnapshot,
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
            Self::NotFound => "NOT_FOUND",
            Self::InvalidType => "INVALID_TYPE",
            Self::InvalidArgument => "INVALID_ARGUMENT",
            Self::CycleDetected => "CYCLE_DETECTED",
            Self::TransportError => "TRANSPORT_ERROR",
            Self::MissingSnapshot => "MISSING_SNAPSHOT",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code (1-8).
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::NotFound => 3,
            Self::InvalidType | Self::InvalidArgument => 4,
            Self::CycleDetected => 5,
            Self::TransportError => 6,
            Self::MissingSnapshot | Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether retrying the same command may succeed.
    ///
    /// Only remote failures qualify: the service enforces request quotas
    /// and answers with transient errors when they are exceeded.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::TransportError)
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur while mirroring.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Item not found: {id}")]
    NotFound { id: String },

    #[error("Invalid type for {id}: {kind}")]
    InvalidType { id: String, kind: String },

    #[error("Cycle detected at item: {id}")]
    CycleDetected { id: String },

    #[error("Remote error: {0}")]
    Transport(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Settings file not found: {}", path.display())]
    MissingSnapshot { path: PathBuf },

    #[error("API token not found")]
    TokenNotFound,

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
            Self::NotFound { .. } => ErrorCode::NotFound,
            Self::InvalidType { .. } => ErrorCode::InvalidType,
            Self::InvalidArgument(_) => ErrorCode::InvalidArgument,
            Self::CycleDetected { .. } => ErrorCode::CycleDetected,
            Self::Transport(_) | Self::Http(_) => ErrorCode::TransportError,
            Self::MissingSnapshot { .. } => ErrorCode::MissingSnapshot,
            Self::TokenNotFound | Self::Config(_) => ErrorCode::ConfigError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
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
            Self::NotFound { id } => Some(format!(
                "No item with ID '{id}'. Use `dlm list` to see available items."
            )),

            Self::InvalidType { kind, .. } if kind == "document" => {
                Some("Mirroring needs a folder ID, not a document ID.".to_string())
            }

            Self::MissingSnapshot { path } => Some(format!(
                "Run `dlm init <folder-id>` to create {}",
                path.display()
            )),

            Self::TokenNotFound => Some(
                "Pass --token, set DYNALIST_TOKEN, or put the token on the first line of .dynalistrc"
                    .to_string(),
            ),

            Self::Transport(_) | Self::Http(_) => Some(
                "The Dynalist API rate-limits requests; wait a minute and try again.".to_string(),
            ),

            Self::InvalidType { .. }
            | Self::CycleDetected { .. }
            | Self::Io(_)
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
