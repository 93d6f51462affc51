//! Domain-specific error types and error handling utilities.
//!
//! This module defines [`ExplorerError`] which covers every failure the explorer can
//! surface. It uses `thiserror` for ergonomic error definitions and sorts each variant
//! into one of the recoverable classes the controller reports to the user.
//!
//! # Public API
//! - [`ExplorerError`]: Main error enum covering all failure modes
//! - [`Precondition`]: Why an action was refused before any request was issued
//! - [`ErrorClass`]: Coarse classification used for notifications
//! - [`Result<T>`]: Type alias for `std::result::Result<T, ExplorerError>`
//!
//! # Error Categories
//! - **Transport**: the request never completed (connect, timeout, undecodable body)
//! - **Backend**: the request completed but the backend reported a failure
//! - **Precondition**: the action was invalid for the current listing; nothing was sent
//! - **Local**: configuration and other process-local failures

use crate::core::vcs_status::VcsStatus;
use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for git-explorer
#[derive(Error, Debug)]
pub enum ExplorerError {
    // Request errors
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Backend error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
    Backend {
        status: Option<u16>,
        message: String,
    },

    #[error("Action refused: {0}")]
    Precondition(#[from] Precondition),

    // Local git errors (local backend)
    #[error("Git repository error: {0}")]
    Git(#[from] git2::Error),

    #[error("Invalid UTF-8 path: {path}")]
    InvalidUtf8Path { path: PathBuf },

    // Configuration errors
    #[error("Could not find config directory")]
    ConfigDirectoryNotFound,

    #[error("Failed to read config file '{path}': {source}")]
    ConfigReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ConfigParseFailed {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Reasons an action is refused before it reaches the backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Precondition {
    #[error("'{name}' is not in the current listing")]
    EntryNotFound { name: String },

    #[error("cannot {action} '{name}' while it is {status}")]
    InvalidStatus {
        action: &'static str,
        name: String,
        status: VcsStatus,
    },

    #[error("directory is already under version control")]
    NotPlainDirectory,

    #[error("commit message is empty")]
    EmptyCommitMessage,

    #[error("no staged entries to commit")]
    NothingStaged,

    #[error("new name is empty")]
    EmptyName,

    #[error("new name '{name}' is not a valid entry name")]
    InvalidName { name: String },

    #[error("'{name}' is already present in this directory")]
    NameTaken { name: String },
}

/// Coarse error classes reported to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    Transport,
    Backend,
    Precondition,
    Local,
}

/// Convenience type alias for Results using ExplorerError
pub type Result<T> = std::result::Result<T, ExplorerError>;

impl ExplorerError {
    /// Create a transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Create a backend-reported failure
    pub fn backend(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Backend {
            status,
            message: message.into(),
        }
    }

    /// Create an invalid status precondition error
    pub fn invalid_status(action: &'static str, name: impl Into<String>, status: VcsStatus) -> Self {
        Self::Precondition(Precondition::InvalidStatus {
            action,
            name: name.into(),
            status,
        })
    }

    /// Create an entry not found precondition error
    pub fn entry_not_found(name: impl Into<String>) -> Self {
        Self::Precondition(Precondition::EntryNotFound { name: name.into() })
    }

    /// Create a config read failed error
    pub fn config_read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::ConfigReadFailed {
            path: path.into(),
            source,
        }
    }

    /// Create a config parse failed error
    pub fn config_parse_failed(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::ConfigParseFailed {
            path: path.into(),
            source,
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::Transport(_) => ErrorClass::Transport,
            Self::Backend { .. } | Self::Git(_) | Self::InvalidUtf8Path { .. } => ErrorClass::Backend,
            Self::Precondition(_) => ErrorClass::Precondition,
            Self::ConfigDirectoryNotFound
            | Self::ConfigReadFailed { .. }
            | Self::ConfigParseFailed { .. }
            | Self::Io(_)
            | Self::Json(_) => ErrorClass::Local,
        }
    }

    /// Transport, backend and precondition failures leave the session usable.
    pub fn is_recoverable(&self) -> bool {
        self.class() != ErrorClass::Local
    }
}

impl From<reqwest::Error> for ExplorerError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_error_display_with_status() {
        let err = ExplorerError::backend(Some(400), "The directory is not a valid git repository");
        assert_eq!(
            err.to_string(),
            "Backend error (400): The directory is not a valid git repository"
        );
    }

    #[test]
    fn test_backend_error_display_without_status() {
        let err = ExplorerError::backend(None, "index locked");
        assert_eq!(err.to_string(), "Backend error: index locked");
    }

    #[test]
    fn test_precondition_display() {
        let err = ExplorerError::invalid_status("stage", "a.txt", VcsStatus::Committed);
        assert_eq!(
            err.to_string(),
            "Action refused: cannot stage 'a.txt' while it is committed"
        );
    }

    #[test]
    fn test_error_classes() {
        assert_eq!(ExplorerError::transport("refused").class(), ErrorClass::Transport);
        assert_eq!(ExplorerError::backend(Some(500), "x").class(), ErrorClass::Backend);
        assert_eq!(
            ExplorerError::from(Precondition::EmptyCommitMessage).class(),
            ErrorClass::Precondition
        );
        assert_eq!(ExplorerError::ConfigDirectoryNotFound.class(), ErrorClass::Local);
    }

    #[test]
    fn test_recoverable_classes() {
        assert!(ExplorerError::transport("timeout").is_recoverable());
        assert!(ExplorerError::backend(None, "x").is_recoverable());
        assert!(ExplorerError::entry_not_found("gone.txt").is_recoverable());
        assert!(!ExplorerError::ConfigDirectoryNotFound.is_recoverable());
    }

    #[test]
    fn test_config_parse_failed() {
        let path = std::path::PathBuf::from("/test/config.json");
        let json_err = serde_json::from_str::<serde_json::Value>("{ invalid json").unwrap_err();
        let err = ExplorerError::config_parse_failed(&path, json_err);
        assert!(err.to_string().contains("/test/config.json"));
        assert!(err.to_string().contains("Failed to parse"));
    }
}
