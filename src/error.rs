//! Error types for pdf-mailer
//!
//! This module provides error handling for every workflow step, including:
//! - Step-specific error types (Directory, Locate, Mail, Remove)
//! - A category mapping onto the workflow's error taxonomy
//! - Stable machine-readable error codes for log consumers

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for pdf-mailer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for pdf-mailer
///
/// Each variant includes contextual information to help diagnose issues. None of
/// these ever reach the harness directly: the orchestrator logs them and reports a
/// binary outcome.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "download_dir")
        key: Option<String>,
    },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Download directory could not be verified or created
    #[error("directory error: {0}")]
    Directory(#[from] DirectoryError),

    /// Candidate discovery failed
    #[error("locate error: {0}")]
    Locate(#[from] LocateError),

    /// Mail composition or delivery failed
    #[error("mail error: {0}")]
    Mail(#[from] MailError),

    /// Local copy could not be removed
    #[error("remove error: {0}")]
    Remove(#[from] RemoveError),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors raised while making sure the download directory exists
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Path exists but is not a directory
    #[error("{path} exists but is not a directory")]
    NotADirectory {
        /// The offending path
        path: PathBuf,
    },

    /// Directory (or one of its parents) could not be created
    #[error("failed to create directory {path}: {reason}")]
    CreateFailed {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying filesystem error
        reason: String,
    },
}

/// Errors raised while looking for the newest matching file
#[derive(Debug, Error)]
pub enum LocateError {
    /// The folder holds no file with the configured extension
    ///
    /// This is a warning-level condition, not a filesystem fault.
    #[error("no .{extension} files found in directory: {dir}")]
    NoMatchingFiles {
        /// The folder that was scanned
        dir: PathBuf,
        /// The extension filter (without the leading dot)
        extension: String,
    },

    /// The folder could not be enumerated
    #[error("failed to read directory {dir}: {reason}")]
    ReadDirFailed {
        /// The folder that was scanned
        dir: PathBuf,
        /// The underlying filesystem error
        reason: String,
    },
}

/// Errors raised while composing or delivering the message
#[derive(Debug, Clone, Error)]
pub enum MailError {
    /// One or more required parameters were empty
    #[error("missing required email parameters: {}", missing.join(", "))]
    MissingParameters {
        /// Names of the parameters that were empty
        missing: Vec<&'static str>,
    },

    /// The attachment does not exist on disk
    #[error("attachment not found: {path}")]
    FileNotFound {
        /// The path that was expected to hold the attachment
        path: PathBuf,
    },

    /// A sender or recipient address could not be parsed
    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress {
        /// The address as supplied
        address: String,
        /// Why parsing failed
        reason: String,
    },

    /// The relay rejected the credential
    #[error("email authentication failed: {0}. Check email credentials.")]
    Authentication(String),

    /// Any other relay-level (SMTP) failure
    #[error("SMTP error occurred: {0}")]
    Transport(String),

    /// Anything that is neither a validation nor a relay failure
    #[error("unexpected error sending email: {0}")]
    Unexpected(String),
}

/// Errors raised while removing the local copy after delivery
#[derive(Debug, Error)]
pub enum RemoveError {
    /// The file was already gone
    #[error("file not found for deletion: {path}")]
    NotFound {
        /// The file that should have been removed
        path: PathBuf,
    },

    /// The process lacks permission to remove the file
    #[error("permission denied deleting {path}: {reason}")]
    PermissionDenied {
        /// The file that could not be removed
        path: PathBuf,
        /// The underlying filesystem error
        reason: String,
    },

    /// Removal failed for another reason
    #[error("error deleting {path}: {reason}")]
    Failed {
        /// The file that could not be removed
        path: PathBuf,
        /// The underlying filesystem error
        reason: String,
    },
}

/// Error taxonomy of the workflow
///
/// Every [`Error`] falls into exactly one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Directory create/list/delete failures
    Filesystem,
    /// No matching file was found (warning, not a fault)
    DiscoveryEmpty,
    /// Missing or malformed workflow parameters
    Validation,
    /// Relay rejected the credential
    Authentication,
    /// Any other relay-level failure
    Transport,
    /// Anything unclassified
    Unexpected,
}

impl Error {
    /// Which taxonomy bucket this error belongs to
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Config { .. } => ErrorCategory::Validation,
            Error::Io(_) | Error::Directory(_) | Error::Remove(_) => ErrorCategory::Filesystem,
            Error::Locate(LocateError::NoMatchingFiles { .. }) => ErrorCategory::DiscoveryEmpty,
            Error::Locate(LocateError::ReadDirFailed { .. }) => ErrorCategory::Filesystem,
            Error::Mail(mail) => match mail {
                MailError::MissingParameters { .. }
                | MailError::FileNotFound { .. }
                | MailError::InvalidAddress { .. } => ErrorCategory::Validation,
                MailError::Authentication(_) => ErrorCategory::Authentication,
                MailError::Transport(_) => ErrorCategory::Transport,
                MailError::Unexpected(_) => ErrorCategory::Unexpected,
            },
            Error::Serialization(_) => ErrorCategory::Unexpected,
        }
    }

    /// Machine-readable error code, stable across releases
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Io(_) => "io_error",
            Error::Directory(DirectoryError::NotADirectory { .. }) => "not_a_directory",
            Error::Directory(DirectoryError::CreateFailed { .. }) => "directory_create_failed",
            Error::Locate(LocateError::NoMatchingFiles { .. }) => "no_matching_files",
            Error::Locate(LocateError::ReadDirFailed { .. }) => "read_dir_failed",
            Error::Mail(MailError::MissingParameters { .. }) => "missing_parameters",
            Error::Mail(MailError::FileNotFound { .. }) => "attachment_not_found",
            Error::Mail(MailError::InvalidAddress { .. }) => "invalid_address",
            Error::Mail(MailError::Authentication(_)) => "authentication_failed",
            Error::Mail(MailError::Transport(_)) => "smtp_error",
            Error::Mail(MailError::Unexpected(_)) => "mail_unexpected",
            Error::Remove(RemoveError::NotFound { .. }) => "delete_not_found",
            Error::Remove(RemoveError::PermissionDenied { .. }) => "delete_permission_denied",
            Error::Remove(RemoveError::Failed { .. }) => "delete_failed",
            Error::Serialization(_) => "serialization_error",
        }
    }
}
