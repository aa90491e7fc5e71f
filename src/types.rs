//! Core types and events for pdf-mailer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Terminal result handed back to the harness
///
/// Rendered as `"SUCCESS"` / `"FAILURE"`; diagnostic detail lives in the log
/// stream, never here.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    /// The operation achieved its primary objective
    Success,
    /// The operation failed; see the log for details
    Failure,
}

impl Outcome {
    /// Wire form expected by the harness
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "SUCCESS",
            Outcome::Failure => "FAILURE",
        }
    }

    /// True for [`Outcome::Success`]
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<bool> for Outcome {
    fn from(ok: bool) -> Self {
        if ok { Outcome::Success } else { Outcome::Failure }
    }
}

/// Workflow stage
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Verify or create the download folder
    EnsureDir,
    /// Find the newest matching file
    Locate,
    /// Mail the file
    Send,
    /// Remove the local copy
    Delete,
}

impl Stage {
    /// Position in the workflow, starting at 1
    pub fn step_number(&self) -> u8 {
        match self {
            Stage::EnsureDir => 1,
            Stage::Locate => 2,
            Stage::Send => 3,
            Stage::Delete => 4,
        }
    }

    /// Human-readable progress label
    pub fn label(&self) -> &'static str {
        match self {
            Stage::EnsureDir => "verifying download directory",
            Stage::Locate => "searching for latest file",
            Stage::Send => "sending file via email",
            Stage::Delete => "deleting file after successful email",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::EnsureDir => "ensure_dir",
            Stage::Locate => "locate",
            Stage::Send => "send",
            Stage::Delete => "delete",
        };
        f.write_str(name)
    }
}

/// A matching file discovered during a scan
///
/// Recomputed on every scan, never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFile {
    /// Full path to the file
    pub path: PathBuf,
    /// Base name of the file
    pub file_name: String,
    /// Size in bytes
    pub size_bytes: u64,
    /// Last modification time
    pub modified: DateTime<Utc>,
}

/// Detailed result of one workflow run
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct WorkflowReport {
    /// Terminal outcome
    pub outcome: Outcome,
    /// Last stage that was entered
    pub stage: Stage,
    /// The file that was selected, if discovery got that far
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<CandidateFile>,
    /// Whether the local copy was removed after delivery
    pub deleted: bool,
    /// Wall-clock duration of the run
    #[serde(with = "duration_millis")]
    pub duration: Duration,
}

/// Event emitted at workflow checkpoints
///
/// Subscribe with [`PdfMailer::subscribe`](crate::PdfMailer::subscribe).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A workflow run began
    WorkflowStarted {
        /// Folder being processed
        folder: PathBuf,
    },

    /// A stage began
    StageStarted {
        /// The stage
        stage: Stage,
    },

    /// The download folder did not exist and was created
    DirectoryCreated {
        /// The created folder
        path: PathBuf,
    },

    /// A candidate file was selected
    CandidateFound {
        /// Base name of the file
        file_name: String,
        /// Size in bytes
        size_bytes: u64,
    },

    /// The folder held no matching file
    NoCandidate {
        /// Folder that was scanned
        folder: PathBuf,
    },

    /// The message was accepted by the relay
    MailSent {
        /// Recipient address
        recipient: String,
        /// Attached file name
        file_name: String,
    },

    /// Delivery failed; the file is kept
    MailFailed {
        /// Error message
        error: String,
    },

    /// The local copy was removed
    FileDeleted {
        /// The removed file
        path: PathBuf,
    },

    /// The local copy could not be removed (non-fatal)
    DeleteFailed {
        /// The file that was kept
        path: PathBuf,
        /// Error message
        error: String,
        /// Machine-readable code, e.g. `delete_permission_denied`
        error_code: String,
    },

    /// Workflow finished with SUCCESS
    WorkflowCompleted {
        /// Processed file name
        file_name: String,
        /// Recipient address
        recipient: String,
        /// Run duration in milliseconds
        duration_ms: u64,
    },

    /// Workflow finished with FAILURE
    WorkflowFailed {
        /// Stage at which the run stopped
        stage: Stage,
        /// Error message
        error: String,
        /// Run duration in milliseconds
        duration_ms: u64,
    },

    /// The download folder setting changed
    FolderChanged {
        /// Previous folder
        from: PathBuf,
        /// New folder
        to: PathBuf,
    },
}

// Duration as whole milliseconds
mod duration_millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(u64::try_from(duration.as_millis()).unwrap_or(u64::MAX))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}
