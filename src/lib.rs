//! # pdf-mailer
//!
//! Mails the most recently produced PDF in a download folder to a fixed recipient
//! and removes the local copy once the relay has accepted it.
//!
//! ## Design Philosophy
//!
//! pdf-mailer is designed to be:
//! - **Embedded** - Called as one step of a larger automation harness; no CLI
//! - **Binary to the caller** - Every operation answers `SUCCESS` or `FAILURE`
//! - **Loud in the log** - Diagnostic detail goes to `tracing` and the event stream
//! - **Careful with files** - A file is only deleted after it was delivered
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdf_mailer::{Config, Outcome, PdfMailer};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut mailer = PdfMailer::new(Config::default())?;
//!
//!     // Optional: use another folder, relative to the working directory
//!     assert_eq!(mailer.set_download_folder("downloads").await, Outcome::Success);
//!
//!     // Subscribe to events
//!     let mut events = mailer.subscribe();
//!     tokio::spawn(async move {
//!         while let Ok(event) = events.recv().await {
//!             println!("Event: {:?}", event);
//!         }
//!     });
//!
//!     let outcome = mailer
//!         .process_workflow("robot@example.com", "office@example.com", "app-password")
//!         .await;
//!     println!("{outcome}");
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// Filesystem steps (directory, discovery, removal)
pub mod files;
/// Mail composition and transports
pub mod mailer;
/// Core types and events
pub mod types;
/// Utility functions
pub mod utils;
/// Workflow orchestrator
pub mod workflow;

// Re-export commonly used types
pub use config::{Config, DownloadConfig, MailConfig};
pub use error::{
    DirectoryError, Error, ErrorCategory, LocateError, MailError, RemoveError, Result,
};
pub use mailer::{MailCredentials, MailDispatcher, MailTransport, MemoryTransport, SmtpRelay};
pub use types::{CandidateFile, Event, Outcome, Stage, WorkflowReport};
pub use workflow::PdfMailer;
