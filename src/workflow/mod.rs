//! Workflow orchestrator (decomposed into focused submodules)
//!
//! [`PdfMailer`] owns the download folder setting and runs the four-step
//! workflow: ensure directory, locate newest file, mail it, delete it.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::mailer::{MailDispatcher, MailTransport, SmtpRelay};
use crate::types::Event;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::broadcast;

mod folder;
mod run;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
pub(crate) mod test_helpers;

/// Runs the PDF email workflow against one download folder
///
/// The folder setting is plain owned state: changing it needs `&mut self`, and
/// runs never overlap because each one is awaited to completion by its caller.
pub struct PdfMailer {
    /// Static configuration
    pub(crate) config: Config,
    /// Directory that folder names resolve against
    pub(crate) base_dir: PathBuf,
    /// Current download folder (absolute when `base_dir` is)
    pub(crate) download_dir: PathBuf,
    /// Composes and delivers messages
    pub(crate) dispatcher: MailDispatcher,
    /// Event channel for checkpoint notifications
    pub(crate) event_tx: broadcast::Sender<Event>,
}

impl PdfMailer {
    /// Create a mailer that delivers through the configured SMTP relay
    ///
    /// Relative folder names resolve against `config.download.base_dir`, or the
    /// process working directory when that is unset. The folder is not created
    /// here; the first workflow run or [`set_download_folder`](Self::set_download_folder)
    /// takes care of it.
    pub fn new(config: Config) -> Result<Self> {
        let transport = Arc::new(SmtpRelay::new(&config.mail));
        Self::with_transport(config, transport)
    }

    /// Create a mailer that delivers through `transport`
    pub fn with_transport(config: Config, transport: Arc<dyn MailTransport>) -> Result<Self> {
        if config.download.extension.trim_start_matches('.').is_empty() {
            return Err(Error::Config {
                message: "file extension cannot be empty".to_string(),
                key: Some("extension".to_string()),
            });
        }
        if config.download.download_dir.as_os_str().is_empty() {
            return Err(Error::Config {
                message: "download folder cannot be empty".to_string(),
                key: Some("download_dir".to_string()),
            });
        }

        let base_dir = match &config.download.base_dir {
            Some(dir) => dir.clone(),
            None => std::env::current_dir()?,
        };
        let download_dir = base_dir.join(&config.download.download_dir);

        let (event_tx, _rx) = broadcast::channel(64);

        let dispatcher = MailDispatcher::new(transport, config.mail.subject.clone());

        Ok(Self {
            config,
            base_dir,
            download_dir,
            dispatcher,
            event_tx,
        })
    }

    /// Subscribe to workflow events
    ///
    /// Events emitted before the call are not replayed.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Directory that folder names resolve against
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Static configuration this mailer was built with
    pub fn config(&self) -> &Config {
        &self.config
    }

    pub(crate) fn emit(&self, event: Event) {
        // No subscribers is fine
        self.event_tx.send(event).ok();
    }
}

impl std::fmt::Debug for PdfMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfMailer")
            .field("download_dir", &self.download_dir)
            .field("extension", &self.config.download.extension)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
