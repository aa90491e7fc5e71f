//! Validated send of one file to one recipient

use super::message::compose_message;
use super::traits::{MailCredentials, MailTransport};
use crate::error::MailError;
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

/// Composes and delivers the attachment message over a [`MailTransport`]
#[derive(Clone)]
pub struct MailDispatcher {
    transport: Arc<dyn MailTransport>,
    subject: String,
}

impl MailDispatcher {
    /// Create a dispatcher using `transport` and a fixed `subject`
    pub fn new(transport: Arc<dyn MailTransport>, subject: impl Into<String>) -> Self {
        Self {
            transport,
            subject: subject.into(),
        }
    }

    /// Mail `file` from `sender` to `recipient`, logging in with `sender` + `credential`
    ///
    /// Inputs are validated before anything touches the network: every parameter
    /// must be non-blank and the file must exist.
    ///
    /// # Errors
    ///
    /// - [`MailError::MissingParameters`] if any parameter is blank
    /// - [`MailError::FileNotFound`] if `file` does not exist
    /// - [`MailError::InvalidAddress`] if an address cannot be parsed
    /// - [`MailError::Authentication`] / [`MailError::Transport`] from the relay
    /// - [`MailError::Unexpected`] for anything else
    pub async fn dispatch(
        &self,
        file: &Path,
        sender: &str,
        recipient: &str,
        credential: &str,
    ) -> Result<(), MailError> {
        let result = self.try_dispatch(file, sender, recipient, credential).await;
        if let Err(e) = &result {
            error!(error = %e, ?file, "email sending failed");
        }
        result
    }

    async fn try_dispatch(
        &self,
        file: &Path,
        sender: &str,
        recipient: &str,
        credential: &str,
    ) -> Result<(), MailError> {
        let missing: Vec<&'static str> = [
            ("file_path", file.as_os_str().is_empty()),
            ("sender", sender.trim().is_empty()),
            ("recipient", recipient.trim().is_empty()),
            ("credential", credential.is_empty()),
        ]
        .into_iter()
        .filter_map(|(name, blank)| blank.then_some(name))
        .collect();
        if !missing.is_empty() {
            return Err(MailError::MissingParameters { missing });
        }

        if !tokio::fs::try_exists(file).await.unwrap_or(false) {
            return Err(MailError::FileNotFound {
                path: file.to_path_buf(),
            });
        }

        info!(?file, "attaching file to email");
        let message = compose_message(file, sender, recipient, &self.subject).await?;

        info!(transport = self.transport.name(), "sending email");
        let credentials = MailCredentials::new(sender.trim(), credential);
        self.transport.send(message, &credentials).await?;

        info!(recipient, "email sent successfully");
        Ok(())
    }
}

impl std::fmt::Debug for MailDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailDispatcher")
            .field("transport", &self.transport.name())
            .field("subject", &self.subject)
            .finish()
    }
}
