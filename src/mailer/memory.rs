//! In-memory transport for dry runs and tests

use super::traits::{MailCredentials, MailTransport};
use crate::error::MailError;
use async_trait::async_trait;
use lettre::Message;
use std::sync::{Mutex, PoisonError};

/// A message captured by [`MemoryTransport`]
#[derive(Clone, Debug)]
pub struct SentMail {
    /// Envelope sender
    pub from: Option<String>,
    /// Envelope recipients
    pub to: Vec<String>,
    /// Login name used for the session
    pub username: String,
    /// Full RFC 5322 message as it would go on the wire
    pub raw: Vec<u8>,
}

impl SentMail {
    /// The raw message as (lossy) UTF-8 text
    pub fn raw_text(&self) -> String {
        String::from_utf8_lossy(&self.raw).into_owned()
    }
}

/// Transport that keeps every message in memory instead of contacting a relay
///
/// It can be scripted to reject credentials or to fail every send, which makes
/// it the stand-in for a real relay when exercising the workflow.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    sent: Mutex<Vec<SentMail>>,
    accepted_secret: Option<String>,
    failure: Option<MailError>,
}

impl MemoryTransport {
    /// Accept every message
    pub fn new() -> Self {
        Self::default()
    }

    /// Only accept sessions that log in with `secret`
    ///
    /// Any other secret fails with [`MailError::Authentication`], the way a relay
    /// answers `535`.
    pub fn with_accepted_secret(secret: impl Into<String>) -> Self {
        Self {
            accepted_secret: Some(secret.into()),
            ..Self::default()
        }
    }

    /// Fail every send with `error`
    pub fn failing(error: MailError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    /// Messages delivered so far
    pub fn sent(&self) -> Vec<SentMail> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait]
impl MailTransport for MemoryTransport {
    async fn send(
        &self,
        message: Message,
        credentials: &MailCredentials,
    ) -> Result<(), MailError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        if let Some(expected) = &self.accepted_secret
            && expected != &credentials.secret
        {
            return Err(MailError::Authentication(
                "535 5.7.8 Username and Password not accepted".to_string(),
            ));
        }

        let envelope = message.envelope();
        let mail = SentMail {
            from: envelope.from().map(ToString::to_string),
            to: envelope.to().iter().map(ToString::to_string).collect(),
            username: credentials.username.clone(),
            raw: message.formatted(),
        };
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(mail);
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
