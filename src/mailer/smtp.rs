//! SMTP relay transport (STARTTLS + credential login)

use super::traits::{MailCredentials, MailTransport};
use crate::config::MailConfig;
use crate::error::MailError;
use async_trait::async_trait;
use lettre::transport::smtp;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use std::time::Duration;
use tracing::debug;

/// Reply codes a relay uses to refuse a login
///
/// 530 authentication required, 534 mechanism too weak, 535 credentials invalid.
const AUTH_FAILURE_CODES: &[&str] = &["530", "534", "535"];

/// Whether an SMTP reply code means the credential was rejected
///
/// # Examples
///
/// ```
/// use pdf_mailer::mailer::is_auth_failure_code;
///
/// assert!(is_auth_failure_code("535"));
/// assert!(!is_auth_failure_code("550"));
/// ```
#[must_use]
pub fn is_auth_failure_code(code: &str) -> bool {
    AUTH_FAILURE_CODES.contains(&code)
}

fn classify(err: smtp::Error) -> MailError {
    let code = err.status().map(|c| c.to_string());
    match code.as_deref() {
        Some(c) if is_auth_failure_code(c) => MailError::Authentication(err.to_string()),
        _ => MailError::Transport(err.to_string()),
    }
}

/// Transport that submits messages to a mail relay
///
/// Every call opens its own session: connect, STARTTLS, login, send, QUIT.
/// No connection is pooled between calls.
#[derive(Clone, Debug)]
pub struct SmtpRelay {
    host: String,
    port: u16,
    timeout: Option<Duration>,
}

impl SmtpRelay {
    /// Create a relay transport from the mail configuration
    pub fn new(config: &MailConfig) -> Self {
        Self {
            host: config.relay_host.clone(),
            port: config.relay_port,
            timeout: config.timeout,
        }
    }

    /// Build the client for one session
    ///
    /// lettre's own connect timeout stays in place unless one is configured.
    fn client(
        &self,
        credentials: &MailCredentials,
    ) -> Result<AsyncSmtpTransport<Tokio1Executor>, MailError> {
        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.host)
            .map_err(classify)?
            .port(self.port)
            .credentials(Credentials::new(
                credentials.username.clone(),
                credentials.secret.clone(),
            ));
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(Some(timeout));
        }
        Ok(builder.build())
    }
}

#[async_trait]
impl MailTransport for SmtpRelay {
    async fn send(
        &self,
        message: Message,
        credentials: &MailCredentials,
    ) -> Result<(), MailError> {
        let transport = self.client(credentials)?;

        debug!(
            host = %self.host,
            port = self.port,
            timeout_secs = self.timeout.map(|t| t.as_secs()),
            "connecting to SMTP relay"
        );
        let response = transport.send(message).await.map_err(classify)?;
        debug!(code = %response.code(), "relay accepted message");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "smtp"
    }
}
