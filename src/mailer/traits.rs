//! Transport seam for mail delivery

use crate::error::MailError;
use async_trait::async_trait;
use lettre::Message;

/// Login used for one transport session
///
/// The secret is never printed by `Debug`.
#[derive(Clone)]
pub struct MailCredentials {
    /// Login name, normally the sender address
    pub username: String,
    /// Password or app password
    pub secret: String,
}

impl MailCredentials {
    /// Create credentials from a login name and secret
    pub fn new(username: impl Into<String>, secret: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            secret: secret.into(),
        }
    }
}

impl std::fmt::Debug for MailCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailCredentials")
            .field("username", &self.username)
            .field("secret", &"<redacted>")
            .finish()
    }
}

/// Trait for delivering a composed message
///
/// Implementations open one session per call, authenticate, send and close.
/// They never retry: a failed attempt is final for that call.
///
/// # Examples
///
/// ```
/// use pdf_mailer::mailer::{MailCredentials, MailTransport, MemoryTransport};
/// use lettre::Message;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = MemoryTransport::new();
/// let message = Message::builder()
///     .from("robot@example.com".parse()?)
///     .to("office@example.com".parse()?)
///     .subject("hello")
///     .body(String::from("hi"))?;
///
/// transport
///     .send(message, &MailCredentials::new("robot@example.com", "secret"))
///     .await?;
/// assert_eq!(transport.sent().len(), 1);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait MailTransport: Send + Sync {
    /// Deliver `message` using `credentials`
    ///
    /// # Errors
    ///
    /// - [`MailError::Authentication`] if the relay rejects the credential
    /// - [`MailError::Transport`] for any other relay-level failure
    /// - [`MailError::Unexpected`] for failures outside the protocol
    async fn send(&self, message: Message, credentials: &MailCredentials)
    -> Result<(), MailError>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
