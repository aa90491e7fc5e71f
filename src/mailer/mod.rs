//! Mail composition and delivery
//!
//! [`MailDispatcher`] validates inputs, builds the message and hands it to a
//! [`MailTransport`]. [`SmtpRelay`] is the production transport;
//! [`MemoryTransport`] keeps messages in memory for dry runs and tests.

mod dispatch;
mod memory;
mod message;
mod smtp;
mod traits;

pub use dispatch::MailDispatcher;
pub use memory::{MemoryTransport, SentMail};
pub use message::{compose_message, render_body};
pub use smtp::{SmtpRelay, is_auth_failure_code};
pub use traits::{MailCredentials, MailTransport};
