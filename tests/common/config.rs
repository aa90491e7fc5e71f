//! Test configuration helpers for loading .env credentials and creating test mailers

use pdf_mailer::{Config, MailTransport, PdfMailer};
use std::sync::Arc;
use tempfile::TempDir;

/// Error type for test configuration
#[derive(Debug)]
pub struct ConfigError(pub String);

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Config error: {}", self.0)
    }
}

impl std::error::Error for ConfigError {}

/// Addresses and secret for a live relay session
pub struct LiveCredentials {
    pub sender: String,
    pub receiver: String,
    pub secret: String,
}

/// Load live SMTP credentials from environment variables
///
/// Required environment variables:
/// - `SMTP_SENDER` - Sender address, also the login name
/// - `SMTP_RECEIVER` - Recipient address
/// - `SMTP_PASSWORD` - Password or app password
///
/// Optional environment variables:
/// - `SMTP_HOST` - Relay hostname (default: smtp.gmail.com)
/// - `SMTP_PORT` - Relay submission port (default: 587)
pub fn load_live_credentials() -> Result<(Config, LiveCredentials), ConfigError> {
    dotenvy::dotenv().ok();

    let var = |name: &str| {
        std::env::var(name).map_err(|_| ConfigError(format!("{name} not set in environment")))
    };

    let credentials = LiveCredentials {
        sender: var("SMTP_SENDER")?,
        receiver: var("SMTP_RECEIVER")?,
        secret: var("SMTP_PASSWORD")?,
    };

    let mut config = Config::default();
    if let Ok(host) = std::env::var("SMTP_HOST") {
        config.mail.relay_host = host;
    }
    if let Some(port) = std::env::var("SMTP_PORT").ok().and_then(|p| p.parse().ok()) {
        config.mail.relay_port = port;
    }

    Ok((config, credentials))
}

/// Check whether live credentials are available
pub fn has_live_credentials() -> bool {
    load_live_credentials().is_ok()
}

/// Config rooted in `temp_dir` instead of the process working directory
pub fn temp_config(temp_dir: &TempDir) -> Config {
    let mut config = Config::default();
    config.download.base_dir = Some(temp_dir.path().to_path_buf());
    config
}

/// Create a PdfMailer rooted in a fresh temp dir that delivers through `transport`
///
/// Returns the mailer and temp directory (keep temp_dir alive for test duration)
pub fn create_test_mailer(transport: Arc<dyn MailTransport>) -> (PdfMailer, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let mailer = PdfMailer::with_transport(temp_config(&temp_dir), transport).unwrap();
    (mailer, temp_dir)
}
