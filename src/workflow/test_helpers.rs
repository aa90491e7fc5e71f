//! Shared test helpers for creating PdfMailer instances in tests.

use super::PdfMailer;
use crate::config::Config;
use crate::error::MailError;
use crate::mailer::{MailCredentials, MailTransport, MemoryTransport};
use async_trait::async_trait;
use lettre::Message;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tempfile::{TempDir, tempdir};

/// Helper to create a PdfMailer rooted in a fresh temp dir.
/// Returns the mailer and the tempdir (which must be kept alive).
pub(crate) fn create_test_mailer(transport: Arc<dyn MailTransport>) -> (PdfMailer, TempDir) {
    let temp_dir = tempdir().unwrap();

    let mut config = Config::default();
    config.download.base_dir = Some(temp_dir.path().to_path_buf());

    let mailer = PdfMailer::with_transport(config, transport).unwrap();
    (mailer, temp_dir)
}

/// Write a small PDF-looking file whose mtime is `age` in the past
pub(crate) fn write_pdf(dir: &Path, name: &str, age: Duration) -> PathBuf {
    std::fs::create_dir_all(dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, b"%PDF-1.7\n%test fixture\n").unwrap();
    let file = File::options().write(true).open(&path).unwrap();
    file.set_modified(SystemTime::now() - age).unwrap();
    path
}

/// Transport that panics on every send
pub(crate) struct PanickingTransport;

#[async_trait]
impl MailTransport for PanickingTransport {
    async fn send(&self, _message: Message, _credentials: &MailCredentials) -> Result<(), MailError> {
        panic!("relay client blew up");
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

/// Transport that delivers to memory and then removes `victim` behind the
/// workflow's back, so the delete step finds nothing
pub(crate) struct VanishingTransport {
    pub(crate) inner: MemoryTransport,
    pub(crate) victim: PathBuf,
}

#[async_trait]
impl MailTransport for VanishingTransport {
    async fn send(&self, message: Message, credentials: &MailCredentials) -> Result<(), MailError> {
        self.inner.send(message, credentials).await?;
        std::fs::remove_file(&self.victim).unwrap();
        Ok(())
    }

    fn name(&self) -> &'static str {
        "vanishing"
    }
}

/// Restores a directory to 0o755 when dropped, even if the test panics
#[cfg(unix)]
pub(crate) struct RestorePerms(PathBuf);

#[cfg(unix)]
impl Drop for RestorePerms {
    fn drop(&mut self) {
        use std::os::unix::fs::PermissionsExt;
        let _ = std::fs::set_permissions(&self.0, std::fs::Permissions::from_mode(0o755));
    }
}

/// Make `dir` read-only (0o555) so nothing inside it can be deleted
///
/// Returns `None` when the current user bypasses directory permissions (root),
/// in which case the caller should skip.
#[cfg(unix)]
pub(crate) fn lock_directory(dir: &Path) -> Option<RestorePerms> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(dir, std::fs::Permissions::from_mode(0o555)).unwrap();
    let guard = RestorePerms(dir.to_path_buf());
    let check = dir.join("write-check");
    if std::fs::write(&check, b"").is_ok() {
        let _ = std::fs::remove_file(&check);
        return None;
    }
    Some(guard)
}
