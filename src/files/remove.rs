//! Removal of the local copy after delivery

use crate::error::RemoveError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{error, info, warn};

/// Delete exactly the file at `path`
///
/// # Errors
///
/// - [`RemoveError::NotFound`] if the file is already gone (logged as a warning)
/// - [`RemoveError::PermissionDenied`] if the process may not delete it
/// - [`RemoveError::Failed`] for anything else (e.g. `path` is a directory)
pub async fn remove_file(path: &Path) -> Result<(), RemoveError> {
    use tokio::fs;

    if !fs::try_exists(path).await.unwrap_or(false) {
        warn!(?path, "file not found for deletion");
        return Err(RemoveError::NotFound {
            path: path.to_path_buf(),
        });
    }

    match fs::remove_file(path).await {
        Ok(()) => {
            info!(?path, "deleted file");
            Ok(())
        }
        Err(e) => {
            let err = match e.kind() {
                ErrorKind::NotFound => RemoveError::NotFound {
                    path: path.to_path_buf(),
                },
                ErrorKind::PermissionDenied => RemoveError::PermissionDenied {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
                _ => RemoveError::Failed {
                    path: path.to_path_buf(),
                    reason: e.to_string(),
                },
            };
            error!(?path, error = %err, "failed to delete file");
            Err(err)
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn removes_only_the_given_file() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("label.pdf");
        let sibling = temp_dir.path().join("other.pdf");
        std::fs::write(&target, b"%PDF-1.7").unwrap();
        std::fs::write(&sibling, b"%PDF-1.7").unwrap();

        remove_file(&target).await.unwrap();

        assert!(!target.exists());
        assert!(sibling.exists());
        assert!(temp_dir.path().is_dir());
    }

    #[tokio::test]
    async fn missing_file_is_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = remove_file(&temp_dir.path().join("gone.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, RemoveError::NotFound { .. }));
    }

    #[tokio::test]
    async fn directory_is_not_removed() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("folder.pdf");
        std::fs::create_dir(&dir).unwrap();

        let err = remove_file(&dir).await.unwrap_err();

        assert!(!matches!(err, RemoveError::NotFound { .. }));
        assert!(dir.is_dir());
    }

    // --- permission edge cases (Unix only) ---

    #[cfg(unix)]
    #[tokio::test]
    async fn read_only_directory_is_permission_denied() {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let locked = temp_dir.path().join("locked");
        std::fs::create_dir(&locked).unwrap();
        let target = locked.join("label.pdf");
        std::fs::write(&target, b"%PDF-1.7").unwrap();

        // r-x: entries stay visible, but none can be unlinked
        std::fs::set_permissions(&locked, Permissions::from_mode(0o555)).unwrap();

        // Ensure cleanup happens even if assertions panic
        struct RestorePerms<'a>(&'a Path);
        impl Drop for RestorePerms<'_> {
            fn drop(&mut self) {
                let _ = std::fs::set_permissions(self.0, Permissions::from_mode(0o755));
            }
        }
        let _guard = RestorePerms(&locked);

        if std::fs::write(locked.join("write-check"), b"").is_ok() {
            eprintln!("Skipping: directory permissions are not enforced for this user");
            return;
        }

        let err = remove_file(&target).await.unwrap_err();

        assert!(
            matches!(err, RemoveError::PermissionDenied { ref path, .. } if path == &target),
            "expected PermissionDenied, got {err:?}"
        );
        assert!(target.exists());
    }
}
