//! Download directory verification

use crate::error::DirectoryError;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, error, info};

/// Make sure `path` exists as a directory, creating it and any missing parents
///
/// Returns `Ok(true)` when the directory had to be created and `Ok(false)` when it
/// was already there.
///
/// # Errors
///
/// - [`DirectoryError::NotADirectory`] if something other than a directory sits at `path`
/// - [`DirectoryError::CreateFailed`] for permission problems, invalid paths, etc.
pub async fn ensure_directory(path: &Path) -> Result<bool, DirectoryError> {
    use tokio::fs;

    match fs::metadata(path).await {
        Ok(meta) if meta.is_dir() => {
            debug!(?path, "download directory exists");
            return Ok(false);
        }
        Ok(_) => {
            error!(?path, "download path exists but is not a directory");
            return Err(DirectoryError::NotADirectory {
                path: path.to_path_buf(),
            });
        }
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => {
            // stat failed for another reason; let create_dir_all report the real cause
            debug!(?path, error = %e, "could not stat download directory");
        }
    }

    match fs::create_dir_all(path).await {
        Ok(()) => {
            info!(?path, "created download directory");
            Ok(true)
        }
        Err(e) => {
            error!(?path, error = %e, "failed to create download directory");
            Err(DirectoryError::CreateFailed {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })
        }
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn creates_missing_directory_with_parents() {
        let temp_dir = TempDir::new().unwrap();
        let target = temp_dir.path().join("a").join("b").join("downloads");
        assert!(!target.exists());

        let created = ensure_directory(&target).await.unwrap();

        assert!(created);
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn existing_directory_is_left_alone() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("keep.pdf"), b"%PDF").unwrap();

        let created = ensure_directory(temp_dir.path()).await.unwrap();

        assert!(!created);
        assert!(temp_dir.path().join("keep.pdf").exists());
    }

    #[tokio::test]
    async fn file_in_the_way_is_not_a_directory() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("downloads");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let err = ensure_directory(&blocker).await.unwrap_err();

        assert!(matches!(err, DirectoryError::NotADirectory { .. }));
    }

    #[tokio::test]
    async fn file_as_parent_fails_to_create() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, b"not a dir").unwrap();

        let err = ensure_directory(&blocker.join("child")).await.unwrap_err();

        assert!(matches!(err, DirectoryError::CreateFailed { .. }));
        assert!(!blocker.join("child").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn read_only_parent_fails_to_create() {
        use std::fs::Permissions;
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let parent = temp_dir.path().join("readonly");
        std::fs::create_dir(&parent).unwrap();
        std::fs::set_permissions(&parent, Permissions::from_mode(0o555)).unwrap();

        struct RestorePerms<'a>(&'a Path);
        impl Drop for RestorePerms<'_> {
            fn drop(&mut self) {
                let _ = std::fs::set_permissions(self.0, Permissions::from_mode(0o755));
            }
        }
        let _guard = RestorePerms(&parent);

        if std::fs::write(parent.join("write-check"), b"").is_ok() {
            eprintln!("Skipping: directory permissions are not enforced for this user");
            return;
        }

        let err = ensure_directory(&parent.join("downloads")).await.unwrap_err();

        match err {
            DirectoryError::CreateFailed { path, reason } => {
                assert_eq!(path, parent.join("downloads"));
                assert!(!reason.is_empty());
            }
            other => panic!("expected CreateFailed, got {other:?}"),
        }
    }
}
