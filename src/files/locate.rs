//! Latest-file discovery

use crate::error::LocateError;
use crate::types::CandidateFile;
use crate::utils::{file_name_of, matches_extension, size_in_mb};
use chrono::{DateTime, Utc};
use std::path::Path;
use tracing::{debug, error, info, warn};

/// List every regular file in `dir` (non-recursive) whose extension matches
///
/// Subdirectories, hidden files and non-matching files are skipped. Symlinks are
/// followed. The result is sorted by file name. With `ignore_case` the extension
/// comparison ignores ASCII case.
///
/// # Errors
///
/// Returns [`LocateError::ReadDirFailed`] if the directory cannot be enumerated.
pub async fn list_matching_files(
    dir: &Path,
    extension: &str,
    ignore_case: bool,
) -> Result<Vec<CandidateFile>, LocateError> {
    use tokio::fs;

    let read_failed = |e: std::io::Error| LocateError::ReadDirFailed {
        dir: dir.to_path_buf(),
        reason: e.to_string(),
    };

    let mut entries = fs::read_dir(dir).await.map_err(read_failed)?;
    let mut candidates = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(read_failed)? {
        let path = entry.path();
        if !matches_extension(&path, extension, ignore_case) {
            continue;
        }

        let metadata = match fs::metadata(&path).await {
            Ok(m) => m,
            Err(e) => {
                debug!(?path, error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !metadata.is_file() {
            continue;
        }

        let modified = match metadata.modified() {
            Ok(t) => DateTime::<Utc>::from(t),
            Err(e) => {
                warn!(?path, error = %e, "modification time unavailable, skipping");
                continue;
            }
        };

        candidates.push(CandidateFile {
            file_name: file_name_of(&path),
            path,
            size_bytes: metadata.len(),
            modified,
        });
    }

    candidates.sort_by(|a, b| a.file_name.cmp(&b.file_name));
    Ok(candidates)
}

/// Pick the most recently modified candidate
///
/// Equal timestamps are broken by file name: the lexically smallest name wins.
#[must_use]
pub fn select_latest(candidates: Vec<CandidateFile>) -> Option<CandidateFile> {
    candidates.into_iter().max_by(|a, b| {
        a.modified
            .cmp(&b.modified)
            .then_with(|| b.file_name.cmp(&a.file_name))
    })
}

/// Find the newest matching file in `dir`
///
/// # Errors
///
/// - [`LocateError::NoMatchingFiles`] if nothing matches (logged as a warning)
/// - [`LocateError::ReadDirFailed`] if the directory cannot be enumerated
pub async fn find_latest_file(
    dir: &Path,
    extension: &str,
    ignore_case: bool,
) -> Result<CandidateFile, LocateError> {
    let candidates = match list_matching_files(dir, extension, ignore_case).await {
        Ok(candidates) => candidates,
        Err(e) => {
            error!(?dir, error = %e, "error finding latest file");
            return Err(e);
        }
    };

    let Some(latest) = select_latest(candidates) else {
        warn!(?dir, extension, "no matching files found");
        return Err(LocateError::NoMatchingFiles {
            dir: dir.to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        });
    };

    info!(
        file = %latest.file_name,
        size_mb = size_in_mb(latest.size_bytes),
        "found latest file"
    );
    Ok(latest)
}
