//! Utility functions for file matching and human-readable formatting

use chrono::{DateTime, Local, Utc};
use std::path::Path;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Check whether a path carries the given extension
///
/// The comparison is exact unless `ignore_case` is set. Hidden files (leading
/// dot) never match, mirroring shell glob semantics.
///
/// # Examples
///
/// ```
/// use pdf_mailer::utils::matches_extension;
/// use std::path::Path;
///
/// assert!(matches_extension(Path::new("/downloads/label.pdf"), "pdf", false));
/// assert!(!matches_extension(Path::new("LABEL.PDF"), "pdf", false));
/// assert!(matches_extension(Path::new("LABEL.PDF"), "pdf", true));
/// assert!(!matches_extension(Path::new("label.pdf.tmp"), "pdf", false));
/// assert!(!matches_extension(Path::new(".label.pdf"), "pdf", false));
/// ```
#[must_use]
pub fn matches_extension(path: &Path, extension: &str, ignore_case: bool) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    if name.starts_with('.') {
        return false;
    }
    let wanted = extension.trim_start_matches('.');
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| {
            if ignore_case {
                e.eq_ignore_ascii_case(wanted)
            } else {
                e == wanted
            }
        })
}

/// Convert a byte count to megabytes, rounded to two decimals
///
/// # Examples
///
/// ```
/// use pdf_mailer::utils::size_in_mb;
///
/// assert_eq!(size_in_mb(1024 * 1024), 1.0);
/// assert_eq!(size_in_mb(1_572_864), 1.5);
/// assert_eq!(size_in_mb(0), 0.0);
/// ```
#[must_use]
pub fn size_in_mb(bytes: u64) -> f64 {
    let mb = bytes as f64 / BYTES_PER_MB;
    (mb * 100.0).round() / 100.0
}

/// Render a timestamp the way `ctime(3)` does, in local time
///
/// Example output: `Mon Oct 19 14:03:05 2026`.
#[must_use]
pub fn format_ctime(timestamp: &DateTime<Utc>) -> String {
    timestamp
        .with_timezone(&Local)
        .format("%a %b %e %H:%M:%S %Y")
        .to_string()
}

/// Base name of a path as a UTF-8 string (lossy)
#[must_use]
pub fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
