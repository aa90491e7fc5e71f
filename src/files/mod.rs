//! Filesystem steps of the workflow
//!
//! 1. Directory - make sure the download folder exists
//! 2. Locate - find the newest matching file
//! 3. Remove - delete the local copy once it has been mailed

mod directory;
mod locate;
mod remove;

pub use directory::ensure_directory;
pub use locate::{find_latest_file, list_matching_files, select_latest};
pub use remove::remove_file;
