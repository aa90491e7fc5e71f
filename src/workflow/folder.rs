//! Download folder configuration and inspection

use super::PdfMailer;
use crate::files::{ensure_directory, list_matching_files};
use crate::types::{Event, Outcome};
use crate::utils::size_in_mb;
use std::path::Path;
use tracing::{error, info};

impl PdfMailer {
    /// Current download folder
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdf_mailer::{Config, PdfMailer};
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mailer = PdfMailer::new(Config::default())?;
    /// assert!(mailer.download_folder().ends_with("downloads"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn download_folder(&self) -> &Path {
        &self.download_dir
    }

    /// Point the workflow at another folder, relative to [`base_dir`](Self::base_dir)
    ///
    /// The name is trimmed and must not be blank. The folder is created if
    /// missing; if that fails the previous folder is restored.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdf_mailer::{Config, Outcome, PdfMailer};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mut mailer = PdfMailer::new(Config::default())?;
    /// assert_eq!(mailer.set_download_folder("labels").await, Outcome::Success);
    /// assert!(mailer.download_folder().ends_with("labels"));
    ///
    /// // Blank names are rejected and leave the folder unchanged
    /// assert_eq!(mailer.set_download_folder("   ").await, Outcome::Failure);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn set_download_folder(&mut self, name: &str) -> Outcome {
        info!(folder = name, "setting download folder");

        let name = name.trim();
        if name.is_empty() {
            error!("folder name cannot be empty");
            return Outcome::Failure;
        }

        let candidate = self.base_dir.join(name);
        let previous = std::mem::replace(&mut self.download_dir, candidate);

        let ensured = ensure_directory(&self.download_dir).await;
        match ensured {
            Ok(created) => {
                if created {
                    self.emit(Event::DirectoryCreated {
                        path: self.download_dir.clone(),
                    });
                }
                info!(
                    from = ?previous,
                    to = ?self.download_dir,
                    "download folder changed"
                );
                self.emit(Event::FolderChanged {
                    from: previous,
                    to: self.download_dir.clone(),
                });
                Outcome::Success
            }
            Err(e) => {
                let rejected = std::mem::replace(&mut self.download_dir, previous);
                error!(
                    folder = ?rejected,
                    current = ?self.download_dir,
                    error = %e,
                    "could not create or access folder, reverted to previous setting"
                );
                Outcome::Failure
            }
        }
    }

    /// Number of matching files currently in the download folder
    ///
    /// Returns 0 when the folder does not exist or cannot be read. Each file is
    /// logged with its size.
    pub async fn count_matching_files(&self) -> usize {
        let dir = &self.download_dir;
        if !tokio::fs::try_exists(dir).await.unwrap_or(false) {
            info!(?dir, "download folder does not exist");
            return 0;
        }

        let download = &self.config.download;
        let files = match list_matching_files(dir, &download.extension, download.ignore_case).await {
            Ok(files) => files,
            Err(e) => {
                error!(?dir, error = %e, "error checking matching files");
                return 0;
            }
        };

        info!(count = files.len(), ?dir, "matching files in download folder");
        for (index, file) in files.iter().enumerate() {
            info!(
                index = index + 1,
                file = %file.file_name,
                size_mb = size_in_mb(file.size_bytes),
                "matching file"
            );
        }
        files.len()
    }
}
