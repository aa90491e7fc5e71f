//! The four-step workflow: ensure directory, locate, send, delete

use super::PdfMailer;
use crate::error::{Error, LocateError, Result};
use crate::files::{ensure_directory, find_latest_file, remove_file};
use crate::types::{CandidateFile, Event, Outcome, Stage, WorkflowReport};
use futures::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::{Duration, Instant};
use tracing::{error, info, warn};

/// How far a run got; survives a panic inside a stage
struct Progress {
    stage: Stage,
    file: Option<CandidateFile>,
    deleted: bool,
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

impl PdfMailer {
    /// Find the newest file, mail it to `receiver`, then delete the local copy
    ///
    /// Returns [`Outcome::Success`] once the message was delivered, even if the
    /// local copy could not be deleted afterwards. Any failure before that, an
    /// empty folder included, returns [`Outcome::Failure`] and leaves the file in
    /// place. Details go to the log and the event stream only.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// # use pdf_mailer::{Config, Outcome, PdfMailer};
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let mailer = PdfMailer::new(Config::default())?;
    /// if mailer.count_matching_files().await > 0 {
    ///     let outcome = mailer
    ///         .process_workflow("robot@example.com", "office@example.com", "app-password")
    ///         .await;
    ///     assert_eq!(outcome, Outcome::Success);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn process_workflow(&self, sender: &str, receiver: &str, credential: &str) -> Outcome {
        self.run_workflow(sender, receiver, credential).await.outcome
    }

    /// Same as [`process_workflow`](Self::process_workflow), returning the full report
    pub async fn run_workflow(
        &self,
        sender: &str,
        receiver: &str,
        credential: &str,
    ) -> WorkflowReport {
        let started = Instant::now();
        info!(folder = ?self.download_dir, "starting PDF email workflow");
        self.emit(Event::WorkflowStarted {
            folder: self.download_dir.clone(),
        });

        let mut progress = Progress {
            stage: Stage::EnsureDir,
            file: None,
            deleted: false,
        };

        let result = AssertUnwindSafe(self.run_stages(&mut progress, sender, receiver, credential))
            .catch_unwind()
            .await;

        let failure = match result {
            Ok(Ok(())) => None,
            Ok(Err(e)) => {
                error!(
                    stage = %progress.stage,
                    error = %e,
                    error_code = e.error_code(),
                    category = ?e.category(),
                    "step failed"
                );
                Some(e.to_string())
            }
            Err(payload) => {
                let message = format!(
                    "unexpected error in PDF workflow: {}",
                    panic_message(payload.as_ref())
                );
                error!(stage = %progress.stage, error = %message, "step aborted");
                Some(message)
            }
        };

        let duration = started.elapsed();
        let outcome = match failure {
            None => {
                let file_name = progress
                    .file
                    .as_ref()
                    .map(|f| f.file_name.clone())
                    .unwrap_or_default();
                info!(
                    duration_secs = duration.as_secs_f64(),
                    file = %file_name,
                    recipient = receiver,
                    deleted = progress.deleted,
                    "PDF email workflow completed successfully"
                );
                self.emit(Event::WorkflowCompleted {
                    file_name,
                    recipient: receiver.to_string(),
                    duration_ms: millis(duration),
                });
                Outcome::Success
            }
            Some(error) => {
                error!(
                    duration_secs = duration.as_secs_f64(),
                    stage = %progress.stage,
                    "PDF email workflow failed"
                );
                self.emit(Event::WorkflowFailed {
                    stage: progress.stage,
                    error,
                    duration_ms: millis(duration),
                });
                Outcome::Failure
            }
        };

        WorkflowReport {
            outcome,
            stage: progress.stage,
            file: progress.file,
            deleted: progress.deleted,
            duration,
        }
    }

    fn enter(&self, progress: &mut Progress, stage: Stage) {
        progress.stage = stage;
        info!(step = stage.step_number(), %stage, "{}", stage.label());
        self.emit(Event::StageStarted { stage });
    }

    async fn run_stages(
        &self,
        progress: &mut Progress,
        sender: &str,
        receiver: &str,
        credential: &str,
    ) -> Result<()> {
        let dir = &self.download_dir;

        self.enter(progress, Stage::EnsureDir);
        if ensure_directory(dir).await? {
            self.emit(Event::DirectoryCreated { path: dir.clone() });
        }

        self.enter(progress, Stage::Locate);
        let download = &self.config.download;
        let candidate = match find_latest_file(dir, &download.extension, download.ignore_case).await {
            Ok(candidate) => candidate,
            Err(e) => {
                if matches!(e, LocateError::NoMatchingFiles { .. }) {
                    self.emit(Event::NoCandidate {
                        folder: dir.clone(),
                    });
                }
                return Err(e.into());
            }
        };
        self.emit(Event::CandidateFound {
            file_name: candidate.file_name.clone(),
            size_bytes: candidate.size_bytes,
        });
        progress.file = Some(candidate.clone());

        self.enter(progress, Stage::Send);
        if let Err(e) = self
            .dispatcher
            .dispatch(&candidate.path, sender, receiver, credential)
            .await {
            warn!(file = ?candidate.path, "file will NOT be deleted due to email failure");
            self.emit(Event::MailFailed {
                error: e.to_string(),
            });
            return Err(Error::Mail(e));
        }
        self.emit(Event::MailSent {
            recipient: receiver.to_string(),
            file_name: candidate.file_name.clone(),
        });

        self.enter(progress, Stage::Delete);
        match remove_file(&candidate.path).await {
            Ok(()) => {
                progress.deleted = true;
                self.emit(Event::FileDeleted {
                    path: candidate.path,
                });
            }
            Err(e) => {
                let e = Error::from(e);
                warn!(
                    error = %e,
                    error_code = e.error_code(),
                    category = ?e.category(),
                    "email was sent successfully, but file cleanup failed"
                );
                self.emit(Event::DeleteFailed {
                    path: candidate.path,
                    error: e.to_string(),
                    error_code: e.error_code().to_string(),
                });
            }
        }

        Ok(())
    }
}
