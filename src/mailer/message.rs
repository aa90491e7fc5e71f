//! Message composition

use crate::error::MailError;
use crate::utils::{file_name_of, format_ctime};
use chrono::{DateTime, Utc};
use lettre::Message;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";
const ATTACHMENT_CONTENT_TYPE: &str = "application/octet-stream";

/// Render the plain-text body for an attached document
pub fn render_body(file_name: &str, modified: &DateTime<Utc>) -> String {
    format!(
        "This is an automated email.\n\
         \n\
         PDF Document Details:\n\
         {RULE}\n\
         • File Name: {file_name}\n\
         • Last Modified: {modified}\n\
         \n\
         Please find the PDF document attached to this email.\n\
         \n\
         {RULE}\n\
         This email was generated automatically. Please do not reply to this email.\n",
        modified = format_ctime(modified),
    )
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .trim()
        .parse::<Mailbox>()
        .map_err(|e| MailError::InvalidAddress {
            address: address.to_string(),
            reason: e.to_string(),
        })
}

/// Build the message for `file`: text body plus the file's raw bytes as attachment
///
/// # Errors
///
/// - [`MailError::InvalidAddress`] if `sender` or `recipient` cannot be parsed
/// - [`MailError::FileNotFound`] if the file vanished
/// - [`MailError::Unexpected`] if the file cannot be read or the message cannot be built
pub async fn compose_message(
    file: &Path,
    sender: &str,
    recipient: &str,
    subject: &str,
) -> Result<Message, MailError> {
    let from = parse_mailbox(sender)?;
    let to = parse_mailbox(recipient)?;

    let metadata = tokio::fs::metadata(file).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            MailError::FileNotFound {
                path: file.to_path_buf(),
            }
        } else {
            MailError::Unexpected(format!("cannot stat {}: {e}", file.display()))
        }
    })?;
    let modified = metadata
        .modified()
        .map(DateTime::<Utc>::from)
        .map_err(|e| MailError::Unexpected(format!("modification time unavailable: {e}")))?;

    let bytes = tokio::fs::read(file)
        .await
        .map_err(|e| MailError::Unexpected(format!("cannot read {}: {e}", file.display())))?;

    let file_name = file_name_of(file);
    let content_type = ContentType::parse(ATTACHMENT_CONTENT_TYPE)
        .map_err(|e| MailError::Unexpected(e.to_string()))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(subject)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(render_body(&file_name, &modified)))
                .singlepart(Attachment::new(file_name).body(bytes, content_type)),
        )
        .map_err(|e| MailError::Unexpected(format!("failed to build message: {e}")))
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn body_names_file_and_timestamp() {
        let ts = DateTime::<Utc>::from_timestamp(1_700_000_000, 0).unwrap();
        let body = render_body("label-42.pdf", &ts);

        assert!(body.starts_with("This is an automated email."));
        assert!(body.contains("• File Name: label-42.pdf"));
        assert!(body.contains(&format!("• Last Modified: {}", format_ctime(&ts))));
        assert!(body.contains("Please do not reply"));
    }

    #[tokio::test]
    async fn message_carries_subject_and_attachment() {
        let temp_dir = TempDir::new().unwrap();
        let file = temp_dir.path().join("label.pdf");
        std::fs::write(&file, b"%PDF-1.7 payload").unwrap();

        let message = compose_message(
            &file,
            "robot@example.com",
            "office@example.com",
            "Automated PDF Labels",
        )
        .await
        .unwrap();
        let raw = String::from_utf8_lossy(&message.formatted()).into_owned();

        assert!(raw.contains("Subject: Automated PDF Labels"));
        assert!(raw.contains("application/octet-stream"));
        assert!(raw.contains("filename=\"label.pdf\""));
        assert_eq!(
            message.envelope().to()[0].to_string(),
            "office@example.com"
        );
    }

    #[tokio::test]
    async fn bad_recipient_is_rejected_before_reading_file() {
        let err = compose_message(
            Path::new("/definitely/not/here.pdf"),
            "robot@example.com",
            "not-an-address",
            "s",
        )
        .await
        .unwrap_err();

        assert!(matches!(
            err,
            MailError::InvalidAddress { ref address, .. } if address == "not-an-address"
        ));
    }

    #[tokio::test]
    async fn vanished_file_is_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let err = compose_message(
            &temp_dir.path().join("gone.pdf"),
            "robot@example.com",
            "office@example.com",
            "s",
        )
        .await
        .unwrap_err();

        assert!(matches!(err, MailError::FileNotFound { .. }));
    }
}
