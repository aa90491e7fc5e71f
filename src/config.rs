//! Configuration types for pdf-mailer

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::{path::PathBuf, time::Duration};

/// Download folder settings
///
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DownloadConfig {
    /// Directory that relative folder names resolve against
    /// (default: the process working directory at construction time)
    #[serde(default)]
    pub base_dir: Option<PathBuf>,

    /// Download folder (default: "downloads", relative to `base_dir`)
    #[serde(default = "default_download_dir")]
    pub download_dir: PathBuf,

    /// File extension to pick up, without the leading dot (default: "pdf")
    #[serde(default = "default_extension")]
    pub extension: String,

    /// Also pick up `SCAN.PDF`-style names that differ only in case (default: false)
    #[serde(default)]
    pub ignore_case: bool,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            base_dir: None,
            download_dir: default_download_dir(),
            extension: default_extension(),
            ignore_case: false,
        }
    }
}

/// Mail relay settings
///
/// Used as a nested sub-config within [`Config`]. Credentials are not part of the
/// configuration: the caller passes them to every workflow run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MailConfig {
    /// Relay hostname (default: "smtp.gmail.com")
    #[serde(default = "default_relay_host")]
    pub relay_host: String,

    /// Relay submission port, upgraded with STARTTLS (default: 587)
    #[serde(default = "default_relay_port")]
    pub relay_port: u16,

    /// Subject line of every message (default: "Automated PDF Labels")
    #[serde(default = "default_subject")]
    pub subject: String,

    /// Connect timeout for the relay (None = lettre's built-in 60s connect timeout)
    #[serde(default, with = "optional_duration_serde")]
    pub timeout: Option<Duration>,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            relay_host: default_relay_host(),
            relay_port: default_relay_port(),
            subject: default_subject(),
            timeout: None,
        }
    }
}

/// Main configuration for [`PdfMailer`](crate::PdfMailer)
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Config {
    /// Download folder settings
    #[serde(default)]
    pub download: DownloadConfig,

    /// Mail relay settings
    #[serde(default)]
    pub mail: MailConfig,
}

impl Config {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize this configuration to pretty-printed JSON
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn default_download_dir() -> PathBuf {
    PathBuf::from("downloads")
}

fn default_extension() -> String {
    "pdf".to_string()
}

fn default_relay_host() -> String {
    "smtp.gmail.com".to_string()
}

fn default_relay_port() -> u16 {
    587
}

fn default_subject() -> String {
    "Automated PDF Labels".to_string()
}

// Optional Duration serialization helper
mod optional_duration_serde {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match duration {
            Some(d) => serializer.serialize_some(&d.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = Option::<u64>::deserialize(deserializer)?;
        Ok(secs.map(Duration::from_secs))
    }
}
