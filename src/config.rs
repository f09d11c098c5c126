//! Configuration module

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::logic::alert::EmailSettings;
use crate::logic::model::ModelManifest;
use crate::logic::model::RegistryLoadError;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Directory holding the default model set
    pub model_dir: PathBuf,

    /// Explicit JSON manifest, overrides `model_dir`
    pub model_manifest: Option<PathBuf>,

    /// Frontend origin allowed by CORS
    pub allowed_origin: String,

    /// Upload body limit in bytes
    pub max_upload_bytes: usize,

    /// Per-notifier delivery bound
    pub notify_timeout: Duration,

    /// SMTP alerting, `None` when credentials are missing
    pub email: Option<EmailSettings>,

    /// Optional JSON webhook for alerts
    pub alert_webhook_url: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        let email = match (env::var("SENDER_EMAIL"), env::var("SENDER_PASSWORD")) {
            (Ok(sender_email), Ok(sender_password)) => Some(EmailSettings {
                smtp_host: env::var("SMTP_HOST")
                    .unwrap_or_else(|_| "smtp.gmail.com".to_string()),
                smtp_port: env::var("SMTP_PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(587),
                sender_email,
                sender_password,
            }),
            _ => None,
        };

        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            model_dir: env::var("MODEL_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("./models")),

            model_manifest: env::var("MODEL_MANIFEST").ok().map(PathBuf::from),

            allowed_origin: env::var("ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),

            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(50 * 1024 * 1024),

            notify_timeout: Duration::from_secs(
                env::var("NOTIFY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),

            email,

            alert_webhook_url: env::var("ALERT_WEBHOOK_URL").ok().filter(|u| !u.is_empty()),
        }
    }

    /// Manifest to build the registry from
    pub fn manifest(&self) -> Result<ModelManifest, RegistryLoadError> {
        match &self.model_manifest {
            Some(path) => ModelManifest::from_file(path),
            None => Ok(ModelManifest::default_for_dir(&self.model_dir)),
        }
    }
}
