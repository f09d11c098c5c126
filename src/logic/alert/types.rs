//! Alert Types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// One malicious verdict to tell the subject about. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationEvent {
    pub event_id: Uuid,
    /// Identity of the uploader (an email address for the email notifier)
    pub subject: String,
    pub category: String,
    pub detected_at: DateTime<Utc>,
}

impl NotificationEvent {
    pub fn new(subject: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            subject: subject.into(),
            category: category.into(),
            detected_at: Utc::now(),
        }
    }
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("notifier misconfigured: {0}")]
    Config(String),

    #[error("gave up after {0:?}")]
    Timeout(std::time::Duration),
}
