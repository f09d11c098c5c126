//! Notifier capability

use async_trait::async_trait;

use super::types::{NotificationError, NotificationEvent};

/// Best-effort delivery of one alert
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &'static str;

    async fn notify(&self, event: &NotificationEvent) -> Result<(), NotificationError>;
}

/// Fallback when no delivery channel is configured: the alert goes to the log
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn notify(&self, event: &NotificationEvent) -> Result<(), NotificationError> {
        tracing::warn!(
            "🚨 {} attack detected for {} (event {})",
            event.category,
            event.subject,
            event.event_id
        );
        Ok(())
    }
}
