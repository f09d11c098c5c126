//! Alert Module - Notification Dispatcher
//!
//! Features:
//! - Email (SMTP) to the uploader
//! - Generic JSON webhook
//! - Log-only fallback
//! - Bounded, detached delivery that never touches the verdict

pub mod dispatcher;
pub mod email;
pub mod notifier;
pub mod types;
pub mod webhook;

#[cfg(test)]
pub(crate) mod testing;

use std::sync::Arc;
use std::time::Duration;

// Re-export common types
pub use dispatcher::Dispatcher;
pub use email::{EmailNotifier, EmailSettings};
pub use notifier::{LogNotifier, Notifier};
pub use types::NotificationEvent;
pub use webhook::WebhookNotifier;

/// Build the configured delivery channels. A channel that cannot be built
/// is logged and left out; with none left, alerts go to the log.
pub fn build_notifiers(
    email: Option<&EmailSettings>,
    webhook_url: Option<&str>,
    timeout: Duration,
) -> Vec<Arc<dyn Notifier>> {
    let mut notifiers: Vec<Arc<dyn Notifier>> = Vec::new();

    match email {
        Some(settings) => match EmailNotifier::new(settings) {
            Ok(n) => notifiers.push(Arc::new(n)),
            Err(e) => tracing::warn!("Email alerts disabled: {}", e),
        },
        None => tracing::info!("Email credentials not configured, email alerts disabled"),
    }

    if let Some(url) = webhook_url {
        match WebhookNotifier::new(url, timeout) {
            Ok(n) => notifiers.push(Arc::new(n)),
            Err(e) => tracing::warn!("Webhook alerts disabled: {}", e),
        }
    }

    if notifiers.is_empty() {
        notifiers.push(Arc::new(LogNotifier));
    }

    notifiers
}
