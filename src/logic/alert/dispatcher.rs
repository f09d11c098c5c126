//! Alert Dispatcher
//!
//! Detached hand-off: the verdict is already final when `dispatch` is
//! called. Each notifier gets its own timeout; outcomes are only logged.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use super::notifier::Notifier;
use super::types::{NotificationError, NotificationEvent};

#[derive(Clone)]
pub struct Dispatcher {
    runtime: Handle,
    notifiers: Arc<Vec<Arc<dyn Notifier>>>,
    timeout: Duration,
}

impl Dispatcher {
    /// `runtime` lets `dispatch` work from blocking threads too
    pub fn new(runtime: Handle, notifiers: Vec<Arc<dyn Notifier>>, timeout: Duration) -> Self {
        Self {
            runtime,
            notifiers: Arc::new(notifiers),
            timeout,
        }
    }

    pub fn notifier_names(&self) -> Vec<&'static str> {
        self.notifiers.iter().map(|n| n.name()).collect()
    }

    /// Fire-and-forget. The handle is only useful to tests.
    pub fn dispatch(&self, event: NotificationEvent) -> JoinHandle<()> {
        let notifiers = Arc::clone(&self.notifiers);
        let timeout = self.timeout;

        self.runtime.spawn(async move {
            for notifier in notifiers.iter() {
                match deliver(notifier.as_ref(), &event, timeout).await {
                    Ok(()) => tracing::info!(
                        "Alert {} ({}) sent via {}",
                        event.event_id,
                        event.category,
                        notifier.name()
                    ),
                    Err(e) => tracing::warn!(
                        "Alert {} via {} not delivered: {}",
                        event.event_id,
                        notifier.name(),
                        e
                    ),
                }
            }
        })
    }
}

async fn deliver(
    notifier: &dyn Notifier,
    event: &NotificationEvent,
    timeout: Duration,
) -> Result<(), NotificationError> {
    tokio::time::timeout(timeout, notifier.notify(event))
        .await
        .map_err(|_| NotificationError::Timeout(timeout))?
}
