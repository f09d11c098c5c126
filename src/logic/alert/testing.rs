//! Test doubles for `Notifier`

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use super::notifier::Notifier;
use super::types::{NotificationError, NotificationEvent};

#[derive(Default)]
enum Mode {
    #[default]
    Accept,
    Fail,
    Hang,
}

/// Records delivered events; can be told to fail or hang
#[derive(Default)]
pub struct RecordingNotifier {
    mode: Mode,
    attempts: AtomicUsize,
    delivered: Mutex<Vec<NotificationEvent>>,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        Self {
            mode: Mode::Fail,
            ..Default::default()
        }
    }

    pub fn hanging() -> Self {
        Self {
            mode: Mode::Hang,
            ..Default::default()
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn delivered(&self) -> Vec<NotificationEvent> {
        self.delivered.lock().clone()
    }

    pub fn categories(&self) -> Vec<String> {
        self.delivered.lock().iter().map(|e| e.category.clone()).collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn notify(&self, event: &NotificationEvent) -> Result<(), NotificationError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);

        match self.mode {
            Mode::Accept => {
                self.delivered.lock().push(event.clone());
                Ok(())
            }
            Mode::Fail => Err(NotificationError::Delivery("simulated outage".to_string())),
            Mode::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                self.delivered.lock().push(event.clone());
                Ok(())
            }
        }
    }
}
