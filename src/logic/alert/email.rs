//! Email notifier
//!
//! STARTTLS relay, plain-text alert addressed to the uploader.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::notifier::Notifier;
use super::types::{NotificationError, NotificationEvent};

#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub sender_email: String,
    pub sender_password: String,
}

pub struct EmailNotifier {
    sender: Mailbox,
    mailer: AsyncSmtpTransport<Tokio1Executor>,
}

impl EmailNotifier {
    pub fn new(settings: &EmailSettings) -> Result<Self, NotificationError> {
        let sender: Mailbox = settings
            .sender_email
            .parse()
            .map_err(|e| NotificationError::Config(format!("sender address: {}", e)))?;

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&settings.smtp_host)
            .map_err(|e| NotificationError::Config(format!("smtp relay: {}", e)))?
            .port(settings.smtp_port)
            .credentials(Credentials::new(
                settings.sender_email.clone(),
                settings.sender_password.clone(),
            ))
            .build();

        Ok(Self { sender, mailer })
    }
}

#[async_trait]
impl Notifier for EmailNotifier {
    fn name(&self) -> &'static str {
        "email"
    }

    async fn notify(&self, event: &NotificationEvent) -> Result<(), NotificationError> {
        let recipient: Mailbox = event.subject.parse().map_err(|e| {
            NotificationError::Delivery(format!("recipient '{}': {}", event.subject, e))
        })?;

        let message = Message::builder()
            .from(self.sender.clone())
            .to(recipient)
            .subject(alert_subject(&event.category))
            .header(ContentType::TEXT_PLAIN)
            .body(alert_body(event))
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;

        self.mailer
            .send(message)
            .await
            .map_err(|e| NotificationError::Delivery(e.to_string()))?;

        Ok(())
    }
}

fn alert_subject(category: &str) -> String {
    format!("Urgent Security Alert: {} Attack Detected", category)
}

fn alert_body(event: &NotificationEvent) -> String {
    format!(
        "Dear {subject},

Analysis of the network logs you uploaded found traffic consistent with a \
{category} attack (detected {detected}, reference {id}).

This type of attack can lead to data breaches or service disruption. We \
recommend reviewing the affected hosts and taking immediate action to \
contain it.

Stay vigilant,
Zero-day Detect
",
        subject = event.subject,
        category = event.category,
        detected = event.detected_at.to_rfc3339(),
        id = event.event_id,
    )
}
