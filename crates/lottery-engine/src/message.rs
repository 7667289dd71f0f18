//! Email composition for a rendered pack

use lottery_core::{EmailMessage, Pack, Recipient};
use time::OffsetDateTime;
use time::macros::format_description;

/// Sender identity plus the timestamp stamped on every message of a run
#[derive(Debug, Clone)]
pub struct MessageComposer {
    pub sender_name: String,
    pub sender_email: String,
    pub timestamp: OffsetDateTime,
}

impl MessageComposer {
    pub fn new(sender_name: impl Into<String>, sender_email: impl Into<String>) -> Self {
        Self {
            sender_name: sender_name.into(),
            sender_email: sender_email.into(),
            timestamp: OffsetDateTime::now_utc(),
        }
    }

    pub fn with_timestamp(mut self, timestamp: OffsetDateTime) -> Self {
        self.timestamp = timestamp;
        self
    }

    pub fn subject(recipient: &Recipient) -> String {
        format!("Lottery numbers for {}", recipient.name)
    }

    /// `rendered` is the pack's text, rendered once and shared by all recipients
    pub fn compose(&self, rendered: &str, recipient: &Recipient) -> EmailMessage {
        let subject = Self::subject(recipient);
        let plain_text = format!(
            "{subject}\n\n{rendered}\n\nTimestamp: {} (UTC)\n\nThis email was sent you by {} ({}) using lottery-random.\n",
            self.formatted_timestamp(),
            self.sender_name,
            self.sender_email,
        );

        EmailMessage {
            subject,
            plain_text,
            to: recipient.clone(),
            sender_address: self.sender_email.clone(),
        }
    }

    pub fn compose_all(&self, pack: &Pack) -> Vec<EmailMessage> {
        let rendered = pack.to_string();
        pack.recipients
            .iter()
            .map(|recipient| self.compose(&rendered, recipient))
            .collect()
    }

    fn formatted_timestamp(&self) -> String {
        let format = format_description!("[year]/[month]/[day] [hour]:[minute]:[second]");
        self.timestamp
            .to_offset(time::UtcOffset::UTC)
            .format(&format)
            .unwrap_or_else(|_| self.timestamp.to_string())
    }
}
