//! Email collaborator trait

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Recipient, Result};

/// One plain-text message for one recipient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub plain_text: String,
    pub to: Recipient,
    pub sender_address: String,
}

/// Hands messages off to an email transport
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send a single message. Failures surface as `Error::Delivery`.
    async fn send(&self, message: &EmailMessage) -> Result<()>;
}
