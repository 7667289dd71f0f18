use std::time::Duration;

use async_trait::async_trait;
use lottery_core::{EmailMessage, Error, Mailer};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::signing::AccessKey;
use crate::{MailError, Result};

pub const API_VERSION: &str = "2023-03-31";

/// Azure Communication Services Email client
#[derive(Debug)]
pub struct AzureEmailClient {
    http: reqwest::Client,
    send_url: Url,
    key: AccessKey,
}

impl AzureEmailClient {
    /// `endpoint` is the resource endpoint, e.g. `https://<resource>.communication.azure.com/`
    pub fn new(endpoint: &str, access_key: &str) -> Result<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| MailError::InvalidEndpoint(format!("{}: {}", endpoint, e)))?;
        if endpoint.host_str().is_none() {
            return Err(MailError::InvalidEndpoint(endpoint.to_string()));
        }

        // "emails:send" would parse as a URL scheme through Url::join
        let mut send_url = endpoint.clone();
        send_url.set_path(&format!(
            "{}/emails:send",
            endpoint.path().trim_end_matches('/')
        ));
        send_url.set_query(Some(&format!("api-version={}", API_VERSION)));

        let http = reqwest::Client::builder()
            .user_agent("lottery-random/0.2")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            send_url,
            key: AccessKey::from_base64(access_key)?,
        })
    }

    pub fn send_url(&self) -> &Url {
        &self.send_url
    }

    async fn post(&self, message: &EmailMessage) -> Result<()> {
        let body = serde_json::to_vec(&SendRequest::from(message))?;
        let headers = self
            .key
            .sign("POST", &self.send_url, &body, OffsetDateTime::now_utc())?;

        let response = self
            .http
            .post(self.send_url.clone())
            .header("content-type", "application/json")
            .header("x-ms-date", headers.date)
            .header("x-ms-content-sha256", headers.content_hash)
            .header("authorization", headers.authorization)
            .body(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            let operation = response
                .headers()
                .get("operation-location")
                .and_then(|v| v.to_str().ok())
                .map(|s| s.to_string());
            tracing::debug!(status = status.as_u16(), operation = ?operation, "email accepted");
            return Ok(());
        }

        let text = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorResponse>(&text)
            .map(|r| r.error.message)
            .unwrap_or(text);
        Err(MailError::Rejected {
            status: status.as_u16(),
            message: detail,
        })
    }
}

#[async_trait]
impl Mailer for AzureEmailClient {
    async fn send(&self, message: &EmailMessage) -> lottery_core::Result<()> {
        self.post(message).await.map_err(|e| Error::Delivery {
            recipient: message.to.email.clone(),
            message: e.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SendRequest<'a> {
    sender_address: &'a str,
    content: Content<'a>,
    recipients: Recipients<'a>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Content<'a> {
    subject: &'a str,
    plain_text: &'a str,
}

#[derive(Debug, Serialize)]
struct Recipients<'a> {
    to: Vec<Address<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Address<'a> {
    address: &'a str,
    display_name: &'a str,
}

impl<'a> From<&'a EmailMessage> for SendRequest<'a> {
    fn from(message: &'a EmailMessage) -> Self {
        Self {
            sender_address: &message.sender_address,
            content: Content {
                subject: &message.subject,
                plain_text: &message.plain_text,
            },
            recipients: Recipients {
                to: vec![Address {
                    address: &message.to.email,
                    display_name: &message.to.name,
                }],
            },
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}
