//! Error types for lottery-mail

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MailError>;

#[derive(Error, Debug)]
pub enum MailError {
    #[error("Invalid email endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Invalid email access key: {0}")]
    InvalidAccessKey(String),

    #[error("Failed to format request date: {0}")]
    Date(String),

    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error {status}: {message}")]
    Rejected { status: u16, message: String },
}
