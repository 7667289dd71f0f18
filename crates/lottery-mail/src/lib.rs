//! Email delivery through Azure Communication Services
//!
//! This crate provides:
//! - The ACS Email REST client implementing `lottery_core::Mailer`
//! - HMAC-SHA256 request signing for ACS access keys

pub mod azure;
pub mod error;
pub mod signing;

pub use azure::{API_VERSION, AzureEmailClient};
pub use error::{MailError, Result};
