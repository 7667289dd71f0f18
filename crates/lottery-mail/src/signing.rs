//! HMAC-SHA256 authentication for Azure Communication Services
//!
//! The signed string is `METHOD\n<path?query>\n<x-ms-date>;<host>;<x-ms-content-sha256>`.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use reqwest::Url;
use sha2::{Digest, Sha256};
use time::OffsetDateTime;
use time::macros::format_description;

use crate::{MailError, Result};

type HmacSha256 = Hmac<Sha256>;

/// Header values for one signed request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedHeaders {
    pub date: String,
    pub content_hash: String,
    pub authorization: String,
}

/// ACS access key, decoded once
#[derive(Clone)]
pub struct AccessKey(Vec<u8>);

impl AccessKey {
    pub fn from_base64(key: &str) -> Result<Self> {
        STANDARD
            .decode(key.trim())
            .map(Self)
            .map_err(|e| MailError::InvalidAccessKey(e.to_string()))
    }

    pub fn sign(
        &self,
        method: &str,
        url: &Url,
        body: &[u8],
        now: OffsetDateTime,
    ) -> Result<SignedHeaders> {
        let date = http_date(now)?;
        let content_hash = STANDARD.encode(Sha256::digest(body));

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => return Err(MailError::InvalidEndpoint(url.to_string())),
        };
        let path_and_query = match url.query() {
            Some(query) => format!("{}?{}", url.path(), query),
            None => url.path().to_string(),
        };

        let string_to_sign = format!(
            "{}\n{}\n{};{};{}",
            method, path_and_query, date, host, content_hash
        );

        let mut mac = HmacSha256::new_from_slice(&self.0)
            .map_err(|e| MailError::InvalidAccessKey(e.to_string()))?;
        mac.update(string_to_sign.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        Ok(SignedHeaders {
            date,
            content_hash,
            authorization: format!(
                "HMAC-SHA256 SignedHeaders=x-ms-date;host;x-ms-content-sha256&Signature={}",
                signature
            ),
        })
    }
}

impl std::fmt::Debug for AccessKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessKey(..)")
    }
}

/// RFC 7231 date, e.g. `Tue, 15 Nov 1994 08:12:31 GMT`
fn http_date(now: OffsetDateTime) -> Result<String> {
    let format = format_description!(
        "[weekday repr:short], [day] [month repr:short] [year] [hour]:[minute]:[second] GMT"
    );
    now.to_offset(time::UtcOffset::UTC)
        .format(&format)
        .map_err(|e| MailError::Date(e.to_string()))
}
