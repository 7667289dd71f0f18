use std::collections::BTreeSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use lottery_core::{Error, RandomSource, Result};

use crate::protocol::{JsonRpcRequest, JsonRpcResponse};
use crate::{Clock, RateLimiter, SystemClock};

pub const RANDOM_ORG_ENDPOINT: &str = "https://api.random.org/json-rpc/4/invoke";

/// random.org allows 10 requests per second
pub const MIN_CALL_INTERVAL: Duration = Duration::from_millis(100);

/// Rate-limited random.org client
pub struct RandomOrgClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    limiter: RateLimiter,
    next_id: AtomicU64,
}

impl RandomOrgClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent("lottery-random/0.2")
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| Error::RandomSource {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            http,
            endpoint: RANDOM_ORG_ENDPOINT.to_string(),
            api_key: api_key.into(),
            limiter: RateLimiter::new(MIN_CALL_INTERVAL, Arc::new(SystemClock)),
            next_id: AtomicU64::new(1),
        })
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.limiter = RateLimiter::new(self.limiter.min_interval(), clock);
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl RandomSource for RandomOrgClient {
    async fn draw_unique_integers(
        &self,
        count: u32,
        min: i64,
        max: i64,
    ) -> Result<BTreeSet<i64>> {
        let waited = self.limiter.acquire().await;

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::unique_sequence(id, &self.api_key, count, min, max);
        tracing::debug!(
            id,
            count,
            min,
            max,
            waited_ms = waited.as_millis() as u64,
            "requesting random integers"
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::RandomSource {
                message: format!("Failed to reach random.org: {}", e),
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<JsonRpcResponse>(&text) {
                Ok(JsonRpcResponse {
                    error: Some(error),
                    ..
                }) => format!("HTTP error {}: {}", status.as_u16(), error.message),
                _ => format!("HTTP error {}", status.as_u16()),
            };
            return Err(Error::RandomSource { message });
        }

        let body: JsonRpcResponse = response.json().await.map_err(|e| Error::RandomSource {
            message: format!("Failed to read response: {}", e),
        })?;

        if let Some(result) = &body.result {
            tracing::debug!(
                id,
                requests_left = ?result.requests_left,
                bits_left = ?result.bits_left,
                "random.org quota"
            );
        }

        body.into_unique_integers(count, min, max)
    }
}
