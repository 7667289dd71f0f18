//! JSON-RPC 2.0 types for random.org `generateIntegerSequences`

use std::collections::BTreeSet;

use lottery_core::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct JsonRpcRequest<P> {
    pub jsonrpc: &'static str,
    pub method: &'static str,
    pub params: P,
    pub id: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateIntegerSequences<'a> {
    pub api_key: &'a str,
    /// Number of sequences
    pub n: u32,
    pub length: u32,
    pub min: i64,
    pub max: i64,
    pub replacement: bool,
}

impl<'a> JsonRpcRequest<GenerateIntegerSequences<'a>> {
    /// One sequence of `length` integers drawn without replacement
    pub fn unique_sequence(id: u64, api_key: &'a str, length: u32, min: i64, max: i64) -> Self {
        Self {
            jsonrpc: "2.0",
            method: "generateIntegerSequences",
            params: GenerateIntegerSequences {
                api_key,
                n: 1,
                length,
                min,
                max,
                replacement: false,
            },
            id,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<GenerateResult>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResult {
    pub random: RandomData,
    #[serde(default)]
    pub requests_left: Option<i64>,
    #[serde(default)]
    pub bits_left: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct RandomData {
    pub data: Vec<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
pub struct JsonRpcError {
    #[serde(default)]
    pub code: i64,
    pub message: String,
}

impl JsonRpcResponse {
    /// Extract the drawn sequence, checking it against the request
    pub fn into_unique_integers(self, count: u32, min: i64, max: i64) -> Result<BTreeSet<i64>> {
        if let Some(error) = self.error {
            return Err(Error::RandomSource {
                message: error.message,
            });
        }

        let result = self.result.ok_or_else(|| Error::RandomSource {
            message: "response has neither result nor error".to_string(),
        })?;

        let sequence = result
            .random
            .data
            .into_iter()
            .next()
            .ok_or_else(|| Error::RandomSource {
                message: "response contains no sequence".to_string(),
            })?;

        let expected = count as usize;
        if sequence.len() != expected {
            return Err(Error::RandomSource {
                message: format!("expected {} numbers, received {}", expected, sequence.len()),
            });
        }

        if let Some(number) = sequence.iter().find(|n| !(min..=max).contains(*n)) {
            return Err(Error::RandomSource {
                message: format!("received {} outside [{}, {}]", number, min, max),
            });
        }

        let numbers: BTreeSet<i64> = sequence.into_iter().collect();
        if numbers.len() != expected {
            return Err(Error::RandomSource {
                message: format!(
                    "received {} distinct numbers, expected {}",
                    numbers.len(),
                    expected
                ),
            });
        }

        Ok(numbers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lottery_core::ErrorKind;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> JsonRpcResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_request_shape() {
        let request = JsonRpcRequest::unique_sequence(7, "secret", 6, 1, 45);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "jsonrpc": "2.0",
                "method": "generateIntegerSequences",
                "params": {
                    "apiKey": "secret",
                    "n": 1,
                    "length": 6,
                    "min": 1,
                    "max": 45,
                    "replacement": false
                },
                "id": 7
            })
        );
    }

    #[test]
    fn test_successful_response() {
        let response = parse(json!({
            "jsonrpc": "2.0",
            "result": {
                "random": {
                    "data": [[44, 3, 17, 9, 30, 21]],
                    "completionTime": "2024-01-01 10:00:00Z"
                },
                "bitsUsed": 32,
                "bitsLeft": 249968,
                "requestsLeft": 999,
                "advisoryDelay": 0
            },
            "id": 1
        }));
        assert_eq!(response.result.as_ref().and_then(|r| r.requests_left), Some(999));

        let numbers = response.into_unique_integers(6, 1, 45).unwrap();
        assert_eq!(numbers, BTreeSet::from([3, 9, 17, 21, 30, 44]));
    }

    #[test]
    fn test_error_response_carries_provider_message() {
        let response = parse(json!({
            "jsonrpc": "2.0",
            "error": {"code": 401, "message": "The API key you specified does not exist"},
            "id": 1
        }));
        let err = response.into_unique_integers(6, 1, 45).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RandomSource);
        assert_eq!(
            err.to_string(),
            "random.org API error: The API key you specified does not exist"
        );
    }

    #[test]
    fn test_rejects_malformed_sequences() {
        let cases = [
            json!([[1, 2, 3]]),
            json!([[1, 2, 3, 4, 5, 46]]),
            json!([[1, 2, 3, 4, 5, 5]]),
            json!([]),
        ];
        for data in cases {
            let response = parse(json!({"result": {"random": {"data": data}}}));
            let err = response.into_unique_integers(6, 1, 45).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::RandomSource);
        }
    }
}
