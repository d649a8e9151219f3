// ABOUTME: Minimal JSON-RPC 2.0 client over HTTP.
// ABOUTME: Maps node error objects onto provider errors.

use super::error::{DecodeSnafu, ProviderError, TransportSnafu};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use snafu::ResultExt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

pub struct RpcClient {
    http: reqwest::Client,
    url: Url,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: Url) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context(TransportSnafu {
                method: "client setup",
            })?;
        Ok(Self {
            http,
            url,
            next_id: AtomicU64::new(1),
        })
    }

    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<T, ProviderError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(method, id, "rpc request");

        let response: RpcResponse = self
            .http
            .post(self.url.clone())
            .json(&serde_json::json!({
                "jsonrpc": "2.0",
                "id": id,
                "method": method,
                "params": params,
            }))
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .context(TransportSnafu { method })?
            .json()
            .await
            .context(TransportSnafu { method })?;

        if let Some(error) = response.error {
            return Err(classify(method, error));
        }

        serde_json::from_value(response.result.unwrap_or(Value::Null))
            .context(DecodeSnafu { method })
    }
}

fn classify(method: &str, error: RpcErrorObject) -> ProviderError {
    if error.message.to_lowercase().contains("insufficient funds") {
        ProviderError::InsufficientFunds {
            message: error.message,
        }
    } else {
        ProviderError::Rpc {
            method: method.to_string(),
            code: error.code,
            message: error.message,
        }
    }
}

/// Parse a `0x`-prefixed hex quantity.
pub fn parse_quantity(method: &str, value: &str) -> Result<u64, ProviderError> {
    value
        .strip_prefix("0x")
        .and_then(|digits| u64::from_str_radix(digits, 16).ok())
        .ok_or_else(|| ProviderError::InvalidQuantity {
            method: method.to_string(),
            value: value.to_string(),
        })
}
