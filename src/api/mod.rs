#[cfg(test)]
pub mod mock;
pub mod nba_api;
pub mod types;

use crate::error::{AppError, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

pub use nba_api::NbaApiClient;

/// A source of raw provider payloads, keyed by relative endpoint path
#[async_trait]
pub trait Upstream: Send + Sync {
    /// GET `endpoint` and return the unwrapped `response` payload
    async fn fetch(&self, endpoint: &str) -> Result<Value>;
}

/// Wire envelope wrapped around every provider response
#[derive(Debug, Deserialize)]
struct Envelope {
    status: String,
    #[serde(default)]
    response: Value,
}

/// Validate the envelope status and extract the payload
pub fn unwrap_envelope(body: Value) -> Result<Value> {
    let envelope: Envelope = serde_json::from_value(body)?;

    if envelope.status.eq_ignore_ascii_case("success") {
        Ok(envelope.response)
    } else {
        Err(AppError::UpstreamProtocol {
            status: envelope.status,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unwrap_success() {
        let payload = unwrap_envelope(json!({
            "status": "success",
            "response": { "teamList": [{ "id": "2" }] }
        }))
        .unwrap();
        assert_eq!(payload["teamList"][0]["id"], "2");
    }

    #[test]
    fn test_unwrap_rejects_other_status() {
        let err = unwrap_envelope(json!({ "status": "error", "response": null })).unwrap_err();
        match err {
            AppError::UpstreamProtocol { status } => assert_eq!(status, "error"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_unwrap_missing_status_is_transport_error() {
        let err = unwrap_envelope(json!({ "message": "You are not subscribed" })).unwrap_err();
        assert!(matches!(err, AppError::UpstreamTransport(_)));
    }
}
