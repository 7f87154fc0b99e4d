use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    /// Network failure, non-2xx status or unreadable body from the provider
    #[error("Upstream request failed: {0}")]
    UpstreamTransport(String),

    /// The provider answered, but its envelope status was not "success"
    #[error("Upstream returned status '{status}'")]
    UpstreamProtocol { status: String },

    /// Every candidate endpoint in a fallback chain failed
    #[error("No working endpoint found. Last error: {last_error}")]
    EndpointNotFound { last_error: String },

    #[error("No {kind} data received from API")]
    NoData { kind: &'static str },

    #[error("{kind} with id '{id}' not found")]
    NotFound { kind: &'static str, id: String },

    #[error("Database error: {0}")]
    Store(#[from] rusqlite::Error),
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::UpstreamTransport(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::UpstreamTransport(format!("malformed response body: {}", err))
    }
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::NoData { .. } => StatusCode::NOT_FOUND,
            AppError::UpstreamTransport(_)
            | AppError::UpstreamProtocol { .. }
            | AppError::EndpointNotFound { .. } => StatusCode::BAD_GATEWAY,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Attach the human-readable message shown in the failure envelope
    pub fn with_message(self, message: impl Into<String>) -> ApiError {
        ApiError {
            message: message.into(),
            error: self,
        }
    }
}

/// An error on its way out of a route, paired with the message for the envelope
#[derive(Debug)]
pub struct ApiError {
    pub message: String,
    pub error: AppError,
}

#[derive(Serialize)]
struct FailureBody<'a> {
    success: bool,
    message: &'a str,
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.error.status_code();
        let body = FailureBody {
            success: false,
            message: &self.message,
            error: self.error.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = match &self {
            AppError::NotFound { kind, .. } => format!("{} not found", kind),
            _ => "Request failed".to_string(),
        };
        self.with_message(message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let not_found = AppError::NotFound {
            kind: "Player",
            id: "42".to_string(),
        };
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let exhausted = AppError::EndpointNotFound {
            last_error: "boom".to_string(),
        };
        assert_eq!(exhausted.status_code(), StatusCode::BAD_GATEWAY);

        let protocol = AppError::UpstreamProtocol {
            status: "error".to_string(),
        };
        assert_eq!(protocol.status_code(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_error_messages_carry_cause() {
        let err = AppError::EndpointNotFound {
            last_error: "Upstream request failed: 404 Not Found".to_string(),
        };
        assert!(err.to_string().contains("404 Not Found"));

        let err = AppError::NoData { kind: "team" };
        assert_eq!(err.to_string(), "No team data received from API");
    }

    #[tokio::test]
    async fn test_failure_envelope_shape() {
        let response = AppError::NotFound {
            kind: "Team",
            id: "7".to_string(),
        }
        .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Team not found");
        assert_eq!(body["error"], "Team with id '7' not found");
    }
}
