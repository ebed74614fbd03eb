use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

pub const URL_REQUIRED: &str = "URL is required";
pub const INVALID_YOUTUBE_URL: &str = "Please enter a valid YouTube URL";
pub const UPSTREAM_FAILED: &str = "Failed to fetch video info";
pub const PROCESSING_FAILED: &str = "Failed to process download";

/// Failure talking to the metadata provider.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("upstream responded with status {0}")]
    Status(StatusCode),
    #[error("upstream request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("upstream returned an unreadable body: {0}")]
    Decode(String),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            details: None,
        }
    }

    pub fn upstream(status: StatusCode) -> Self {
        Self {
            status,
            message: UPSTREAM_FAILED.to_string(),
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl From<ProviderError> for ApiError {
    fn from(error: ProviderError) -> Self {
        match error {
            ProviderError::Status(status) => Self::upstream(status),
            other => Self::internal(PROCESSING_FAILED).with_details(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: self.message,
            details: self.details,
        });

        (self.status, body).into_response()
    }
}
