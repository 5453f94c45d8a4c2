use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use kulture_core::KultureError;
use serde::Serialize;
use thiserror::Error;

/// Unified API error type
#[derive(Debug, Error)]
#[error("{status}: {message}")]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            details: self.details,
        };
        (self.status, Json(body)).into_response()
    }
}

/// Only the user-facing message leaves the server; backend detail is logged.
impl From<KultureError> for ApiError {
    fn from(err: KultureError) -> Self {
        let status = match &err {
            KultureError::SourceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            KultureError::NotFound { .. } => StatusCode::NOT_FOUND,
            KultureError::MissingContext { .. } | KultureError::InvalidTransition { .. } => {
                StatusCode::CONFLICT
            }
            KultureError::InvalidDateRange { .. } | KultureError::InvalidCoordinate { .. } => {
                StatusCode::BAD_REQUEST
            }
            KultureError::Storage { .. }
            | KultureError::ConfigMissing { .. }
            | KultureError::ConfigInvalid { .. }
            | KultureError::Io(_)
            | KultureError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            tracing::error!(error = %err, status = status.as_u16(), "Request failed");
        } else {
            tracing::debug!(error = %err, status = status.as_u16(), "Request rejected");
        }

        Self::new(status, err.user_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kulture_core::navigation::Screen;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (KultureError::source_unavailable("pool timed out"), StatusCode::SERVICE_UNAVAILABLE),
            (KultureError::not_found("Atlantis"), StatusCode::NOT_FOUND),
            (
                KultureError::MissingContext { screen: Screen::Map },
                StatusCode::CONFLICT,
            ),
            (
                KultureError::Storage {
                    reason: "relation does not exist".to_string(),
                },
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status, expected);
        }
    }

    #[test]
    fn test_backend_detail_not_exposed() {
        let api_error = ApiError::from(KultureError::source_unavailable("10.0.0.4:5432 refused"));
        assert!(!api_error.message.contains("10.0.0.4"));
        assert!(api_error.details.is_none());
    }
}
