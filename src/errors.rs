use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::error::DbErr;
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

fn current_request_id() -> Option<String> {
    crate::tracing::current_request_id().map(|rid| rid.as_str().to_string())
}

/// Error body returned by every failing endpoint
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "error": "Not Found",
    "message": "Beer not found: name Brahma",
    "request_id": "req-abc123xyz",
    "timestamp": "2024-12-09T10:30:00.000Z"
}))]
pub struct ErrorResponse {
    /// HTTP status category (e.g., "Not Found", "Bad Request")
    #[schema(example = "Not Found")]
    pub error: String,
    /// Human-readable error description
    #[schema(example = "Beer not found: name Brahma")]
    pub message: String,
    /// Additional error details (field validation failures)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    /// Unique request identifier for support and debugging
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "req-abc123xyz")]
    pub request_id: Option<String>,
    /// RFC 3339 timestamp when the error occurred
    pub timestamp: String,
}

/// The key a missing beer was looked up by
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BeerLookup {
    Name(String),
    Id(i64),
}

impl fmt::Display for BeerLookup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BeerLookup::Name(name) => write!(f, "name {}", name),
            BeerLookup::Id(id) => write!(f, "id {}", id),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Beer with name {0} already registered in the system")]
    AlreadyRegistered(String),

    #[error("Beer not found: {0}")]
    NotFound(BeerLookup),

    #[error("Stock exceeded: adding would bring quantity to {attempted}, max capacity is {max}")]
    StockExceeded { attempted: i64, max: i32 },

    #[error("Stock underflow: removing would bring quantity to {attempted}")]
    StockUnderflow { attempted: i64 },

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Concurrent modification: beer {0} changed since it was read")]
    ConcurrentModification(i64),

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

impl ServiceError {
    /// Returns the HTTP status code for this error.
    /// This is the single source of truth for error-to-status mapping.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::StockExceeded { .. }
            | Self::StockUnderflow { .. }
            | Self::ValidationError(_)
            | Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::AlreadyRegistered(_) | Self::ConcurrentModification(_) => StatusCode::CONFLICT,
            Self::DatabaseError(_) | Self::InternalError(_) | Self::Other(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Returns the error message suitable for HTTP responses.
    /// Internal errors return generic messages to avoid leaking implementation details.
    pub fn response_message(&self) -> String {
        match self {
            Self::DatabaseError(_) => "Database error".to_string(),
            Self::InternalError(_) | Self::Other(_) => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}

fn error_body(status: StatusCode, message: String, details: Option<String>) -> Response {
    let err = ErrorResponse {
        error: status.canonical_reason().unwrap_or("Error").to_string(),
        message,
        details,
        request_id: current_request_id(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (status, Json(err)).into_response()
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        error_body(status, self.response_message(), None)
    }
}

/// API Error type for HTTP responses
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Service error: {0}")]
    ServiceError(#[from] ServiceError),

    /// Request shape rejected before the service layer was reached
    #[error("Validation error: {message}")]
    ValidationError {
        message: String,
        details: Option<String>,
    },
}

impl ApiError {
    pub fn validation(message: impl Into<String>, details: Option<String>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::ServiceError(service_error) => service_error.into_response(),
            ApiError::ValidationError { message, details } => {
                error_body(StatusCode::BAD_REQUEST, message, details)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn service_error_response_includes_request_id() {
        let response =
            crate::tracing::scope_request_id(crate::tracing::RequestId::new("req-123"), async {
                ServiceError::NotFound(BeerLookup::Name("Brahma".into())).into_response()
            })
            .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.request_id.as_deref(), Some("req-123"));
        assert_eq!(payload.message, "Beer not found: name Brahma");
    }

    #[tokio::test]
    async fn api_validation_error_is_bad_request() {
        let response =
            ApiError::validation("Validation failed", Some("brand: length".into())).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let payload: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(payload.error, "Bad Request");
        assert_eq!(payload.details.as_deref(), Some("brand: length"));
        assert!(payload.request_id.is_none());
    }

    #[test]
    fn service_error_status_code_mapping() {
        assert_eq!(
            ServiceError::NotFound(BeerLookup::Id(2)).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ServiceError::AlreadyRegistered("Brahma".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::StockExceeded {
                attempted: 60,
                max: 50
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::StockUnderflow { attempted: -5 }.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ServiceError::ConcurrentModification(1).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn service_error_response_message_hides_internal_details() {
        assert_eq!(
            ServiceError::DatabaseError(DbErr::Custom("password=hunter2".into()))
                .response_message(),
            "Database error"
        );
        assert_eq!(
            ServiceError::InternalError("lock poisoned".into()).response_message(),
            "Internal server error"
        );
        assert_eq!(
            ServiceError::StockExceeded {
                attempted: 60,
                max: 50
            }
            .response_message(),
            "Stock exceeded: adding would bring quantity to 60, max capacity is 50"
        );
    }
}
