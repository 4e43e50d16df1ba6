use crate::errors::ApiError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use validator::Validate;

/// Standard success response
pub fn success_response<T: Serialize>(data: T) -> Response {
    (StatusCode::OK, Json(data)).into_response()
}

/// Standard created response
pub fn created_response<T: Serialize>(data: T) -> Response {
    (StatusCode::CREATED, Json(data)).into_response()
}

/// Standard no content response
pub fn no_content_response() -> Response {
    StatusCode::NO_CONTENT.into_response()
}

/// Validate request input
pub fn validate_input<T: Validate>(input: &T) -> Result<(), ApiError> {
    input
        .validate()
        .map_err(|e| ApiError::validation("Validation failed", Some(e.to_string())))
}

/// Unwraps a JSON body, turning malformed or incomplete payloads into a 400
pub fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(rejection) => Err(ApiError::validation(
            "Invalid request body",
            Some(rejection.body_text()),
        )),
    }
}

/// Unwraps a path parameter, reporting unparsable segments in the error envelope
pub fn path_param<T>(param: Result<axum::extract::Path<T>, PathRejection>) -> Result<T, ApiError> {
    match param {
        Ok(axum::extract::Path(value)) => Ok(value),
        Err(rejection) => Err(ApiError::validation(
            "Invalid path parameter",
            Some(rejection.body_text()),
        )),
    }
}
