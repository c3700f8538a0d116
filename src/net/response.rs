use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::{CoordinateError, SelectionError};

/// JSON body of every failed request.
#[derive(Serialize, Deserialize, Debug, PartialEq)]
pub struct ErrorBody {
    pub error: String,
}

/// A failed request: status plus a message safe to show the browser.
#[derive(Debug)]
pub struct ResponseError {
    status: StatusCode,
    message: String,
}

impl IntoResponse for ResponseError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorBody {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl ResponseError {
    pub fn with_status(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::NOT_FOUND, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::with_status(StatusCode::BAD_REQUEST, message)
    }
}

// Clicking a place the page no longer shows
impl From<SelectionError> for ResponseError {
    fn from(err: SelectionError) -> Self {
        Self::not_found(err.to_string())
    }
}

impl From<CoordinateError> for ResponseError {
    fn from(err: CoordinateError) -> Self {
        Self::bad_request(err.to_string())
    }
}

pub type Result<T, E = ResponseError> = axum::response::Result<T, E>;
