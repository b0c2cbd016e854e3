//! Mapping of employee errors to HTTP responses.
//!
//! # Design Decisions
//! - Client mistakes (bad id, bad body, bad query) → 400
//! - Oversized bodies → 413
//! - Missing records → 404, duplicate names → 409
//! - Upstream failures → 502 with a generic message; details only in logs

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::employee::EmployeeError;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub status: u16,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            status: status.as_u16(),
        }
    }
}

impl EmployeeError {
    /// HTTP status this error is reported with.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EmployeeError::InvalidId(_) | EmployeeError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            EmployeeError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            EmployeeError::NotFound(_) => StatusCode::NOT_FOUND,
            EmployeeError::Conflict(_) => StatusCode::CONFLICT,
            EmployeeError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl From<JsonRejection> for EmployeeError {
    fn from(rejection: JsonRejection) -> Self {
        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            EmployeeError::PayloadTooLarge(rejection.body_text())
        } else {
            EmployeeError::InvalidInput(rejection.body_text())
        }
    }
}

impl From<QueryRejection> for EmployeeError {
    fn from(rejection: QueryRejection) -> Self {
        EmployeeError::InvalidInput(rejection.body_text())
    }
}

impl IntoResponse for EmployeeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            EmployeeError::Upstream(e) => {
                tracing::error!(error = %e, "Upstream employee service failed");
                "Upstream employee service failed".to_string()
            }
            other => {
                tracing::debug!(error = %other, status = %status, "Request rejected");
                other.to_string()
            }
        };

        (status, Json(ErrorResponse::new(status, message))).into_response()
    }
}
