//! HTTP boundary errors.
//!
//! Every error response has the body `{"status": "Error", "error": "<message>"}`.
//! Messages are chosen by the handler; internal failures are logged there
//! and surfaced with a generic message only.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use validator::{ValidationError, ValidationErrors};

use crate::api::dto::ApiResponse;

#[derive(Debug)]
pub enum AppError {
    Validation { message: String },
    Unauthorized { message: String },
    NotFound { message: String },
    Conflict { message: String },
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
    pub fn unauthorized() -> Self {
        Self::Unauthorized {
            message: "unauthorized".to_string(),
        }
    }
    pub fn not_found() -> Self {
        Self::NotFound {
            message: "not found".to_string(),
        }
    }
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            AppError::Validation { message }
            | AppError::Unauthorized { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message }
            | AppError::Internal { message } => message,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message(), self.status_code())
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = match self {
            AppError::Validation { message }
            | AppError::Unauthorized { message }
            | AppError::NotFound { message }
            | AppError::Conflict { message }
            | AppError::Internal { message } => ApiResponse::error(message),
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        Self::bad_request(describe_validation_errors(&errors))
    }
}

/// Renders validation errors as `field <name> <problem>` messages joined by `, `.
///
/// One rule is reported per field, a missing value taking precedence.
/// Fields are listed in name order so the message is stable.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .filter_map(|(field, errs)| {
            errs.iter()
                .find(|e| e.code == "required")
                .or_else(|| errs.first())
                .map(|e| describe_field_error(field, e))
        })
        .collect();

    messages.sort();
    messages.join(", ")
}

fn describe_field_error(field: &str, error: &ValidationError) -> String {
    match error.code.as_ref() {
        "required" => format!("field {field} is a required field"),
        "url" => format!("field {field} is not a valid URL"),
        "length" => format!("field {field} has an invalid length"),
        "regex" => format!("field {field} contains invalid characters"),
        _ => format!("field {field} is not valid"),
    }
}
