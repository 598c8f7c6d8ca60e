//! Application error type shared by services and HTTP handlers.
//!
//! Every variant carries a human-readable message and a JSON `details` payload.
//! [`AppError`] implements [`IntoResponse`], so handlers can return it directly.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::utils::code_generator::CodeError;
use crate::utils::url_normalizer::UrlError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Serializable error payload used in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

/// Application-level error.
///
/// Variants follow the link lifecycle: input problems (`InvalidInput`,
/// `InvalidUrl`, `InvalidCode`), uniqueness (`DuplicateCode`), resolution
/// outcomes (`NotFound`, `Inactive`), concurrent writes (`Conflict`) and
/// storage failures (`Persistence`).
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    InvalidInput { message: String, details: Value },

    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    #[error("{message}")]
    InvalidCode { message: String, details: Value },

    #[error("{message}")]
    DuplicateCode { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Inactive { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    #[error("{message}")]
    Persistence { message: String, details: Value },
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidInput {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }

    pub fn invalid_code(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidCode {
            message: message.into(),
            details,
        }
    }

    pub fn duplicate_code(message: impl Into<String>, details: Value) -> Self {
        Self::DuplicateCode {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn inactive(message: impl Into<String>, details: Value) -> Self {
        Self::Inactive {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn persistence(message: impl Into<String>, details: Value) -> Self {
        Self::Persistence {
            message: message.into(),
            details,
        }
    }

    /// Machine-readable error code used in response bodies.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::InvalidInput { .. } => "invalid_input",
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::InvalidCode { .. } => "invalid_code",
            AppError::DuplicateCode { .. } => "duplicate_code",
            AppError::NotFound { .. } => "not_found",
            AppError::Inactive { .. } => "inactive",
            AppError::Conflict { .. } => "conflict",
            AppError::Persistence { .. } => "persistence_error",
        }
    }

    /// HTTP status the error maps to.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidInput { .. }
            | AppError::InvalidUrl { .. }
            | AppError::InvalidCode { .. } => StatusCode::BAD_REQUEST,
            AppError::DuplicateCode { .. } | AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Inactive { .. } => StatusCode::GONE,
            AppError::Persistence { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Returns true for errors worth retrying (lost revision race, storage hiccup).
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            AppError::Conflict { .. } | AppError::Persistence { .. }
        )
    }

    /// Converts the error into its serializable payload.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::InvalidInput { message, details }
            | AppError::InvalidUrl { message, details }
            | AppError::InvalidCode { message, details }
            | AppError::DuplicateCode { message, details }
            | AppError::NotFound { message, details }
            | AppError::Inactive { message, details }
            | AppError::Conflict { message, details }
            | AppError::Persistence { message, details } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&errors).unwrap_or_else(|_| json!({}));
        AppError::invalid_input("Request validation failed", details)
    }
}

impl From<UrlError> for AppError {
    fn from(e: UrlError) -> Self {
        match e {
            UrlError::Empty => AppError::invalid_input(e.to_string(), json!({ "field": "url" })),
            UrlError::Invalid(ref reason) => {
                AppError::invalid_url("Invalid URL format", json!({ "reason": reason }))
            }
        }
    }
}

impl From<CodeError> for AppError {
    fn from(e: CodeError) -> Self {
        AppError::invalid_code(e.to_string(), json!({ "reason": format!("{:?}", e) }))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::persistence("Serialization error", json!({ "reason": e.to_string() }))
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::persistence("Storage I/O error", json!({ "reason": e.to_string() }))
    }
}
