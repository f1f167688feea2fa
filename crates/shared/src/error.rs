//! Application-wide error types.
//!
//! The back-office API reports failures with a normalized body
//! `{ok: false, code, mensajeError, tips?, details?}`. `AppError` keeps that
//! body intact for the kinds the operator can act on (conflicts, business
//! rules) so callers can drive recovery flows from `code`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias using `AppError`.
pub type AppResult<T> = Result<T, AppError>;

/// Normalized error body returned by the back-office API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Always false on error responses.
    #[serde(default)]
    pub ok: bool,
    /// Machine-readable error code.
    #[serde(default)]
    pub code: Option<String>,
    /// Operator-facing message.
    #[serde(
        default,
        rename = "mensajeError",
        alias = "message",
        alias = "error"
    )]
    pub mensaje_error: Option<String>,
    /// Optional hints for the operator.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tips: Vec<String>,
    /// Code-specific details (e.g. a suggested alternative range).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Builds a body from a code and message.
    #[must_use]
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            ok: false,
            code: Some(code.into()),
            mensaje_error: Some(message.into()),
            tips: Vec::new(),
            details: None,
        }
    }

    /// Operator-facing message, falling back to the code.
    #[must_use]
    pub fn message(&self) -> &str {
        self.mensaje_error
            .as_deref()
            .or(self.code.as_deref())
            .unwrap_or("unknown error")
    }

    /// Returns true if the body carries the given code.
    #[must_use]
    pub fn has_code(&self, code: &str) -> bool {
        self.code.as_deref() == Some(code)
    }
}

/// Application error types.
#[derive(Debug, Clone, Error)]
pub enum AppError {
    /// Client-side validation failed; nothing was sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    Unauthorized(String),

    /// Access denied.
    #[error("Access denied: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Conflict (duplicate entry, overlapping range, dependent records).
    #[error("Conflict: {}", .0.message())]
    Conflict(ErrorBody),

    /// Business rule rejected by the backend.
    #[error("Business rule violation: {}", .0.message())]
    BusinessRule(ErrorBody),

    /// The request did not complete before its timeout.
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Transport-level failure.
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with an unexpected failure status.
    #[error("External service error ({status}): {}", .body.message())]
    ExternalService {
        /// HTTP status returned.
        status: u16,
        /// Normalized error body.
        body: ErrorBody,
    },

    /// Response could not be decoded.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Maps a failure status and normalized body to an error kind.
    #[must_use]
    pub fn from_response(status: u16, body: ErrorBody) -> Self {
        match status {
            400 => Self::Validation(body.message().to_string()),
            401 => Self::Unauthorized(body.message().to_string()),
            403 => Self::Forbidden(body.message().to_string()),
            404 => Self::NotFound(body.message().to_string()),
            409 => Self::Conflict(body),
            422 => Self::BusinessRule(body),
            _ => Self::ExternalService { status, body },
        }
    }

    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Conflict(_) => 409,
            Self::BusinessRule(_) => 422,
            Self::Timeout(_) => 504,
            Self::Network(_) => 503,
            Self::ExternalService { status, .. } => *status,
            Self::Decode(_) | Self::Internal(_) => 500,
        }
    }

    /// Returns the error code for operator notifications.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound(_) => "NOT_FOUND",
            Self::Conflict(_) => "CONFLICT",
            Self::BusinessRule(_) => "BUSINESS_RULE_VIOLATION",
            Self::Timeout(_) => "TIMEOUT",
            Self::Network(_) => "NETWORK_ERROR",
            Self::ExternalService { .. } => "EXTERNAL_SERVICE_ERROR",
            Self::Decode(_) => "DECODE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Returns the backend body when one was preserved.
    #[must_use]
    pub fn body(&self) -> Option<&ErrorBody> {
        match self {
            Self::Conflict(body) | Self::BusinessRule(body) | Self::ExternalService { body, .. } => {
                Some(body)
            }
            _ => None,
        }
    }

    /// Returns true if this is a conflict carrying the given backend code.
    #[must_use]
    pub fn is_conflict_code(&self, code: &str) -> bool {
        matches!(self, Self::Conflict(body) if body.has_code(code))
    }
}
