//! Console error types with HTTP status code mapping.
//!
//! [`ConsoleError`] is the central error type for the gateway. Each variant
//! maps to a specific HTTP status code and structured JSON error response.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

/// Structured JSON error response body.
///
/// All error responses follow this shape:
/// ```json
/// {
///   "error": {
///     "code": 2003,
///     "message": "conflict: withdrawal w-1 is broadcasting, only failed withdrawals can be retried",
///     "details": null
///   }
/// }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Structured error payload.
    pub error: ErrorBody,
}

/// Inner error body with numeric code and human-readable message.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorBody {
    /// Numeric error code (see code ranges on [`ConsoleError`]).
    pub code: u32,
    /// Human-readable error message.
    pub message: String,
    /// Optional additional details.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Gateway error enum with HTTP status code mapping.
///
/// # Error Code Ranges
///
/// | Range     | Category        | HTTP Status                   |
/// |-----------|-----------------|-------------------------------|
/// | 1000–1999 | Validation      | 400 Bad Request               |
/// | 2000–2999 | State/Not Found | 404 Not Found / 409 Conflict  |
/// | 3000–3999 | Server          | 500 Internal Server Error     |
/// | 5000–5999 | Upstream        | mirrored 4xx / 502 / 504      |
#[derive(Debug, thiserror::Error)]
pub enum ConsoleError {
    /// Request body or path validation failed.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Query-string parameter could not be interpreted.
    #[error("invalid query parameter: {0}")]
    InvalidQuery(String),

    /// Entity with the given identifier was not found.
    #[error("{resource} not found: {id}")]
    NotFound {
        /// Resource name (e.g. `"withdrawal"`).
        resource: &'static str,
        /// Identifier that was looked up.
        id: String,
    },

    /// The requested action does not apply to the entity's current state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend answered with a non-2xx status.
    #[error("backend returned {status}: {message}")]
    Upstream {
        /// HTTP status code returned by the backend.
        status: u16,
        /// Message extracted from the backend response body.
        message: String,
    },

    /// The backend could not be reached.
    #[error("backend unreachable: {0}")]
    Transport(String),

    /// The backend did not answer in time.
    #[error("backend timed out: {0}")]
    Timeout(String),

    /// A backend response body did not match the expected shape.
    #[error("malformed backend response: {0}")]
    Decode(String),

    /// CSV export failed.
    #[error("export failed: {0}")]
    Export(String),

    /// Configuration could not be loaded.
    #[error("configuration error: {0}")]
    Config(String),

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ConsoleError {
    /// Returns the numeric error code for this variant.
    #[must_use]
    pub const fn error_code(&self) -> u32 {
        match self {
            Self::InvalidRequest(_) => 1001,
            Self::InvalidQuery(_) => 1002,
            Self::NotFound { .. } => 2001,
            Self::Conflict(_) => 2003,
            Self::Internal(_) => 3000,
            Self::Export(_) => 3001,
            Self::Config(_) => 3002,
            Self::Upstream { .. } => 5001,
            Self::Transport(_) => 5002,
            Self::Timeout(_) => 5003,
            Self::Decode(_) => 5004,
        }
    }

    /// Returns the HTTP status code for this variant.
    ///
    /// Backend 4xx responses are mirrored so the console can tell a
    /// rejected mutation from an outage; backend 5xx become 502.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::InvalidQuery(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Upstream { status, .. } if (400..500).contains(status) => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
            Self::Upstream { .. } | Self::Transport(_) | Self::Decode(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Export(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<reqwest::Error> for ConsoleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ConsoleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

impl From<csv::Error> for ConsoleError {
    fn from(err: csv::Error) -> Self {
        Self::Export(err.to_string())
    }
}

impl IntoResponse for ConsoleError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::warn!(code = self.error_code(), error = %self, "request failed");
        }
        let body = ErrorResponse {
            error: ErrorBody {
                code: self.error_code(),
                message: self.to_string(),
                details: None,
            },
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}
