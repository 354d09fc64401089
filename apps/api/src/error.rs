//! # API Error Type
//!
//! Unified error type for HTTP handlers.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Laundry API                        │
//! │                                                                         │
//! │  Handler returns Result<T, ApiError>                                    │
//! │         │                                                               │
//! │         ├── Bad JSON / bad id / bad query ── Rejection ───────┐         │
//! │         ├── ValidationError / DbError::Rejected ──────────────┤         │
//! │         ├── DbError::NotFound / Empty / MissingReference ─────┤         │
//! │         ├── DbError::ForeignKeyViolation ─────────────────────┤         │
//! │         └── any other DbError ─── logged with error! ─────────┤         │
//! │                                                               ▼         │
//! │                                                          ApiError       │
//! │                                                               │         │
//! │     400 InvalidInput · 404 NotFound · 409 Conflict · 500 Storage        │
//! │                                                               │         │
//! │                                    {"message": ..., "details": ...}     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use laundry_core::ValidationError;
use laundry_db::DbError;

/// Result type for handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// API error returned from handlers.
///
/// ## Serialization
/// This is what the client receives when a request fails:
/// ```json
/// {
///   "message": "Customer not found",
///   "details": "Customer not found: 12"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Category, decides the status code
    pub code: ErrorCode,

    /// Human-readable error message
    pub message: String,

    /// Underlying error text
    pub details: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Malformed input (400)
    InvalidInput,

    /// Resource not found (404)
    NotFound,

    /// Delete blocked by a reference (409)
    Conflict,

    /// Database operation failed (500)
    StorageFailure,
}

impl ErrorCode {
    /// HTTP status for this category.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorCode::InvalidInput => StatusCode::BAD_REQUEST,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::StorageFailure => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    details: &'a str,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>, details: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
            details: details.into(),
        }
    }

    /// Creates a 400 error.
    pub fn invalid_input(message: impl Into<String>, details: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidInput, message, details)
    }

    /// Creates a 404 error for `entity` with `id`.
    pub fn not_found(entity: &str, id: i64) -> Self {
        ApiError::new(
            ErrorCode::NotFound,
            format!("{} not found", entity.to_lowercase()),
            format!("{entity} not found: {id}"),
        )
    }

    /// Creates a 409 error.
    pub fn conflict(message: impl Into<String>, details: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Conflict, message, details)
    }

    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        self.code.status()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.message, self.details)
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            message: &self.message,
            details: &self.details,
        };
        (self.status(), Json(body)).into_response()
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        let details = err.to_string();
        match err {
            DbError::NotFound { entity, .. } | DbError::Empty { entity } => ApiError::new(
                ErrorCode::NotFound,
                format!("{} not found", entity.to_lowercase()),
                details,
            ),
            DbError::MissingReference(_) => {
                ApiError::new(ErrorCode::NotFound, "referenced data not found", details)
            }
            DbError::Rejected(err) => ApiError::from(err),
            DbError::ForeignKeyViolation { .. } => {
                ApiError::conflict("Data is being used in transaction", details)
            }
            DbError::TransactionFailed(_) => {
                tracing::error!("Transaction failed: {}", details);
                ApiError::new(ErrorCode::StorageFailure, "Database transaction failed", details)
            }
            DbError::UnsupportedDriver(_)
            | DbError::ConnectionFailed(_)
            | DbError::MigrationFailed(_)
            | DbError::QueryFailed(_)
            | DbError::PoolExhausted
            | DbError::Internal(_) => {
                tracing::error!("Database operation failed: {}", details);
                ApiError::new(ErrorCode::StorageFailure, "Database operation failed", details)
            }
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        let message = match &err {
            ValidationError::InvalidFormat { field, .. } => {
                format!("Failed convert {field}. Make sure {field} format is dd-MM-yyyy")
            }
            ValidationError::Required { .. } => "Invalid Input".to_string(),
            ValidationError::OutOfRange { field, .. } => {
                format!("Invalid Input. {field} is too large")
            }
        };
        ApiError::invalid_input(message, err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_input("Invalid Input", rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::invalid_input(
            "Failed convert id. Make sure id is number",
            rejection.body_text(),
        )
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::invalid_input("Invalid query parameters", rejection.body_text())
    }
}
