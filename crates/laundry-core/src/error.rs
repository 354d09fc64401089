//! # Error Types
//!
//! Domain-specific error types for laundry-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  laundry-core errors (this file)                                        │
//! │  └── ValidationError  - Malformed input (dates, empty bill, overflow)   │
//! │                                                                         │
//! │  laundry-db errors (separate crate)                                     │
//! │  └── DbError          - Not found, constraint and storage failures      │
//! │                                                                         │
//! │  API errors (apps/api)                                                  │
//! │  └── ApiError         - Status code + {message, details} envelope       │
//! │                                                                         │
//! │  Flow: ValidationError / DbError → ApiError → HTTP response             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when request input doesn't meet the wire format.
/// The HTTP layer reports every variant as `400 Bad Request`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., a date that is not dd-mm-yyyy).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A number whose bill arithmetic would overflow.
    #[error("{field} is out of range: {reason}")]
    OutOfRange { field: String, reason: String },
}

impl ValidationError {
    /// Creates an InvalidFormat error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates an OutOfRange error.
    pub fn out_of_range(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a Required error.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::required("billDetails");
        assert_eq!(err.to_string(), "billDetails is required");

        let err = ValidationError::invalid_format("entryDate", "expected dd-mm-yyyy");
        assert_eq!(
            err.to_string(),
            "entryDate has invalid format: expected dd-mm-yyyy"
        );
    }
}
