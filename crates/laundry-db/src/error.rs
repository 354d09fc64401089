//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Postgres / SQLite error (sqlx::Error)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (apps/api) ← Status code + {message, details}                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Database operation errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and for the HTTP status mapping.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `get` on an id that doesn't exist
    /// - A line item names a product that doesn't exist
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A filtered listing matched nothing.
    #[error("{entity} not found")]
    Empty { entity: String },

    /// Input that passed the request checks but cannot be stored, such as
    /// a quantity whose line total overflows. Nothing was written.
    #[error("Rejected: {0}")]
    Rejected(laundry_core::ValidationError),

    /// Foreign key constraint violation.
    ///
    /// ## When This Occurs
    /// - Deleting a customer, employee or product that a transaction uses
    /// - Inserting a line item for a missing transaction
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// An insert pointed at a customer, employee or product that no
    /// longer exists.
    #[error("Referenced row not found: {0}")]
    MissingReference(String),

    /// `DB_CONNECTION` named a driver this build does not speak.
    #[error("Unsupported database driver: {0}")]
    UnsupportedDriver(String),

    /// Database connection failed.
    ///
    /// ## When This Occurs
    /// - Server unreachable or credentials rejected
    /// - SQLite file can't be created
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction begin/commit failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates an Empty error for a listing with no rows.
    pub fn empty(entity: impl Into<String>) -> Self {
        DbError::Empty {
            entity: entity.into(),
        }
    }

    /// Turns a foreign-key violation raised by an insert into
    /// `MissingReference`; other errors pass through.
    pub fn on_insert(self) -> Self {
        match self {
            DbError::ForeignKeyViolation { message } => DbError::MissingReference(message),
            other => other,
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound    → DbError::NotFound
/// sqlx::Error::Database       → Constraint kind, then message sniffing
/// sqlx::Error::PoolTimedOut   → DbError::PoolExhausted
/// Other                       → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message().to_string();

                if matches!(db_err.kind(), ErrorKind::ForeignKeyViolation) {
                    return DbError::ForeignKeyViolation { message: msg };
                }

                // SQLite:   "FOREIGN KEY constraint failed"
                // Postgres: "... violates foreign key constraint ..."
                if msg.contains("FOREIGN KEY constraint failed")
                    || msg.contains("violates foreign key constraint")
                {
                    DbError::ForeignKeyViolation { message: msg }
                } else {
                    DbError::QueryFailed(msg)
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

impl From<laundry_core::ValidationError> for DbError {
    fn from(err: laundry_core::ValidationError) -> Self {
        // Only reachable when a stored date is not yyyy-mm-dd.
        DbError::Internal(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(DbError::not_found("Customer", 4).to_string(), "Customer not found: 4");
        assert_eq!(DbError::empty("Transaction").to_string(), "Transaction not found");
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        assert!(matches!(
            DbError::from(sqlx::Error::RowNotFound),
            DbError::NotFound { .. }
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
    }

    #[test]
    fn test_on_insert_only_rewrites_foreign_key_violations() {
        let fk = DbError::ForeignKeyViolation {
            message: "FOREIGN KEY constraint failed".to_string(),
        };
        assert!(matches!(fk.on_insert(), DbError::MissingReference(_)));
        assert!(matches!(
            DbError::not_found("Product", 3).on_insert(),
            DbError::NotFound { .. }
        ));
    }
}
