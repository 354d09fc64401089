//! # laundry-db: Database Layer for the Laundry Backend
//!
//! This crate provides database access for the laundry backend. One
//! `sqlx::AnyPool` serves PostgreSQL in production and SQLite for local
//! runs and tests.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Laundry Backend Data Flow                        │
//! │                                                                         │
//! │  HTTP handler (POST /transactions)                                      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   laundry-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐   │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │   │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │   │   │
//! │  │   │               │    │ EntityRepo<E>  │   │ postgres/    │   │   │
//! │  │   │ AnyPool       │◄───│ TransactionRepo│   │ sqlite/      │   │   │
//! │  │   │ Driver        │    │ Filter         │   │              │   │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │            PostgreSQL  (DB_CONNECTION=postgres)                 │   │
//! │  │            SQLite      (DB_CONNECTION=sqlite)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`driver`] - Driver selection and dialect differences
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use laundry_db::{Database, DbConfig, TransactionFilter};
//!
//! let db = Database::new(DbConfig::sqlite("./laundry.db")).await?;
//!
//! let customer = db.customers().get(1).await?;
//! let bills = db.transactions().list(&TransactionFilter::default()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod driver;
pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use driver::Driver;
pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::entity::EntityRepository;
pub use repository::filter::TransactionFilter;
pub use repository::record::Record;
pub use repository::transaction::TransactionRepository;
