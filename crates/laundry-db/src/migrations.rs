//! # Database Migrations
//!
//! Embedded SQL schema for the laundry backend, one directory per driver.
//!
//! ## How Migrations Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Migration Process                                  │
//! │                                                                         │
//! │  Service startup                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Pick migrator for the driver                                           │
//! │       ├── Postgres → migrations/postgres/                               │
//! │       └── SQLite   → migrations/sqlite/                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Compare embedded migrations vs _sqlx_migrations                        │
//! │       │                                                                 │
//! │       └── 001_initial_schema.sql  (customer, employee, product,         │
//! │                                    transaction, transaction_detail)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Run pending migrations in order, record checksums                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Adding New Migrations
//!
//! 1. Add `NNN_description.sql` to BOTH `migrations/postgres/` and `migrations/sqlite/`
//! 2. Keep the two files equivalent; only column types may differ
//! 3. **NEVER** modify existing migrations - always add new ones

use sqlx::migrate::Migrator;
use sqlx::AnyPool;
use tracing::info;

use crate::driver::Driver;
use crate::error::DbResult;

/// Schema for PostgreSQL (`BIGSERIAL` keys).
static POSTGRES_MIGRATOR: Migrator = sqlx::migrate!("../../migrations/postgres");

/// Schema for SQLite (`INTEGER PRIMARY KEY AUTOINCREMENT` keys).
static SQLITE_MIGRATOR: Migrator = sqlx::migrate!("../../migrations/sqlite");

fn migrator(driver: Driver) -> &'static Migrator {
    match driver {
        Driver::Postgres => &POSTGRES_MIGRATOR,
        Driver::Sqlite => &SQLITE_MIGRATOR,
    }
}

/// Runs all pending database migrations for `driver`.
///
/// Idempotent: already-applied migrations are skipped.
///
/// ## Example
/// ```rust,ignore
/// run_migrations(&pool, Driver::Sqlite).await?;
/// ```
pub async fn run_migrations(pool: &AnyPool, driver: Driver) -> DbResult<()> {
    info!(%driver, "Checking for pending migrations");

    migrator(driver).run(pool).await?;

    info!("All migrations applied successfully");
    Ok(())
}

/// Returns information about migrations.
///
/// ## Returns
/// Tuple of (total_migrations, applied_migrations)
pub async fn migration_status(pool: &AnyPool, driver: Driver) -> DbResult<(usize, usize)> {
    let total = migrator(driver).migrations.len();

    let applied: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
        .fetch_one(pool)
        .await?;

    Ok((total, applied as usize))
}
