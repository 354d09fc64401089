//! # Entity Repository
//!
//! One CRUD repository shared by every [`Record`] type. The SQL is
//! generated from the record's table and column list; values always travel
//! as bound parameters.
//!
//! ## Partial Update
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  update(id, patch)                                                      │
//! │                                                                         │
//! │  BEGIN                                                                  │
//! │    SELECT id, <columns> FROM <table> WHERE id = $1   ── none? NotFound  │
//! │    patch.apply(&mut row)        ← blank / zero fields keep stored value │
//! │    UPDATE <table> SET c1 = $2, c2 = $3 ... WHERE id = $1                │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;
use std::marker::PhantomData;

use sqlx::{AnyPool, Row};
use tracing::debug;

use crate::driver::Driver;
use crate::error::{DbError, DbResult};
use crate::repository::record::{BindValues, Record};
use laundry_core::{Patch, Product};

/// Repository for a single-table entity.
///
/// ## Usage
/// ```rust,ignore
/// let customers = db.customers();
/// let created = customers.create(draft).await?;
/// let same = customers.get(created.id).await?;
/// ```
pub struct EntityRepository<E> {
    pool: AnyPool,
    driver: Driver,
    _record: PhantomData<fn() -> E>,
}

impl<E> Clone for EntityRepository<E> {
    fn clone(&self) -> Self {
        EntityRepository {
            pool: self.pool.clone(),
            driver: self.driver,
            _record: PhantomData,
        }
    }
}

impl<E: Record> fmt::Debug for EntityRepository<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityRepository")
            .field("table", &E::TABLE)
            .field("driver", &self.driver)
            .finish()
    }
}

impl<E: Record> EntityRepository<E> {
    /// Creates a new repository over `pool`.
    pub fn new(pool: AnyPool, driver: Driver) -> Self {
        EntityRepository {
            pool,
            driver,
            _record: PhantomData,
        }
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
    }

    /// Inserts a new row and returns it with its generated id.
    pub async fn create(&self, draft: E::Draft) -> DbResult<E> {
        let placeholders: Vec<String> = (1..=E::COLUMNS.len()).map(|i| format!("${i}")).collect();
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING id",
            E::TABLE,
            E::COLUMNS.join(", "),
            placeholders.join(", ")
        );

        let row = sqlx::query(&sql)
            .bind_values(E::draft_values(&draft))
            .fetch_one(&self.pool)
            .await?;
        let id: i64 = row.try_get("id")?;

        debug!(entity = E::ENTITY, id, "Created record");
        Ok(E::from_draft(id, draft))
    }

    /// Lists every row ordered by id.
    pub async fn list(&self) -> DbResult<Vec<E>> {
        let sql = format!("{} ORDER BY id", Self::select_sql());
        let rows = sqlx::query_as::<_, E>(&sql).fetch_all(&self.pool).await?;

        debug!(entity = E::ENTITY, count = rows.len(), "Listed records");
        Ok(rows)
    }

    /// Gets a row by id.
    ///
    /// ## Returns
    /// * `Ok(Some(E))` - Row found
    /// * `Ok(None)` - No row with that id
    pub async fn find(&self, id: i64) -> DbResult<Option<E>> {
        let sql = format!("{} WHERE id = $1", Self::select_sql());
        let row = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    /// Gets a row by id, failing with `NotFound` when it is absent.
    pub async fn get(&self, id: i64) -> DbResult<E> {
        self.find(id)
            .await?
            .ok_or_else(|| DbError::not_found(E::ENTITY, id))
    }

    /// Applies a partial update and returns the stored result.
    ///
    /// The read and the write run in one database transaction so a
    /// concurrent update cannot slip between them.
    pub async fn update(&self, id: i64, patch: E::Patch) -> DbResult<E> {
        let mut tx = self.pool.begin().await?;

        let sql = format!("{} WHERE id = $1", Self::select_sql());
        let mut record = sqlx::query_as::<_, E>(&sql)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found(E::ENTITY, id))?;

        if patch.is_empty() {
            debug!(entity = E::ENTITY, id, "Empty patch, nothing to update");
            tx.commit().await?;
            return Ok(record);
        }

        patch.apply(&mut record);

        let assignments: Vec<String> = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, column)| format!("{column} = ${}", i + 2))
            .collect();
        let sql = format!(
            "UPDATE {} SET {} WHERE id = $1",
            E::TABLE,
            assignments.join(", ")
        );

        sqlx::query(&sql)
            .bind(id)
            .bind_values(record.values())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        debug!(entity = E::ENTITY, id, "Updated record");
        Ok(record)
    }

    /// Returns true when a row with `id` exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let sql = format!("SELECT 1 FROM {} WHERE id = $1 LIMIT 1", E::TABLE);
        let row = sqlx::query(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Returns true when any transaction or line item points at `id`.
    pub async fn is_referenced(&self, id: i64) -> DbResult<bool> {
        for reference in E::REFERENCES {
            let sql = format!(
                "SELECT 1 FROM {} WHERE {} = $1 LIMIT 1",
                reference.table, reference.column
            );
            let row = sqlx::query(&sql)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            if row.is_some() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Deletes a row.
    ///
    /// A row still referenced fails with `ForeignKeyViolation` from the
    /// schema's `ON DELETE RESTRICT`, even if the caller skipped
    /// [`is_referenced`](Self::is_referenced).
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let sql = format!("DELETE FROM {} WHERE id = $1", E::TABLE);
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(E::ENTITY, id));
        }

        debug!(entity = E::ENTITY, id, "Deleted record");
        Ok(())
    }

    /// Counts rows in the table.
    pub async fn count(&self) -> DbResult<i64> {
        let sql = format!("SELECT COUNT(*) AS total FROM {}", E::TABLE);
        let row = sqlx::query(&sql).fetch_one(&self.pool).await?;
        Ok(row.try_get("total")?)
    }
}

impl EntityRepository<Product> {
    /// Products whose name contains `needle` (case-sensitive), ordered by id.
    pub async fn search_by_name(&self, needle: &str) -> DbResult<Vec<Product>> {
        let sql = format!(
            "{} WHERE {} ORDER BY id",
            Self::select_sql(),
            self.driver.contains("name", "$1")
        );
        let products = sqlx::query_as::<_, Product>(&sql)
            .bind(needle.to_string())
            .fetch_all(&self.pool)
            .await?;

        debug!(needle, count = products.len(), "Searched products by name");
        Ok(products)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
