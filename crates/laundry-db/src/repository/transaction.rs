//! # Transaction Repository
//!
//! Database operations for laundry transactions (bills) and their line
//! items.
//!
//! ## Create: One Unit of Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       create(new_transaction)                           │
//! │                                                                         │
//! │  BEGIN ──────────────────────────────── fails → TransactionFailed       │
//! │    customer / employee present? ─────────── no → NotFound (rollback)    │
//! │    for each line item, in request order:                                │
//! │      SELECT price FROM product ─────────── none → NotFound (rollback)   │
//! │    Σ price × qty fits in i64? ───────────── no → Rejected (rollback)    │
//! │    INSERT "transaction" ... RETURNING id                                │
//! │    INSERT transaction_detail (snapshot price, qty) RETURNING id, ...    │
//! │  COMMIT ─────────────────────────────── fails → TransactionFailed       │
//! │                                                                         │
//! │  Any early return drops the open transaction, which rolls it back.      │
//! │  Nothing is read through the pool while the transaction is open.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Read Model
//! ```text
//!   headers ── "transaction" ⋈ customer ⋈ employee     (query 1)
//!   items   ── transaction_detail ⋈ product ⋈ "transaction" (query 2)
//!
//!   both queries share one predicate over `t`; items are grouped by
//!   transaction id in memory and each header keeps only its own items.
//!   A header without items is dropped (inner-join semantics).
//! ```

use std::collections::HashMap;

use sqlx::any::AnyRow;
use sqlx::{AnyPool, Row};
use tracing::{debug, info};

use crate::driver::Driver;
use crate::error::{DbError, DbResult};
use crate::repository::filter::{Predicate, TransactionFilter};
use crate::repository::record::BindValues;
use laundry_core::validation::{parse_storage_date, to_storage_date};
use laundry_core::{
    BillDates, CreatedTransaction, Customer, Employee, LineItem, Money, NewTransaction, Product,
    Transaction, TransactionDetail, TransactionHeader,
};

const HEADER_SELECT: &str = r#"
    SELECT
        t.id,
        t.bill_date,
        t.entry_date,
        t.finish_date,
        c.id AS customer_id,
        c.name AS customer_name,
        c.phone_number AS customer_phone_number,
        c.address AS customer_address,
        e.id AS employee_id,
        e.name AS employee_name,
        e.phone_number AS employee_phone_number,
        e.address AS employee_address
    FROM "transaction" t
    INNER JOIN customer c ON c.id = t.customer_id
    INNER JOIN employee e ON e.id = t.employee_id
"#;

const ITEM_SELECT: &str = r#"
    SELECT
        td.id,
        td.transaction_id,
        td.product_price,
        td.qty,
        p.id AS product_id,
        p.name AS product_name,
        p.unit AS product_unit,
        p.price AS product_current_price
    FROM transaction_detail td
    INNER JOIN product p ON p.id = td.product_id
    INNER JOIN "transaction" t ON t.id = td.transaction_id
"#;

/// Repository for transaction headers and line items.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: AnyPool,
    driver: Driver,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: AnyPool, driver: Driver) -> Self {
        TransactionRepository { pool, driver }
    }

    // =========================================================================
    // Write path
    // =========================================================================

    /// Persists a header and all of its line items atomically.
    ///
    /// Each line item stores the product's price as read inside the same
    /// database transaction. Later price changes never touch it. Every
    /// check runs before the first insert.
    ///
    /// ## Errors
    /// * `NotFound` - customer, employee or a line item's product is missing
    /// * `Rejected` - a line total or the bill total overflows
    /// * `MissingReference` - a referenced row vanished between check and insert
    /// * `TransactionFailed` - begin or commit failed
    pub async fn create(&self, new: &NewTransaction) -> DbResult<CreatedTransaction> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(format!("failed starting transaction, {e}")))?;

        let customer = sqlx::query("SELECT 1 FROM customer WHERE id = $1 LIMIT 1")
            .bind(new.customer_id)
            .fetch_optional(&mut *tx)
            .await?;
        if customer.is_none() {
            return Err(DbError::not_found("Customer", new.customer_id));
        }

        let employee = sqlx::query("SELECT 1 FROM employee WHERE id = $1 LIMIT 1")
            .bind(new.employee_id)
            .fetch_optional(&mut *tx)
            .await?;
        if employee.is_none() {
            return Err(DbError::not_found("Employee", new.employee_id));
        }

        let mut prices = Vec::with_capacity(new.items.len());
        for item in &new.items {
            let price_row = sqlx::query("SELECT price FROM product WHERE id = $1")
                .bind(item.product_id)
                .fetch_optional(&mut *tx)
                .await?
                .ok_or_else(|| DbError::not_found("Product", item.product_id))?;
            let product_price: i64 = price_row.try_get("price")?;
            prices.push(product_price);
        }

        Money::total_of(prices.iter().copied().zip(new.items.iter().map(|item| item.qty)))
            .map_err(DbError::Rejected)?;

        let row = sqlx::query(
            r#"
            INSERT INTO "transaction" (customer_id, employee_id, bill_date, entry_date, finish_date)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(new.customer_id)
        .bind(new.employee_id)
        .bind(to_storage_date(new.dates.bill_date))
        .bind(to_storage_date(new.dates.entry_date))
        .bind(to_storage_date(new.dates.finish_date))
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DbError::from(e).on_insert())?;
        let bill_id: i64 = row.try_get("id")?;

        let mut details = Vec::with_capacity(new.items.len());
        for (item, product_price) in new.items.iter().zip(prices) {
            let row = sqlx::query(
                r#"
                INSERT INTO transaction_detail (transaction_id, product_id, product_price, qty)
                VALUES ($1, $2, $3, $4)
                RETURNING id
                "#,
            )
            .bind(bill_id)
            .bind(item.product_id)
            .bind(product_price)
            .bind(item.qty)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| DbError::from(e).on_insert())?;

            details.push(TransactionDetail {
                id: row.try_get("id")?,
                bill_id,
                product_id: item.product_id,
                product_price,
                qty: item.qty,
            });
        }

        let created = CreatedTransaction::new(bill_id, new, details).map_err(DbError::Rejected)?;

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(format!("failed commit transaction, {e}")))?;

        info!(id = bill_id, items = created.bill_details.len(), "Transaction created");
        Ok(created)
    }

    // =========================================================================
    // Read path
    // =========================================================================

    /// Gets one transaction with its customer, employee and line items.
    ///
    /// ## Errors
    /// * `NotFound { entity: "Transaction" }` - no header with this id
    /// * `NotFound { entity: "Transaction detail" }` - header has no items
    pub async fn get(&self, id: i64) -> DbResult<Transaction> {
        if !self.exists(id).await? {
            return Err(DbError::not_found("Transaction", id));
        }

        let has_items = sqlx::query("SELECT 1 FROM transaction_detail WHERE transaction_id = $1 LIMIT 1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .is_some();
        if !has_items {
            return Err(DbError::not_found("Transaction detail", id));
        }

        let predicate = Predicate::by_id(id);
        let header = self
            .fetch_headers(&predicate)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| DbError::not_found("Transaction", id))?;
        let items = self.fetch_items(&predicate).await?;

        Ok(Transaction::assemble(header, items)?)
    }

    /// Lists transactions matching `filter`, ordered by id.
    ///
    /// ## Errors
    /// * `Empty` - nothing matched
    pub async fn list(&self, filter: &TransactionFilter) -> DbResult<Vec<Transaction>> {
        let predicate = filter.render(self.driver);

        let headers = self.fetch_headers(&predicate).await?;
        let items = self.fetch_items(&predicate).await?;

        let mut by_bill: HashMap<i64, Vec<LineItem>> = HashMap::new();
        for item in items {
            by_bill.entry(item.bill_id).or_default().push(item);
        }

        let mut transactions = Vec::with_capacity(headers.len());
        for header in headers {
            if let Some(items) = by_bill.remove(&header.id) {
                transactions.push(Transaction::assemble(header, items)?);
            }
        }

        debug!(?filter, count = transactions.len(), "Listed transactions");

        if transactions.is_empty() {
            return Err(DbError::empty("Transaction"));
        }
        Ok(transactions)
    }

    /// Returns true when a header with `id` exists.
    pub async fn exists(&self, id: i64) -> DbResult<bool> {
        let row = sqlx::query(r#"SELECT 1 FROM "transaction" WHERE id = $1 LIMIT 1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// Counts transaction headers.
    pub async fn count(&self) -> DbResult<i64> {
        let row = sqlx::query(r#"SELECT COUNT(*) AS total FROM "transaction""#)
            .fetch_one(&self.pool)
            .await?;
        Ok(row.try_get("total")?)
    }

    async fn fetch_headers(&self, predicate: &Predicate) -> DbResult<Vec<TransactionHeader>> {
        let sql = format!("{HEADER_SELECT} {} ORDER BY t.id", predicate.sql);
        let rows = sqlx::query(&sql)
            .bind_values(predicate.values.iter().cloned())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(header_from_row).collect()
    }

    async fn fetch_items(&self, predicate: &Predicate) -> DbResult<Vec<LineItem>> {
        let sql = format!("{ITEM_SELECT} {} ORDER BY td.id", predicate.sql);
        let rows = sqlx::query(&sql)
            .bind_values(predicate.values.iter().cloned())
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(item_from_row).collect()
    }
}

// =============================================================================
// Row mapping
// =============================================================================

fn date_column(row: &AnyRow, column: &str) -> DbResult<chrono::NaiveDate> {
    let raw: String = row.try_get(column)?;
    Ok(parse_storage_date(column, &raw)?)
}

fn header_from_row(row: &AnyRow) -> DbResult<TransactionHeader> {
    Ok(TransactionHeader {
        id: row.try_get("id")?,
        dates: BillDates {
            bill_date: date_column(row, "bill_date")?,
            entry_date: date_column(row, "entry_date")?,
            finish_date: date_column(row, "finish_date")?,
        },
        customer: Customer {
            id: row.try_get("customer_id")?,
            name: row.try_get("customer_name")?,
            phone_number: row.try_get("customer_phone_number")?,
            address: row.try_get("customer_address")?,
        },
        employee: Employee {
            id: row.try_get("employee_id")?,
            name: row.try_get("employee_name")?,
            phone_number: row.try_get("employee_phone_number")?,
            address: row.try_get("employee_address")?,
        },
    })
}

fn item_from_row(row: &AnyRow) -> DbResult<LineItem> {
    Ok(LineItem {
        id: row.try_get("id")?,
        bill_id: row.try_get("transaction_id")?,
        product: Product {
            id: row.try_get("product_id")?,
            name: row.try_get("product_name")?,
            unit: row.try_get("product_unit")?,
            price: row.try_get("product_current_price")?,
        },
        product_price: row.try_get("product_price")?,
        qty: row.try_get("qty")?,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use laundry_core::{ContactDraft, LineItemRequest, ProductDraft, ProductPatch};

    struct Fixture {
        db: Database,
        customer: i64,
        employee: i64,
        shirt: i64,
        bed_cover: i64,
    }

    fn contact(name: &str) -> ContactDraft {
        ContactDraft {
            name: name.to_string(),
            phone_number: "0811".to_string(),
            address: "Jakarta".to_string(),
        }
    }

    fn product(name: &str, unit: &str, price: i64) -> ProductDraft {
        ProductDraft {
            name: name.to_string(),
            unit: unit.to_string(),
            price,
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    async fn fixture() -> Fixture {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = db.customers().create(contact("Jessica")).await.unwrap().id;
        let employee = db.employees().create(contact("Budi")).await.unwrap().id;
        let shirt = db
            .products()
            .create(product("Shirt Wash", "pcs", 5000))
            .await
            .unwrap()
            .id;
        let bed_cover = db
            .products()
            .create(product("Bed Cover", "pcs", 25000))
            .await
            .unwrap()
            .id;

        Fixture {
            db,
            customer,
            employee,
            shirt,
            bed_cover,
        }
    }

    fn bill(f: &Fixture, entry: NaiveDate, finish: NaiveDate, items: &[(i64, i64)]) -> NewTransaction {
        NewTransaction {
            customer_id: f.customer,
            employee_id: f.employee,
            dates: BillDates {
                bill_date: entry,
                entry_date: entry,
                finish_date: finish,
            },
            items: items
                .iter()
                .map(|&(product_id, qty)| LineItemRequest { product_id, qty })
                .collect(),
        }
    }

    async fn detail_rows(db: &Database) -> i64 {
        let row = sqlx::query("SELECT COUNT(*) AS total FROM transaction_detail")
            .fetch_one(db.pool())
            .await
            .unwrap();
        row.try_get("total").unwrap()
    }

    #[tokio::test]
    async fn test_create_snapshots_prices_and_totals() {
        let f = fixture().await;
        let repo = f.db.transactions();

        let created = repo
            .create(&bill(&f, date(2024, 3, 1), date(2024, 3, 3), &[(f.shirt, 2), (f.bed_cover, 1)]))
            .await
            .unwrap();

        assert_eq!(created.bill_details.len(), 2);
        assert!(created.bill_details.iter().all(|d| d.bill_id == created.id));
        assert_eq!(created.bill_details[0].product_price, 5000);
        assert_eq!(created.total_bill.amount(), 35000);
        assert_eq!(detail_rows(&f.db).await, 2);
    }

    #[tokio::test]
    async fn test_missing_product_rolls_back_everything() {
        let f = fixture().await;
        let repo = f.db.transactions();

        let err = repo
            .create(&bill(&f, date(2024, 3, 1), date(2024, 3, 3), &[(f.shirt, 1), (9999, 1)]))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Product"));
        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(detail_rows(&f.db).await, 0);
    }

    #[tokio::test]
    async fn test_overflowing_quantity_writes_nothing() {
        let f = fixture().await;
        let repo = f.db.transactions();

        let err = repo
            .create(&bill(&f, date(2024, 3, 1), date(2024, 3, 3), &[(f.shirt, i64::MAX)]))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Rejected(_)));

        // each line fits, the sum does not
        let err = repo
            .create(&bill(
                &f,
                date(2024, 3, 1),
                date(2024, 3, 3),
                &[(f.bed_cover, i64::MAX / 25000), (f.shirt, i64::MAX / 5000)],
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Rejected(_)));

        assert_eq!(repo.count().await.unwrap(), 0);
        assert_eq!(detail_rows(&f.db).await, 0);
    }

    #[tokio::test]
    async fn test_missing_customer_or_employee_is_not_found() {
        let f = fixture().await;
        let repo = f.db.transactions();

        let mut new = bill(&f, date(2024, 3, 1), date(2024, 3, 3), &[(f.shirt, 1)]);
        new.customer_id = 404;
        let err = repo.create(&new).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Customer"));

        let mut new = bill(&f, date(2024, 3, 1), date(2024, 3, 3), &[(f.shirt, 1)]);
        new.employee_id = 404;
        let err = repo.create(&new).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Employee"));

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_header_without_items_is_hidden() {
        let f = fixture().await;
        let repo = f.db.transactions();

        sqlx::query(
            r#"
            INSERT INTO "transaction" (customer_id, employee_id, bill_date, entry_date, finish_date)
            VALUES ($1, $2, '2024-03-01', '2024-03-01', '2024-03-03')
            "#,
        )
        .bind(f.customer)
        .bind(f.employee)
        .execute(f.db.pool())
        .await
        .unwrap();
        assert_eq!(repo.count().await.unwrap(), 1);

        let bare = sqlx::query(r#"SELECT id FROM "transaction""#)
            .fetch_one(f.db.pool())
            .await
            .unwrap();
        let id: i64 = bare.try_get("id").unwrap();

        let err = repo.get(id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Transaction detail"));

        assert!(matches!(
            repo.list(&TransactionFilter::default()).await,
            Err(DbError::Empty { .. })
        ));

        // a full bill next to it is still listed on its own
        let full = repo
            .create(&bill(&f, date(2024, 3, 2), date(2024, 3, 4), &[(f.shirt, 1)]))
            .await
            .unwrap();
        let listed = repo.list(&TransactionFilter::default()).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, full.id);
    }

    #[tokio::test]
    async fn test_price_change_does_not_touch_existing_bill() {
        let f = fixture().await;
        let repo = f.db.transactions();
        let created = repo
            .create(&bill(&f, date(2024, 3, 1), date(2024, 3, 3), &[(f.shirt, 3)]))
            .await
            .unwrap();

        f.db.products()
            .update(
                f.shirt,
                ProductPatch {
                    price: Some(9000),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let view = repo.get(created.id).await.unwrap();
        assert_eq!(view.bill_details[0].product_price, 5000);
        assert_eq!(view.bill_details[0].product.price, 9000);
        assert_eq!(view.total_bill.amount(), 15000);
        assert_eq!(view.customer.name, "Jessica");
        assert_eq!(view.employee.name, "Budi");
    }

    #[tokio::test]
    async fn test_get_missing_transaction() {
        let f = fixture().await;
        let err = f.db.transactions().get(77).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Transaction"));
    }

    #[tokio::test]
    async fn test_referenced_rows_cannot_be_deleted() {
        let f = fixture().await;
        f.db.transactions()
            .create(&bill(&f, date(2024, 3, 1), date(2024, 3, 3), &[(f.shirt, 1)]))
            .await
            .unwrap();

        assert!(f.db.customers().is_referenced(f.customer).await.unwrap());
        assert!(f.db.employees().is_referenced(f.employee).await.unwrap());
        assert!(f.db.products().is_referenced(f.shirt).await.unwrap());
        assert!(!f.db.products().is_referenced(f.bed_cover).await.unwrap());

        // The schema refuses even without the explicit check.
        let err = f.db.customers().delete(f.customer).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert!(f.db.customers().exists(f.customer).await.unwrap());

        let err = f.db.products().delete(f.shirt).await.unwrap_err();
        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));

        f.db.products().delete(f.bed_cover).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_applies_all_filters() {
        let f = fixture().await;
        let repo = f.db.transactions();

        // entry 2023, outside the start bound
        repo.create(&bill(&f, date(2023, 12, 30), date(2024, 1, 2), &[(f.shirt, 1)]))
            .await
            .unwrap();
        // matches every filter
        let hit = repo
            .create(&bill(&f, date(2024, 5, 1), date(2024, 5, 3), &[(f.shirt, 2), (f.bed_cover, 1)]))
            .await
            .unwrap();
        // no shirt
        repo.create(&bill(&f, date(2024, 6, 1), date(2024, 6, 3), &[(f.bed_cover, 1)]))
            .await
            .unwrap();
        // finishes after the end bound
        repo.create(&bill(&f, date(2024, 12, 30), date(2025, 1, 2), &[(f.shirt, 1)]))
            .await
            .unwrap();

        let filter = TransactionFilter {
            start_date: Some(date(2024, 1, 1)),
            end_date: Some(date(2024, 12, 31)),
            product_name: Some("Shirt".to_string()),
        };
        let found = repo.list(&filter).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, hit.id);
        // the whole bill comes back, not only the matching line
        assert_eq!(found[0].bill_details.len(), 2);
        assert_eq!(found[0].total_bill.amount(), 35000);

        let all = repo.list(&TransactionFilter::default()).await.unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[tokio::test]
    async fn test_list_without_matches_is_empty_error() {
        let f = fixture().await;
        let repo = f.db.transactions();

        assert!(matches!(
            repo.list(&TransactionFilter::default()).await,
            Err(DbError::Empty { .. })
        ));

        repo.create(&bill(&f, date(2024, 3, 1), date(2024, 3, 3), &[(f.shirt, 1)]))
            .await
            .unwrap();
        let filter = TransactionFilter {
            product_name: Some("shirt".to_string()),
            ..Default::default()
        };
        assert!(matches!(repo.list(&filter).await, Err(DbError::Empty { .. })));
    }
}
