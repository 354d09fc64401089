//! # Transaction Filters
//!
//! Renders the optional listing filters into one SQL predicate over the
//! transaction alias `t`. The header query and the line-item query share
//! the predicate, so both see the same set of transactions.
//!
//! ```text
//!   startDate   → t.entry_date  >= $n
//!   endDate     → t.finish_date <= $n
//!   productName → EXISTS (line item of t whose product name contains $n)
//! ```
//!
//! Dates are stored as `yyyy-mm-dd` text, which orders the same way as the
//! calendar.

use chrono::NaiveDate;

use crate::driver::Driver;
use crate::repository::record::Value;
use laundry_core::validation::to_storage_date;

/// Optional filters for listing transactions. All present filters must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionFilter {
    /// Lower bound on the entry date (inclusive).
    pub start_date: Option<NaiveDate>,
    /// Upper bound on the finish date (inclusive).
    pub end_date: Option<NaiveDate>,
    /// Case-sensitive substring of a line item's product name.
    pub product_name: Option<String>,
}

/// A rendered `WHERE` clause and the values for its placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    pub sql: String,
    pub values: Vec<Value>,
}

impl Predicate {
    /// Predicate matching a single transaction id.
    pub fn by_id(id: i64) -> Self {
        Predicate {
            sql: "WHERE t.id = $1".to_string(),
            values: vec![Value::Int(id)],
        }
    }
}

impl TransactionFilter {
    fn product_name(&self) -> Option<&str> {
        self.product_name.as_deref().map(str::trim).filter(|name| !name.is_empty())
    }

    /// Renders the filter; an empty filter renders an empty clause.
    pub fn render(&self, driver: Driver) -> Predicate {
        let mut clauses = Vec::new();
        let mut values = Vec::new();

        if let Some(start) = self.start_date {
            values.push(Value::Text(to_storage_date(start)));
            clauses.push(format!("t.entry_date >= ${}", values.len()));
        }

        if let Some(end) = self.end_date {
            values.push(Value::Text(to_storage_date(end)));
            clauses.push(format!("t.finish_date <= ${}", values.len()));
        }

        if let Some(name) = self.product_name() {
            values.push(Value::Text(name.to_string()));
            let placeholder = format!("${}", values.len());
            clauses.push(format!(
                "EXISTS (SELECT 1 FROM transaction_detail fd \
                 INNER JOIN product fp ON fp.id = fd.product_id \
                 WHERE fd.transaction_id = t.id AND {})",
                driver.contains("fp.name", &placeholder)
            ));
        }

        if clauses.is_empty() {
            return Predicate::default();
        }

        Predicate {
            sql: format!("WHERE {}", clauses.join(" AND ")),
            values,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_filter_renders_nothing() {
        assert_eq!(TransactionFilter::default().render(Driver::Sqlite), Predicate::default());

        let filter = TransactionFilter {
            product_name: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(filter.render(Driver::Sqlite), Predicate::default());
    }

    #[test]
    fn test_placeholders_follow_present_filters() {
        let filter = TransactionFilter {
            start_date: None,
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31),
            product_name: Some("Shirt".to_string()),
        };

        let predicate = filter.render(Driver::Postgres);
        assert!(predicate.sql.starts_with("WHERE t.finish_date <= $1 AND EXISTS"));
        assert!(predicate.sql.contains("strpos(fp.name, $2) > 0"));
        assert_eq!(
            predicate.values,
            vec![
                Value::Text("2024-12-31".to_string()),
                Value::Text("Shirt".to_string())
            ]
        );
    }

    #[test]
    fn test_values_are_never_inlined() {
        let filter = TransactionFilter {
            product_name: Some("x') OR 1=1 --".to_string()),
            ..Default::default()
        };
        let predicate = filter.render(Driver::Sqlite);
        assert!(!predicate.sql.contains("OR 1=1"));
    }
}
