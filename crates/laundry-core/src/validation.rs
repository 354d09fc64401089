//! # Validation
//!
//! Input checks that need no database: the `dd-mm-yyyy` date format and
//! the shape of a create-transaction request.
//!
//! Referential checks (does customer 3 exist?) live in the API layer
//! because they need storage.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{BillDates, NewTransaction, TransactionRequest};
use crate::{STORAGE_DATE_FORMAT, WIRE_DATE_FORMAT};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const WIRE_DATE_HINT: &str = "expected dd-mm-yyyy";

/// Parses a `dd-mm-yyyy` date.
///
/// The shape is checked strictly (two digit day and month, four digit
/// year) before the calendar check, so `1-3-2024` is rejected.
///
/// ## Example
/// ```rust
/// use laundry_core::validation::parse_wire_date;
///
/// let date = parse_wire_date("entryDate", "29-02-2024").unwrap();
/// assert_eq!(date.to_string(), "2024-02-29");
/// assert!(parse_wire_date("entryDate", "2024-02-29").is_err());
/// ```
pub fn parse_wire_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    let bytes = value.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'-',
            _ => b.is_ascii_digit(),
        });

    if !well_formed {
        return Err(ValidationError::invalid_format(field, WIRE_DATE_HINT));
    }

    NaiveDate::parse_from_str(value, WIRE_DATE_FORMAT)
        .map_err(|e| ValidationError::invalid_format(field, format!("{WIRE_DATE_HINT} ({e})")))
}

/// Parses an optional filter date; empty strings count as absent.
pub fn parse_optional_wire_date(field: &str, value: Option<&str>) -> ValidationResult<Option<NaiveDate>> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => parse_wire_date(field, raw).map(Some),
    }
}

/// Renders a date the way it is stored (`yyyy-mm-dd`).
pub fn to_storage_date(date: NaiveDate) -> String {
    date.format(STORAGE_DATE_FORMAT).to_string()
}

/// Parses a stored `yyyy-mm-dd` date.
pub fn parse_storage_date(field: &str, value: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(value, STORAGE_DATE_FORMAT)
        .map_err(|e| ValidationError::invalid_format(field, e.to_string()))
}

impl TransactionRequest {
    /// Validates the request shape and parses its dates.
    ///
    /// Quantities are passed through as given.
    pub fn validate(self) -> ValidationResult<NewTransaction> {
        if self.bill_details.is_empty() {
            return Err(ValidationError::required("billDetails"));
        }

        let dates = BillDates {
            bill_date: parse_wire_date("billDate", &self.bill_date)?,
            entry_date: parse_wire_date("entryDate", &self.entry_date)?,
            finish_date: parse_wire_date("finishDate", &self.finish_date)?,
        };

        Ok(NewTransaction {
            customer_id: self.customer_id,
            employee_id: self.employee_id,
            dates,
            items: self.bill_details,
        })
    }
}
