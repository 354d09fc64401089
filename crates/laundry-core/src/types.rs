//! # Domain Types
//!
//! Core domain types used throughout the laundry backend.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Customer     │   │    Employee     │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id             │   │  id             │       │
//! │  │  name           │   │  name           │   │  name           │       │
//! │  │  phone_number   │   │  phone_number   │   │  unit           │       │
//! │  │  address        │   │  address        │   │  price          │       │
//! │  └────────▲────────┘   └────────▲────────┘   └────────▲────────┘       │
//! │           │                     │                     │                 │
//! │  ┌────────┴─────────────────────┴──┐   ┌──────────────┴──────────┐     │
//! │  │  Transaction (header)           │   │  TransactionDetail      │     │
//! │  │  bill / entry / finish date     │◄──│  product_price snapshot │     │
//! │  │  totalBill (derived)            │1 n│  qty                    │     │
//! │  └─────────────────────────────────┘   └─────────────────────────┘     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Shape
//! All types serialize with camelCase field names (`phoneNumber`,
//! `billDetails`, `totalBill`) and dates as `dd-mm-yyyy`.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::money::Money;
use crate::validation::ValidationResult;
use crate::WIRE_DATE_FORMAT;

// =============================================================================
// Customer / Employee
// =============================================================================

/// A laundry customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub address: String,
}

/// A shop employee who receives orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i64,
    pub name: String,
    pub phone_number: String,
    pub address: String,
}

/// Body of `POST /customers` and `POST /employees`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDraft {
    pub name: String,
    pub phone_number: String,
    pub address: String,
}

impl Customer {
    /// Builds a customer from a draft and its generated id.
    pub fn from_draft(id: i64, draft: ContactDraft) -> Self {
        Customer {
            id,
            name: draft.name,
            phone_number: draft.phone_number,
            address: draft.address,
        }
    }
}

impl Employee {
    /// Builds an employee from a draft and its generated id.
    pub fn from_draft(id: i64, draft: ContactDraft) -> Self {
        Employee {
            id,
            name: draft.name,
            phone_number: draft.phone_number,
            address: draft.address,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A laundry service on the price list ("Cuci + Setrika", per kg).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Unit the price applies to ("kg", "pcs", ...).
    pub unit: String,
    /// Current price. Line items copy it at creation time.
    pub price: i64,
}

/// Body of `POST /products`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub unit: String,
    pub price: i64,
}

impl Product {
    /// Builds a product from a draft and its generated id.
    pub fn from_draft(id: i64, draft: ProductDraft) -> Self {
        Product {
            id,
            name: draft.name,
            unit: draft.unit,
            price: draft.price,
        }
    }
}

// =============================================================================
// Transaction Write Model
// =============================================================================

/// Reads an id sent either as a JSON number (`3`) or as a numeric
/// string (`"3"`). Older clients send the string form.
fn deserialize_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(id) => Ok(id),
        RawId::Text(raw) => raw
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid id {raw:?}"))),
    }
}

/// One `{productId, qty}` entry of a create-transaction request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemRequest {
    #[serde(deserialize_with = "deserialize_id")]
    pub product_id: i64,
    pub qty: i64,
}

/// Body of `POST /transactions`, before validation.
///
/// Dates are still raw strings here; [`TransactionRequest::validate`]
/// turns this into a [`NewTransaction`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRequest {
    #[serde(deserialize_with = "deserialize_id")]
    pub customer_id: i64,
    #[serde(deserialize_with = "deserialize_id")]
    pub employee_id: i64,
    pub bill_date: String,
    pub entry_date: String,
    pub finish_date: String,
    #[serde(default)]
    pub bill_details: Vec<LineItemRequest>,
}

impl TransactionRequest {
    /// Distinct product ids in first-seen order.
    pub fn product_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = Vec::with_capacity(self.bill_details.len());
        for item in &self.bill_details {
            if !ids.contains(&item.product_id) {
                ids.push(item.product_id);
            }
        }
        ids
    }
}

/// A validated transaction ready to be persisted as one unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTransaction {
    pub customer_id: i64,
    pub employee_id: i64,
    pub dates: BillDates,
    /// Never empty.
    pub items: Vec<LineItemRequest>,
}


/// The three dates carried by every transaction header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDates {
    #[serde(serialize_with = "serialize_wire_date")]
    pub bill_date: NaiveDate,
    #[serde(serialize_with = "serialize_wire_date")]
    pub entry_date: NaiveDate,
    #[serde(serialize_with = "serialize_wire_date")]
    pub finish_date: NaiveDate,
}

fn serialize_wire_date<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(&date.format(WIRE_DATE_FORMAT))
}

// =============================================================================
// Transaction Detail (line item as stored)
// =============================================================================

/// A persisted line item, as returned from `POST /transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDetail {
    pub id: i64,
    /// Owning transaction id.
    pub bill_id: i64,
    pub product_id: i64,
    /// Product price at the moment the line item was created (frozen).
    pub product_price: i64,
    pub qty: i64,
}

/// Response payload of a successful create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedTransaction {
    pub id: i64,
    pub customer_id: i64,
    pub employee_id: i64,
    #[serde(flatten)]
    pub dates: BillDates,
    pub bill_details: Vec<TransactionDetail>,
    pub total_bill: Money,
}

impl CreatedTransaction {
    /// Assembles the create response, computing the total from the snapshots.
    pub fn new(
        id: i64,
        request: &NewTransaction,
        bill_details: Vec<TransactionDetail>,
    ) -> ValidationResult<Self> {
        let total_bill = Money::total_of(bill_details.iter().map(|d| (d.product_price, d.qty)))?;
        Ok(CreatedTransaction {
            id,
            customer_id: request.customer_id,
            employee_id: request.employee_id,
            dates: request.dates,
            bill_details,
            total_bill,
        })
    }
}

// =============================================================================
// Transaction Read Model
// =============================================================================

/// A line item enriched with its full product record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: i64,
    pub bill_id: i64,
    pub product: Product,
    /// Snapshot price; `product.price` is today's price and may differ.
    pub product_price: i64,
    pub qty: i64,
}

/// Header row joined with its customer and employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionHeader {
    pub id: i64,
    pub dates: BillDates,
    pub customer: Customer,
    pub employee: Employee,
}

/// The nested transaction read model served by `GET /transactions`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: i64,
    #[serde(flatten)]
    pub dates: BillDates,
    pub employee: Employee,
    pub customer: Customer,
    pub bill_details: Vec<LineItem>,
    /// Σ snapshot price × qty, recomputed on every read.
    pub total_bill: Money,
}

impl Transaction {
    /// Joins a header with its line items and computes the bill total.
    pub fn assemble(header: TransactionHeader, bill_details: Vec<LineItem>) -> ValidationResult<Self> {
        let total_bill = Money::total_of(bill_details.iter().map(|d| (d.product_price, d.qty)))?;
        Ok(Transaction {
            id: header.id,
            dates: header.dates,
            employee: header.employee,
            customer: header.customer,
            bill_details,
            total_bill,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
