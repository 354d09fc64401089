//! # Record Trait
//!
//! Describes a single-table entity well enough for [`EntityRepository`]
//! to generate its SQL.
//!
//! ```text
//! ┌────────────────────┬──────────────────┬──────────────────────────────┐
//! │ Record             │ TABLE            │ referenced by                │
//! ├────────────────────┼──────────────────┼──────────────────────────────┤
//! │ Customer           │ customer         │ "transaction".customer_id    │
//! │ Employee           │ employee         │ "transaction".employee_id    │
//! │ Product            │ product          │ transaction_detail.product_id│
//! └────────────────────┴──────────────────┴──────────────────────────────┘
//! ```
//!
//! [`EntityRepository`]: super::entity::EntityRepository

use serde::de::DeserializeOwned;
use serde::Serialize;
use sqlx::any::{AnyArguments, AnyRow};
use sqlx::query::{Query, QueryAs};
use sqlx::{Any, FromRow};

use laundry_core::{
    ContactDraft, ContactPatch, Customer, Employee, Patch, Product, ProductDraft, ProductPatch,
};

/// A column in another table that points at a record's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reference {
    pub table: &'static str,
    pub column: &'static str,
}

/// A value bound to a `$n` placeholder.
///
/// The `Any` driver only moves a handful of types; every column in this
/// schema is either an integer or text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Int(i64),
    Text(String),
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Int(value)
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

/// Binds [`Value`]s onto a query in placeholder order.
pub trait BindValues: Sized {
    fn bind_value(self, value: Value) -> Self;

    fn bind_values(self, values: impl IntoIterator<Item = Value>) -> Self {
        values.into_iter().fold(self, Self::bind_value)
    }
}

impl<'q> BindValues for Query<'q, Any, AnyArguments<'q>> {
    fn bind_value(self, value: Value) -> Self {
        match value {
            Value::Int(v) => self.bind(v),
            Value::Text(v) => self.bind(v),
        }
    }
}

impl<'q, O> BindValues for QueryAs<'q, Any, O, AnyArguments<'q>> {
    fn bind_value(self, value: Value) -> Self {
        match value {
            Value::Int(v) => self.bind(v),
            Value::Text(v) => self.bind(v),
        }
    }
}

/// A row type stored in a single table with an integer `id` key.
pub trait Record:
    Serialize + for<'r> FromRow<'r, AnyRow> + Send + Sync + Unpin + Clone + 'static
{
    /// Create payload (every column but `id`).
    type Draft: DeserializeOwned + Send + Sync + 'static;

    /// Partial-update payload.
    type Patch: Patch<Self> + DeserializeOwned + Default + Send + 'static;

    /// Table name, quoted if it is a keyword.
    const TABLE: &'static str;

    /// Name used in error messages ("Customer not found: 3").
    const ENTITY: &'static str;

    /// Non-key columns, in the order of [`Record::values`].
    const COLUMNS: &'static [&'static str];

    /// Columns elsewhere that block deleting this record.
    const REFERENCES: &'static [Reference];

    fn id(&self) -> i64;

    fn from_draft(id: i64, draft: Self::Draft) -> Self;

    /// Draft values in [`Record::COLUMNS`] order.
    fn draft_values(draft: &Self::Draft) -> Vec<Value>;

    /// Current values in [`Record::COLUMNS`] order.
    fn values(&self) -> Vec<Value>;
}

// =============================================================================
// Implementations
// =============================================================================

const CONTACT_COLUMNS: &[&str] = &["name", "phone_number", "address"];

fn contact_values(name: &str, phone_number: &str, address: &str) -> Vec<Value> {
    vec![name.into(), phone_number.into(), address.into()]
}

impl Record for Customer {
    type Draft = ContactDraft;
    type Patch = ContactPatch;

    const TABLE: &'static str = "customer";
    const ENTITY: &'static str = "Customer";
    const COLUMNS: &'static [&'static str] = CONTACT_COLUMNS;
    const REFERENCES: &'static [Reference] = &[Reference {
        table: "\"transaction\"",
        column: "customer_id",
    }];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: ContactDraft) -> Self {
        Customer::from_draft(id, draft)
    }

    fn draft_values(draft: &ContactDraft) -> Vec<Value> {
        contact_values(&draft.name, &draft.phone_number, &draft.address)
    }

    fn values(&self) -> Vec<Value> {
        contact_values(&self.name, &self.phone_number, &self.address)
    }
}

impl Record for Employee {
    type Draft = ContactDraft;
    type Patch = ContactPatch;

    const TABLE: &'static str = "employee";
    const ENTITY: &'static str = "Employee";
    const COLUMNS: &'static [&'static str] = CONTACT_COLUMNS;
    const REFERENCES: &'static [Reference] = &[Reference {
        table: "\"transaction\"",
        column: "employee_id",
    }];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: ContactDraft) -> Self {
        Employee::from_draft(id, draft)
    }

    fn draft_values(draft: &ContactDraft) -> Vec<Value> {
        contact_values(&draft.name, &draft.phone_number, &draft.address)
    }

    fn values(&self) -> Vec<Value> {
        contact_values(&self.name, &self.phone_number, &self.address)
    }
}

impl Record for Product {
    type Draft = ProductDraft;
    type Patch = ProductPatch;

    const TABLE: &'static str = "product";
    const ENTITY: &'static str = "Product";
    const COLUMNS: &'static [&'static str] = &["name", "unit", "price"];
    const REFERENCES: &'static [Reference] = &[Reference {
        table: "transaction_detail",
        column: "product_id",
    }];

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: ProductDraft) -> Self {
        Product::from_draft(id, draft)
    }

    fn draft_values(draft: &ProductDraft) -> Vec<Value> {
        vec![
            draft.name.as_str().into(),
            draft.unit.as_str().into(),
            draft.price.into(),
        ]
    }

    fn values(&self) -> Vec<Value> {
        vec![
            self.name.as_str().into(),
            self.unit.as_str().into(),
            self.price.into(),
        ]
    }
}
