//! # Partial Updates
//!
//! `PUT /{entity}/{id}` accepts a body where every field is optional. A
//! field that is absent, blank after trimming or (for prices) zero means
//! "keep the stored value". Everything else overwrites.
//!
//! ```text
//!   stored row ──┐
//!                ├──► Patch::apply ──► merged row ──► UPDATE
//!   request  ────┘
//!
//!   "name": "  "      → unchanged
//!   "price": 0        → unchanged
//!   (field missing)   → unchanged
//!   "name": "Jessica" → replaced
//! ```
//!
//! A consequence is that a field can never be cleared to empty or a price
//! reset to zero through an update.

use serde::{Deserialize, Serialize};

use crate::types::{Customer, Employee, Product};

/// Merge rule for a partial update of `T`.
pub trait Patch<T> {
    /// Overwrites the fields of `target` that this patch carries a value for.
    fn apply(self, target: &mut T);

    /// True when applying the patch would change nothing.
    fn is_empty(&self) -> bool;
}

/// Replaces `slot` unless `value` is missing or blank.
fn merge_text(slot: &mut String, value: Option<String>) {
    if let Some(value) = value {
        if !value.trim().is_empty() {
            *slot = value;
        }
    }
}

/// Replaces `slot` unless `value` is missing or zero.
fn merge_amount(slot: &mut i64, value: Option<i64>) {
    if let Some(value) = value {
        if value != 0 {
            *slot = value;
        }
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

// =============================================================================
// ContactPatch (Customer / Employee)
// =============================================================================

/// Update body for customers and employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl ContactPatch {
    fn merge(self, name: &mut String, phone_number: &mut String, address: &mut String) {
        merge_text(name, self.name);
        merge_text(phone_number, self.phone_number);
        merge_text(address, self.address);
    }

    fn carries_value(&self) -> bool {
        has_text(&self.name) || has_text(&self.phone_number) || has_text(&self.address)
    }
}

impl Patch<Customer> for ContactPatch {
    fn apply(self, target: &mut Customer) {
        self.merge(&mut target.name, &mut target.phone_number, &mut target.address);
    }

    fn is_empty(&self) -> bool {
        !self.carries_value()
    }
}

impl Patch<Employee> for ContactPatch {
    fn apply(self, target: &mut Employee) {
        self.merge(&mut target.name, &mut target.phone_number, &mut target.address);
    }

    fn is_empty(&self) -> bool {
        !self.carries_value()
    }
}

// =============================================================================
// ProductPatch
// =============================================================================

/// Update body for products.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
}

impl Patch<Product> for ProductPatch {
    fn apply(self, target: &mut Product) {
        merge_text(&mut target.name, self.name);
        merge_text(&mut target.unit, self.unit);
        merge_amount(&mut target.price, self.price);
    }

    fn is_empty(&self) -> bool {
        !has_text(&self.name) && !has_text(&self.unit) && self.price.unwrap_or(0) == 0
    }
}
