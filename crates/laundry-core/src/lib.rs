//! # laundry-core: Pure Domain Logic for the Laundry Backend
//!
//! Everything the laundry shop knows about its data that does not need a
//! database: the row shapes, the transaction read model, bill arithmetic,
//! date validation and the partial-update merge rules.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Laundry Backend Architecture                       │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/api (axum)                              │   │
//! │  │    /customers  /employees  /products  /transactions             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ laundry-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   patch   │  │ validation│  │   │
//! │  │   │ Customer  │  │   Money   │  │ Contact-  │  │ dd-mm-yyyy│  │   │
//! │  │   │ Bill view │  │ totalBill │  │ Patch     │  │ line items│  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 laundry-db (Database Layer)                     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Customer, Employee, Product, transaction request and read models
//! - [`money`] - Integer money for snapshot prices and bill totals
//! - [`patch`] - Partial-update merge rules
//! - [`validation`] - Date format and transaction request validation
//! - [`error`] - Validation error type
//!
//! ## Example Usage
//!
//! ```rust
//! use laundry_core::money::Money;
//!
//! // 2 kg at 7000 + 1 bed cover at 25000
//! let total = Money::total_of([(7000, 2), (25000, 1)]).unwrap();
//! assert_eq!(total.amount(), 39000);
//! ```

pub mod error;
pub mod money;
pub mod patch;
pub mod types;
pub mod validation;

pub use error::ValidationError;
pub use money::Money;
pub use patch::{ContactPatch, Patch, ProductPatch};
pub use types::*;

/// Date format accepted on the wire and rendered back in responses.
pub const WIRE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Date format stored in the database (sorts lexicographically).
pub const STORAGE_DATE_FORMAT: &str = "%Y-%m-%d";
