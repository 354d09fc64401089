//! # Repository Module
//!
//! Database repository implementations for the laundry backend.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Layout                                    │
//! │                                                                         │
//! │  HTTP handler                                                           │
//! │       │                                                                 │
//! │       │  db.customers().get(3)                                          │
//! │       │  db.transactions().list(&filter)                                │
//! │       ▼                                                                 │
//! │  EntityRepository<E: Record>          TransactionRepository             │
//! │  ├── create / list / get / find       ├── create (unit of work)         │
//! │  ├── update (partial)                 ├── get (nested read model)       │
//! │  ├── exists / is_referenced           ├── list (filtered)               │
//! │  └── delete / count                   └── exists / count                │
//! │       │                                      │                          │
//! │       └──────────────┬───────────────────────┘                          │
//! │                      ▼                                                  │
//! │              AnyPool (Postgres | SQLite)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`EntityRepository`](entity::EntityRepository) - Customer, Employee, Product CRUD
//! - [`TransactionRepository`](transaction::TransactionRepository) - Bills and line items

pub mod entity;
pub mod filter;
pub mod record;
pub mod transaction;
