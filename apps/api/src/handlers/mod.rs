//! HTTP handlers.
//!
//! - [`entity`] - generic CRUD for customers, employees and products
//! - [`product`] - product listing with the name filter
//! - [`transaction`] - create, get and list transactions
//! - [`health`] - liveness and database status

pub mod entity;
pub mod health;
pub mod product;
pub mod transaction;
