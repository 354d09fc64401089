//! Route table.

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

use laundry_core::{Customer, Employee, Product};

use crate::handlers::{entity, health, product, transaction};
use crate::AppState;

/// Builds the application router.
///
/// ```text
///   /health
///   /customers          /customers/{id}
///   /employees          /employees/{id}
///   /products           /products/{id}
///   /transactions       /transactions/{id}
/// ```
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::check))
        .route(
            "/customers",
            get(entity::list::<Customer>).post(entity::create::<Customer>),
        )
        .route(
            "/customers/{id}",
            get(entity::get::<Customer>)
                .put(entity::update::<Customer>)
                .delete(entity::delete::<Customer>),
        )
        .route(
            "/employees",
            get(entity::list::<Employee>).post(entity::create::<Employee>),
        )
        .route(
            "/employees/{id}",
            get(entity::get::<Employee>)
                .put(entity::update::<Employee>)
                .delete(entity::delete::<Employee>),
        )
        .route(
            "/products",
            get(product::list).post(entity::create::<Product>),
        )
        .route(
            "/products/{id}",
            get(entity::get::<Product>)
                .put(entity::update::<Product>)
                .delete(entity::delete::<Product>),
        )
        .route(
            "/transactions",
            get(transaction::list).post(transaction::create),
        )
        .route("/transactions/{id}", get(transaction::get))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
