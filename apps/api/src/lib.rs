//! # Laundry API
//!
//! HTTP/JSON service for a laundry shop: customers, employees, the price
//! list, and transactions with their line items.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Laundry API Server                               │
//! │                                                                         │
//! │  Client ───► axum (8080) ───► handlers ───► laundry-db ───► Postgres    │
//! │                  │                │                          or SQLite  │
//! │             TraceLayer       ApiError ─► {message, details}             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod handlers;
pub mod response;
pub mod routes;

pub use config::{ApiConfig, ConfigError};
pub use error::{ApiError, ApiResult, ErrorCode};
pub use routes::router;

use laundry_db::Database;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState { db }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! Router driven in-process against an in-memory database.

    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use laundry_db::{Database, DbConfig};

    use crate::{router, AppState};

    pub struct TestApp {
        router: Router,
    }

    impl TestApp {
        pub async fn new() -> Self {
            let db = Database::new(DbConfig::in_memory()).await.unwrap();
            TestApp {
                router: router(AppState::new(db)),
            }
        }

        pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(json) => builder
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(json.to_string())),
                None => builder.body(Body::empty()),
            }
            .unwrap();

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            let value = if bytes.is_empty() {
                Value::Null
            } else {
                serde_json::from_slice(&bytes).unwrap_or(Value::Null)
            };
            (status, value)
        }

        pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
            self.send(Method::GET, uri, None).await
        }

        pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
            self.send(Method::POST, uri, Some(body)).await
        }

        pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
            self.send(Method::PUT, uri, Some(body)).await
        }

        pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
            self.send(Method::DELETE, uri, None).await
        }

        async fn create(&self, uri: &str, body: Value) -> i64 {
            let (status, body) = self.post(uri, body).await;
            assert_eq!(status, StatusCode::CREATED, "{body}");
            body["data"]["id"].as_i64().unwrap()
        }

        pub async fn customer(&self, name: &str) -> i64 {
            self.create(
                "/customers",
                json!({"name": name, "phoneNumber": "0812", "address": "Jakarta"}),
            )
            .await
        }

        pub async fn employee(&self, name: &str) -> i64 {
            self.create(
                "/employees",
                json!({"name": name, "phoneNumber": "0813", "address": "Depok"}),
            )
            .await
        }

        pub async fn product(&self, name: &str, price: i64) -> i64 {
            self.create(
                "/products",
                json!({"name": name, "unit": "pcs", "price": price}),
            )
            .await
        }

        /// Creates a transaction billed on its entry date.
        pub async fn transaction(
            &self,
            customer: i64,
            employee: i64,
            entry_date: &str,
            finish_date: &str,
            items: &[(i64, i64)],
        ) -> i64 {
            let details: Vec<Value> = items
                .iter()
                .map(|(product, qty)| json!({"productId": product, "qty": qty}))
                .collect();
            self.create(
                "/transactions",
                json!({
                    "customerId": customer,
                    "employeeId": employee,
                    "billDate": entry_date,
                    "entryDate": entry_date,
                    "finishDate": finish_date,
                    "billDetails": details
                }),
            )
            .await
        }
    }
}
