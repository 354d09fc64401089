//! # Transaction Handlers
//!
//! ```text
//!   POST /transactions
//!     1. customer exists?          no → 404
//!     2. employee exists?          no → 404
//!     3. every product exists?     no → 404
//!     4. dates dd-mm-yyyy, at least one line item?   no → 400
//!     5. one unit of work (header + line items with snapshot prices) → 201
//!
//!   GET /transactions/{id}                              → 200 | 404
//!   GET /transactions?startDate=&endDate=&productName=  → 200 | 400 | 404
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use tracing::debug;

use laundry_core::validation::parse_optional_wire_date;
use laundry_core::{CreatedTransaction, Transaction, TransactionRequest};
use laundry_db::TransactionFilter;

use crate::error::{ApiError, ApiResult};
use crate::response::{self, Envelope};
use crate::AppState;

/// `POST /transactions`
pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<TransactionRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<CreatedTransaction>>)> {
    let Json(request) = body?;
    let db = &state.db;

    if !db.customers().exists(request.customer_id).await? {
        return Err(ApiError::not_found("Customer", request.customer_id));
    }
    if !db.employees().exists(request.employee_id).await? {
        return Err(ApiError::not_found("Employee", request.employee_id));
    }
    for product_id in request.product_ids() {
        if !db.products().exists(product_id).await? {
            return Err(ApiError::not_found("Product", product_id));
        }
    }

    let new = request.validate()?;
    let created = db.transactions().create(&new).await?;

    Ok(response::created("Successfully Create Transaction", created))
}

/// `GET /transactions/{id}`
pub async fn get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Envelope<Transaction>>> {
    let Path(id) = id?;
    let transaction = state.db.transactions().get(id).await?;
    Ok(response::ok("Successfully Get Transaction", transaction))
}

/// Raw listing query; blank values count as absent.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub product_name: Option<String>,
}

impl ListQuery {
    fn into_filter(self) -> ApiResult<TransactionFilter> {
        let start_date = parse_optional_wire_date("startDate", self.start_date.as_deref())
            .map_err(|e| {
                ApiError::invalid_input(
                    "Failed convert start date. Make sure start date format is dd-MM-yyyy",
                    e.to_string(),
                )
            })?;
        let end_date = parse_optional_wire_date("endDate", self.end_date.as_deref()).map_err(|e| {
            ApiError::invalid_input(
                "Failed convert end date. Make sure end date format is dd-MM-yyyy",
                e.to_string(),
            )
        })?;

        Ok(TransactionFilter {
            start_date,
            end_date,
            product_name: self
                .product_name
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty()),
        })
    }
}

/// `GET /transactions`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Envelope<Vec<Transaction>>>> {
    let Query(query) = query?;
    let filter = query.into_filter()?;
    debug!(?filter, "Listing transactions");

    let transactions = state.db.transactions().list(&filter).await?;
    Ok(response::ok("Successfully Get Transaction", transactions))
}
