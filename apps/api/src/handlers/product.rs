//! Product listing with an optional name filter.
//!
//! `GET /products?productName=Shirt` returns products whose name contains
//! `Shirt` (case-sensitive). The name is trimmed first; a missing or blank
//! `productName` lists all.
//! Unlike transaction listing, an empty result is still `200`.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use laundry_core::Product;

use crate::error::ApiResult;
use crate::response::{self, Envelope};
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub product_name: Option<String>,
}

/// `GET /products`
pub async fn list(
    State(state): State<AppState>,
    query: Result<Query<ProductQuery>, QueryRejection>,
) -> ApiResult<Json<Envelope<Vec<Product>>>> {
    let Query(query) = query?;
    let repo = state.db.products();

    let needle = query.product_name.as_deref().map(str::trim).filter(|name| !name.is_empty());
    let products = match needle {
        Some(name) => repo.search_by_name(name).await?,
        None => repo.list().await?,
    };

    Ok(response::ok("Successfully get all data from product", products))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::TestApp;

    #[tokio::test]
    async fn test_name_filter() {
        let app = TestApp::new().await;
        app.product("Shirt Wash", 5000).await;
        app.product("Bed Cover", 25000).await;

        let (status, body) = app.get("/products?productName=Shirt").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], json!([{"id": 1, "name": "Shirt Wash", "unit": "pcs", "price": 5000}]));

        let (status, body) = app.get("/products?productName=").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (status, body) = app.get("/products?productName=%20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 2);

        let (status, body) = app.get("/products?productName=%20Shirt%20").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) = app.get("/products?productName=shirt").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["data"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_zero_price_update_keeps_price() {
        let app = TestApp::new().await;
        let id = app.product("Bed Cover", 25000).await;

        let (status, body) = app
            .put(&format!("/products/{id}"), json!({"price": 0, "unit": "sheet"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["price"], 25000);
        assert_eq!(body["data"]["unit"], "sheet");
    }
}
