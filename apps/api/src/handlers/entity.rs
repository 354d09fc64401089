//! # Generic Entity Handlers
//!
//! One set of handlers serves `/customers`, `/employees` and `/products`,
//! parameterized by the [`Record`] type.
//!
//! ```text
//!   GET    /{entities}        list::<E>     200
//!   POST   /{entities}        create::<E>   201
//!   GET    /{entities}/{id}   get::<E>      200 | 404
//!   PUT    /{entities}/{id}   update::<E>   200 | 404
//!   DELETE /{entities}/{id}   delete::<E>   200 | 404 | 409
//! ```

use axum::body::Bytes;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use laundry_db::Record;

use crate::error::{ApiError, ApiResult};
use crate::response::{self, Envelope};
use crate::AppState;

/// `GET /{entities}`
pub async fn list<E: Record>(State(state): State<AppState>) -> ApiResult<Json<Envelope<Vec<E>>>> {
    let rows = state.db.entities::<E>().list().await?;
    Ok(response::ok(
        format!("Successfully get all data from {}", E::ENTITY.to_lowercase()),
        rows,
    ))
}

/// `GET /{entities}/{id}`
pub async fn get<E: Record>(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Envelope<E>>> {
    let Path(id) = id?;
    let row = state.db.entities::<E>().get(id).await?;
    Ok(response::ok(format!("Successfully Get {} Detail", E::ENTITY), row))
}

/// `POST /{entities}`
pub async fn create<E: Record>(
    State(state): State<AppState>,
    body: Result<Json<E::Draft>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Envelope<E>>)> {
    let Json(draft) = body?;
    let row = state.db.entities::<E>().create(draft).await?;

    info!(entity = E::ENTITY, id = row.id(), "Created");
    Ok(response::created(format!("Successfully Create {}", E::ENTITY), row))
}

/// `PUT /{entities}/{id}`
///
/// Every body field is optional. An empty body is the same as `{}`.
pub async fn update<E: Record>(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    body: Bytes,
) -> ApiResult<Json<Envelope<E>>> {
    let Path(id) = id?;
    let patch: E::Patch = if body.iter().all(u8::is_ascii_whitespace) {
        Default::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| ApiError::invalid_input("Invalid Input", e.to_string()))?
    };

    let row = state.db.entities::<E>().update(id, patch).await?;
    Ok(response::ok(format!("Successfully Updated {} Data", E::ENTITY), row))
}

/// `DELETE /{entities}/{id}`
///
/// Refuses with 409 while any transaction still points at the row.
pub async fn delete<E: Record>(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Envelope<&'static str>>> {
    let Path(id) = id?;
    let repo = state.db.entities::<E>();

    if !repo.exists(id).await? {
        return Err(ApiError::not_found(E::ENTITY, id));
    }

    if repo.is_referenced(id).await? {
        return Err(ApiError::conflict(
            format!(
                "{} is being used in transaction. Please delete the transaction first",
                E::ENTITY
            ),
            format!("{} {} is referenced by a transaction", E::ENTITY, id),
        ));
    }

    repo.delete(id).await?;

    info!(entity = E::ENTITY, id, "Deleted");
    Ok(response::ok("Successfully deleted data", "OK"))
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::test_support::TestApp;

    #[tokio::test]
    async fn test_customer_crud_round() {
        let app = TestApp::new().await;

        let (status, body) = app
            .post(
                "/customers",
                json!({"name": "Jessica", "phoneNumber": "0812", "address": "Jakarta"}),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["message"], "Successfully Create Customer");
        let id = body["data"]["id"].as_i64().unwrap();

        let (status, body) = app.get(&format!("/customers/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["phoneNumber"], "0812");

        let (status, body) = app.get("/customers").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"].as_array().unwrap().len(), 1);

        let (status, body) = app.delete(&format!("/customers/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"], "OK");

        let (status, body) = app.get(&format!("/customers/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "customer not found");
    }

    #[tokio::test]
    async fn test_partial_update() {
        let app = TestApp::new().await;
        let id = app.customer("Jessica").await;

        let (status, body) = app
            .put(&format!("/customers/{id}"), json!({"name": "New Name"}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "New Name");
        assert_eq!(body["data"]["phoneNumber"], "0812");
        assert_eq!(body["data"]["address"], "Jakarta");

        let (status, body) = app.put(&format!("/customers/{id}"), json!({})).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "New Name");

        let (status, body) = app
            .put(&format!("/customers/{id}"), json!({"name": "   ", "address": ""}))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["name"], "New Name");
        assert_eq!(body["data"]["address"], "Jakarta");
    }

    #[tokio::test]
    async fn test_bad_input() {
        let app = TestApp::new().await;

        let (status, body) = app.get("/employees/abc").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Failed convert id. Make sure id is number");

        let (status, _) = app.post("/employees", json!({"name": "Budi"})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.put("/employees/1", json!({"name": 5})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app.put("/employees/99", json!({"name": "Ghost"})).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = app.delete("/employees/99").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_referenced_is_conflict() {
        let app = TestApp::new().await;
        let customer = app.customer("Jessica").await;
        let employee = app.employee("Budi").await;
        let product = app.product("Shirt Wash", 5000).await;
        app.transaction(customer, employee, "01-03-2024", "03-03-2024", &[(product, 1)])
            .await;

        for path in [
            format!("/customers/{customer}"),
            format!("/employees/{employee}"),
            format!("/products/{product}"),
        ] {
            let (status, _) = app.delete(&path).await;
            assert_eq!(status, StatusCode::CONFLICT, "{path}");

            let (status, _) = app.get(&path).await;
            assert_eq!(status, StatusCode::OK, "{path} must survive");
        }

        let (_, body) = app.delete(&format!("/customers/{customer}")).await;
        assert_eq!(
            body["message"],
            "Customer is being used in transaction. Please delete the transaction first"
        );
    }
}
