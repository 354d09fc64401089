//! Success envelope: `{"message": ..., "data": ...}`.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

/// Body of every successful response.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub message: String,
    pub data: T,
}

/// 200 with `data`.
pub fn ok<T: Serialize>(message: impl Into<String>, data: T) -> Json<Envelope<T>> {
    Json(Envelope {
        message: message.into(),
        data,
    })
}

/// 201 with `data`.
pub fn created<T: Serialize>(
    message: impl Into<String>,
    data: T,
) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::CREATED, ok(message, data))
}
