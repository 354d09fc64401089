//! Health check endpoint for monitoring.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::response::{self, Envelope};
use crate::AppState;

/// Health report.
#[derive(Debug, Serialize)]
pub struct Health {
    pub database: &'static str,
    pub driver: &'static str,
}

/// `GET /health`: 200 when the database answers, 503 otherwise.
pub async fn check(State(state): State<AppState>) -> (StatusCode, Json<Envelope<Health>>) {
    let healthy = state.db.health_check().await;
    let health = Health {
        database: if healthy { "up" } else { "down" },
        driver: state.db.driver().as_str(),
    };

    if healthy {
        (StatusCode::OK, response::ok("OK", health))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            response::ok("Database unavailable", health),
        )
    }
}
