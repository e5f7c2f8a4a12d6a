//! Health check handler and response type.

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::State, Json};
use chrono::Utc;
use serde::Serialize;

use crate::state::AppState;

const DB_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    pub version: String,
    pub database: String,
}

/// Always 200; the database field reports probe state ("connected" or
/// "disconnected") without failing the endpoint.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let database = match tokio::time::timeout(DB_PROBE_TIMEOUT, tasklist_db::ping(&state.client))
        .await
    {
        Ok(Ok(())) => "connected",
        Ok(Err(err)) => {
            tracing::warn!(error = %err, "database health probe failed");
            "disconnected"
        }
        Err(_) => {
            tracing::warn!("database health probe timed out");
            "disconnected"
        }
    };

    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: database.to_string(),
    })
}
