//! Health check handler.

use axum::{Json, extract::State};
use serde_json::json;

use crate::api::dto::health::HealthResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Reports service liveness and database connectivity.
///
/// # Endpoint
///
/// `GET /health` (public)
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.db)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Health check database ping failed");
            AppError::internal("Service unhealthy", json!({ "database": "down" }))
        })?;

    Ok(Json(HealthResponse {
        status: "ok",
        database: "up",
    }))
}
