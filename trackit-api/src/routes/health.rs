/// Liveness and health endpoints
///
/// # Endpoints
///
/// ```text
/// GET /         -> {"message": "TrackIt is running"}
/// GET /health   -> service, database, pool and migration status
/// ```
///
/// `/health` always answers 200; a broken database shows up as
/// `"status": "degraded"` rather than an error so load balancers can tell
/// "process up" from "process gone".

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use trackit_shared::db::migrations::{get_migration_status, MigrationStatus};
use trackit_shared::db::pool::{get_pool_stats, health_check as db_health_check, PoolStats};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "healthy" or "degraded"
    pub status: String,

    pub version: String,

    /// "connected" or "disconnected"
    pub database: String,

    pub pool: PoolStats,

    /// Absent when the database could not be queried
    #[serde(skip_serializing_if = "Option::is_none")]
    pub migrations: Option<MigrationStatus>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct RootResponse {
    pub message: String,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "TrackIt is running".to_string(),
    })
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let connected = match db_health_check(&state.db).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(error = %e, "Database health check failed");
            false
        }
    };

    let migrations = if connected {
        get_migration_status(&state.db).await.ok()
    } else {
        None
    };

    Json(HealthResponse {
        status: if connected { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if connected { "connected" } else { "disconnected" }.to_string(),
        pool: get_pool_stats(&state.db),
        migrations,
    })
}
