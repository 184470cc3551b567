//! Liveness endpoint with a database ping

use axum::{
    extract::Extension, http::StatusCode, response::IntoResponse, routing::get, Json, Router,
};
use serde::Serialize;
use tracing::error;

use crate::common::SharedState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
    pub version: &'static str,
}

/// GET /api/health - 200 when the database answers, 503 otherwise
pub async fn health_check(Extension(state): Extension<SharedState>) -> impl IntoResponse {
    let db = state.read().await.db.clone();

    let (status_code, status, database) = match sqlx::query("SELECT 1").execute(&db).await {
        Ok(_) => (StatusCode::OK, "healthy", "ok"),
        Err(e) => {
            error!(error = %e, "Database health check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", "unavailable")
        }
    };

    (
        status_code,
        Json(HealthResponse {
            status,
            database,
            version: env!("CARGO_PKG_VERSION"),
        }),
    )
}

pub fn health_routes() -> Router {
    Router::new().route("/api/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get, send, test_state};

    #[tokio::test]
    async fn test_health_ok() {
        let (state, _) = test_state(false).await;
        let app = health_routes().layer(Extension(state));

        let (status, body) = send(app, get("/api/health", None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], "ok");
    }

    #[tokio::test]
    async fn test_health_closed_pool() {
        let (state, pool) = test_state(false).await;
        pool.close().await;
        let app = health_routes().layer(Extension(state));

        let (status, body) = send(app, get("/api/health", None)).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unhealthy");
    }
}
