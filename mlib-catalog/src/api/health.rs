//! Liveness endpoint

use axum::{routing::get, Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::AppState;

/// Liveness payload; `module` and `version` come from the package manifest
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    #[schema(example = "ok")]
    pub status: String,
    #[schema(example = "mlib-catalog")]
    pub module: String,
    pub version: String,
}

impl HealthResponse {
    fn current() -> Self {
        Self {
            status: "ok".to_string(),
            module: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// GET /health
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    responses((status = 200, description = "Service is up", body = HealthResponse))
)]
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::current())
}

/// Routes that never touch the store or the enricher
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_reports_package_identity() {
        let health = HealthResponse::current();
        assert_eq!(health.status, "ok");
        assert_eq!(health.module, "mlib-catalog");
        assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    }
}
