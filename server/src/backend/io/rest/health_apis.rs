//! # REST API for Health
//!
//! Reports process liveness and database reachability. Always answers 200;
//! a database outage shows up in the body.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{DatabaseHealth, DatabaseStatus, HealthResponse};
use tracing::info;

use crate::backend::domain::HealthReport;
use crate::backend::AppState;

/// Create a router for health related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/health");

    let report = state.health_service.check().await;
    (StatusCode::OK, Json(to_response(report)))
}

fn to_response(report: HealthReport) -> HealthResponse {
    let db = match report.database {
        Ok(()) => DatabaseHealth {
            status: DatabaseStatus::Connected,
            error: None,
        },
        Err(message) => DatabaseHealth {
            status: DatabaseStatus::Disconnected,
            error: Some(message),
        },
    };

    HealthResponse {
        status: "ok".to_string(),
        db,
        timestamp: report.checked_at,
    }
}

#[cfg(test)]
mod tests {
    use crate::backend::io::rest::test_support::{send, TestApp, TestResult};
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_health_with_database_up() -> TestResult<()> {
        let app = TestApp::new().await;

        let (status, body) = send(&app.router, Method::GET, "/api/health", None).await?;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "status": "ok",
                "db": { "status": "connected" },
                "timestamp": "2024-05-20T12:00:00Z"
            })
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_health_with_database_down() -> TestResult<()> {
        let app = TestApp::new().await;
        app.db.pool().close().await;

        let report = app.state.health_service.check().await;
        assert!(report.database.is_err());

        let (status, body) = send(&app.router, Method::GET, "/api/health", None).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["db"]["status"], "disconnected");
        assert!(body["db"]["error"].is_string());
        Ok(())
    }

    #[tokio::test]
    async fn test_unknown_route_returns_not_found() -> TestResult<()> {
        let app = TestApp::new().await;

        let (status, body) = send(&app.router, Method::GET, "/api/compost-bins", None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Not Found" }));

        let (status, _) = send(&app.router, Method::GET, "/", None).await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        Ok(())
    }
}
