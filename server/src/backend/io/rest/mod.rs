//! # REST API Interface Layer
//!
//! One axum router per resource, all mounted under `/api`:
//!
//! - `GET /api/health`
//! - `GET|POST /api/plants`, `PUT|DELETE /api/plants/:id`
//! - `GET|POST /api/fertilizers`, `PUT|DELETE /api/fertilizers/:id`
//! - `GET|POST /api/chores`, `PUT|DELETE /api/chores/:id`
//! - `GET|POST /api/chore-logs`
//!
//! Handlers translate `shared` DTOs to domain commands, log the call, and
//! render domain errors through [`error::ApiError`].

pub mod chore_apis;
pub mod chore_log_apis;
pub mod error;
pub mod fertilizer_apis;
pub mod health_apis;
pub mod mappers;
pub mod plant_apis;

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        body::Body,
        http::{Method, Request, StatusCode},
        Router,
    };
    use chrono::{DateTime, TimeZone, Utc};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    use crate::backend::config::ApiConfig;
    use crate::backend::domain::{FixedClock, OffsetPolicy};
    use crate::backend::storage::DbConnection;
    use crate::backend::{build_app_state, create_router, AppState};

    pub type TestResult<T> = Result<T, Box<dyn std::error::Error>>;

    pub fn test_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 12, 0, 0).unwrap()
    }

    pub struct TestApp {
        pub router: Router,
        pub state: AppState,
        pub clock: FixedClock,
        pub db: Arc<DbConnection>,
    }

    impl TestApp {
        pub async fn new() -> Self {
            let db = Arc::new(DbConnection::init_test().await.expect("Failed to init test DB"));
            let clock = FixedClock::new(test_now());
            let state = build_app_state(db.clone(), OffsetPolicy::default(), Arc::new(clock.clone()));
            let router = create_router(state.clone(), &ApiConfig::default());
            Self {
                router,
                state,
                clock,
                db,
            }
        }

        pub async fn create_plant(&self, name: &str) -> TestResult<String> {
            let (status, body) = send(
                &self.router,
                Method::POST,
                "/api/plants",
                Some(json!({ "name": name, "plantedAt": "2024-03-01" })),
            )
            .await?;
            assert_eq!(status, StatusCode::CREATED, "{}", body);
            Ok(id_of(&body))
        }

        pub async fn create_fertilizer(&self, name: &str) -> TestResult<String> {
            let (status, body) = send(
                &self.router,
                Method::POST,
                "/api/fertilizers",
                Some(json!({ "name": name, "type": "liquid", "isOrganic": true })),
            )
            .await?;
            assert_eq!(status, StatusCode::CREATED, "{}", body);
            Ok(id_of(&body))
        }

        pub async fn create_chore(&self, body: Value) -> TestResult<String> {
            let (status, body) = send(&self.router, Method::POST, "/api/chores", Some(body)).await?;
            assert_eq!(status, StatusCode::CREATED, "{}", body);
            Ok(id_of(&body))
        }
    }

    fn id_of(body: &Value) -> String {
        body["id"].as_str().unwrap_or_default().to_string()
    }

    /// Issue one request; non-JSON bodies come back as a JSON string
    pub async fn send(
        router: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> TestResult<(StatusCode, Value)> {
        let request = match body {
            Some(body) => Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&body)?))?,
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())?,
        };

        let response = router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        Ok((status, value))
    }
}
