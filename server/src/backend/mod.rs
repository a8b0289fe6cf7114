//! # Backend Module
//!
//! Everything behind the HTTP socket for the gardening tracker.
//!
//! ## Architecture
//!
//! ```text
//! IO Layer (axum routers, DTO mappers)
//!     ↓
//! Domain Layer (services, time normalization, recurrence)
//!     ↓
//! Storage Layer (repository traits, SQLite)
//! ```
//!
//! This module wires the layers together: it opens the database, builds the
//! services around a shared clock and time-normalization policy, and mounts
//! every resource router under `/api`.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method, StatusCode},
    response::{IntoResponse, Json},
    Router,
};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::backend::config::{ApiConfig, AppConfig};
use crate::backend::domain::{
    ChoreLogService, ChoreQueryAssembler, ChoreService, Clock, FertilizerService, HealthService,
    OffsetPolicy, PlantService, RecurrenceCalculator, SystemClock, TimeNormalizer,
};
use crate::backend::io::rest::{
    chore_apis, chore_log_apis, fertilizer_apis, health_apis, plant_apis,
};
use crate::backend::storage::DbConnection;

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub plant_service: PlantService<DbConnection>,
    pub fertilizer_service: FertilizerService<DbConnection>,
    pub chore_service: ChoreService<DbConnection>,
    pub chore_log_service: ChoreLogService<DbConnection>,
    pub health_service: HealthService<DbConnection>,
}

/// Initialize the backend with all required services
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up database");
    let db = Arc::new(DbConnection::new(&config.database.url).await?);

    info!("Setting up domain model");
    Ok(build_app_state(db, config.time, Arc::new(SystemClock)))
}

/// Assemble the services around an open connection
pub fn build_app_state(db: Arc<DbConnection>, policy: OffsetPolicy, clock: Arc<dyn Clock>) -> AppState {
    let normalizer = TimeNormalizer::new(policy);
    let chore_query = ChoreQueryAssembler::new(&*db, RecurrenceCalculator::new(clock.clone()));

    AppState {
        plant_service: PlantService::new(db.clone(), chore_query.clone(), normalizer, clock.clone()),
        fertilizer_service: FertilizerService::new(db.clone(), clock.clone()),
        chore_service: ChoreService::new(db.clone(), chore_query, clock.clone()),
        chore_log_service: ChoreLogService::new(db.clone(), normalizer, clock.clone()),
        health_service: HealthService::new(db, clock),
    }
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, api_config: &ApiConfig) -> Router {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    let cors = match api_config
        .cors_allowed_origin
        .as_deref()
        .and_then(|origin| origin.parse::<HeaderValue>().ok())
    {
        Some(origin) => cors.allow_origin(origin),
        None => cors.allow_origin(Any),
    };

    let api_routes = Router::new()
        .nest("/health", health_apis::router())
        .nest("/plants", plant_apis::router())
        .nest("/fertilizers", fertilizer_apis::router())
        .nest("/chores", chore_apis::router())
        .nest("/chore-logs", chore_log_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(app_state)
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "message": "Not Found" })))
}
