//! # REST API for Chore Logs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{CreateChoreLogRequest, SearchQuery};
use tracing::{error, info};

use crate::backend::domain::commands::SearchQuery as DomainSearchQuery;
use crate::backend::io::rest::error::{ApiError, ApiJson};
use crate::backend::io::rest::mappers::ChoreLogMapper;
use crate::backend::AppState;

/// Create a router for chore log related APIs
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(list_chore_logs).post(create_chore_log))
}

pub async fn list_chore_logs(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/chore-logs - query: {:?}", query);

    match state
        .chore_log_service
        .list_chore_logs(DomainSearchQuery::new(query.q))
        .await
    {
        Ok(logs) => (StatusCode::OK, Json(ChoreLogMapper::to_list_dto(logs))).into_response(),
        Err(e) => {
            error!("Failed to list chore logs: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn create_chore_log(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateChoreLogRequest>,
) -> impl IntoResponse {
    info!("POST /api/chore-logs - request: {:?}", request);

    match state
        .chore_log_service
        .create_chore_log(ChoreLogMapper::to_command(request))
        .await
    {
        Ok(log) => (StatusCode::CREATED, Json(ChoreLogMapper::to_dto(log))).into_response(),
        Err(e) => {
            error!("Failed to create chore log: {}", e);
            ApiError::from(e).into_response()
        }
    }
}
