//! # REST API for Chores
//!
//! Every chore returned here carries its plant, fertilizer, completion logs
//! and the computed `nextDate`. Listings come back soonest due first.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::{CreateChoreRequest, DeleteResponse, SearchQuery, UpdateChoreRequest};
use tracing::{error, info};

use crate::backend::domain::commands::SearchQuery as DomainSearchQuery;
use crate::backend::io::rest::error::{ApiError, ApiJson};
use crate::backend::io::rest::mappers::ChoreMapper;
use crate::backend::AppState;

/// Create a router for chore related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_chores).post(create_chore))
        .route("/:id", put(update_chore).delete(delete_chore))
}

pub async fn list_chores(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/chores - query: {:?}", query);

    match state
        .chore_service
        .list_chores(DomainSearchQuery::new(query.q))
        .await
    {
        Ok(chores) => (StatusCode::OK, Json(ChoreMapper::to_list_dto(chores))).into_response(),
        Err(e) => {
            error!("Failed to list chores: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn create_chore(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateChoreRequest>,
) -> impl IntoResponse {
    info!("POST /api/chores - request: {:?}", request);

    match state
        .chore_service
        .create_chore(ChoreMapper::to_create_command(request))
        .await
    {
        Ok(chore) => {
            (StatusCode::CREATED, Json(ChoreMapper::to_details_dto(chore))).into_response()
        }
        Err(e) => {
            error!("Failed to create chore: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn update_chore(
    State(state): State<AppState>,
    Path(chore_id): Path<String>,
    ApiJson(request): ApiJson<UpdateChoreRequest>,
) -> impl IntoResponse {
    info!("PUT /api/chores/{} - request: {:?}", chore_id, request);

    match state
        .chore_service
        .update_chore(&chore_id, ChoreMapper::to_update_command(request))
        .await
    {
        Ok(chore) => (StatusCode::OK, Json(ChoreMapper::to_details_dto(chore))).into_response(),
        Err(e) => {
            error!("Failed to update chore {}: {}", chore_id, e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn delete_chore(
    State(state): State<AppState>,
    Path(chore_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/chores/{}", chore_id);

    match state.chore_service.delete_chore(&chore_id).await {
        Ok(()) => (StatusCode::OK, Json(DeleteResponse { success: true })).into_response(),
        Err(e) => {
            error!("Failed to delete chore {}: {}", chore_id, e);
            ApiError::from(e).into_response()
        }
    }
}
