//! # REST API for Fertilizers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::{CreateFertilizerRequest, DeleteResponse, SearchQuery, UpdateFertilizerRequest};
use tracing::{error, info};

use crate::backend::domain::commands::SearchQuery as DomainSearchQuery;
use crate::backend::io::rest::error::{ApiError, ApiJson};
use crate::backend::io::rest::mappers::FertilizerMapper;
use crate::backend::AppState;

/// Create a router for fertilizer related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_fertilizers).post(create_fertilizer))
        .route("/:id", put(update_fertilizer).delete(delete_fertilizer))
}

pub async fn list_fertilizers(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/fertilizers - query: {:?}", query);

    match state
        .fertilizer_service
        .list_fertilizers(DomainSearchQuery::new(query.q))
        .await
    {
        Ok(fertilizers) => {
            (StatusCode::OK, Json(FertilizerMapper::to_list_dto(fertilizers))).into_response()
        }
        Err(e) => {
            error!("Failed to list fertilizers: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn create_fertilizer(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateFertilizerRequest>,
) -> impl IntoResponse {
    info!("POST /api/fertilizers - request: {:?}", request);

    match state
        .fertilizer_service
        .create_fertilizer(FertilizerMapper::to_command(request))
        .await
    {
        Ok(fertilizer) => {
            (StatusCode::CREATED, Json(FertilizerMapper::to_dto(fertilizer))).into_response()
        }
        Err(e) => {
            error!("Failed to create fertilizer: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn update_fertilizer(
    State(state): State<AppState>,
    Path(fertilizer_id): Path<String>,
    ApiJson(request): ApiJson<UpdateFertilizerRequest>,
) -> impl IntoResponse {
    info!("PUT /api/fertilizers/{} - request: {:?}", fertilizer_id, request);

    match state
        .fertilizer_service
        .update_fertilizer(&fertilizer_id, FertilizerMapper::to_command(request))
        .await
    {
        Ok(fertilizer) => (StatusCode::OK, Json(FertilizerMapper::to_dto(fertilizer))).into_response(),
        Err(e) => {
            error!("Failed to update fertilizer {}: {}", fertilizer_id, e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn delete_fertilizer(
    State(state): State<AppState>,
    Path(fertilizer_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/fertilizers/{}", fertilizer_id);

    match state.fertilizer_service.delete_fertilizer(&fertilizer_id).await {
        Ok(()) => (StatusCode::OK, Json(DeleteResponse { success: true })).into_response(),
        Err(e) => {
            error!("Failed to delete fertilizer {}: {}", fertilizer_id, e);
            ApiError::from(e).into_response()
        }
    }
}
