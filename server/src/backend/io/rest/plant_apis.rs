//! # REST API for Plants
//!
//! Listing plants with their scheduled chores, and plant CRUD.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, put},
    Router,
};
use shared::{CreatePlantRequest, DeleteResponse, SearchQuery, UpdatePlantRequest};
use tracing::{error, info};

use crate::backend::domain::commands::SearchQuery as DomainSearchQuery;
use crate::backend::io::rest::error::{ApiError, ApiJson};
use crate::backend::io::rest::mappers::PlantMapper;
use crate::backend::AppState;

/// Create a router for plant related APIs
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_plants).post(create_plant))
        .route("/:id", put(update_plant).delete(delete_plant))
}

pub async fn list_plants(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> impl IntoResponse {
    info!("GET /api/plants - query: {:?}", query);

    match state
        .plant_service
        .list_plants(DomainSearchQuery::new(query.q))
        .await
    {
        Ok(plants) => (StatusCode::OK, Json(PlantMapper::to_list_dto(plants))).into_response(),
        Err(e) => {
            error!("Failed to list plants: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn create_plant(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreatePlantRequest>,
) -> impl IntoResponse {
    info!("POST /api/plants - request: {:?}", request);

    match state
        .plant_service
        .create_plant(PlantMapper::to_command(request))
        .await
    {
        Ok(plant) => (StatusCode::CREATED, Json(PlantMapper::to_dto(plant))).into_response(),
        Err(e) => {
            error!("Failed to create plant: {}", e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn update_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
    ApiJson(request): ApiJson<UpdatePlantRequest>,
) -> impl IntoResponse {
    info!("PUT /api/plants/{} - request: {:?}", plant_id, request);

    match state
        .plant_service
        .update_plant(&plant_id, PlantMapper::to_command(request))
        .await
    {
        Ok(plant) => (StatusCode::OK, Json(PlantMapper::to_dto(plant))).into_response(),
        Err(e) => {
            error!("Failed to update plant {}: {}", plant_id, e);
            ApiError::from(e).into_response()
        }
    }
}

pub async fn delete_plant(
    State(state): State<AppState>,
    Path(plant_id): Path<String>,
) -> impl IntoResponse {
    info!("DELETE /api/plants/{}", plant_id);

    match state.plant_service.delete_plant(&plant_id).await {
        Ok(()) => (StatusCode::OK, Json(DeleteResponse { success: true })).into_response(),
        Err(e) => {
            error!("Failed to delete plant {}: {}", plant_id, e);
            ApiError::from(e).into_response()
        }
    }
}
