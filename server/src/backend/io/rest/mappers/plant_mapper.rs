use crate::backend::domain::commands::plant::PlantCommand;
use crate::backend::domain::models::plant::{Plant as DomainPlant, PlantWithChores};
use crate::backend::domain::time_normalizer::ClientDate;
use crate::backend::io::rest::mappers::ChoreMapper;
use shared::{CreatePlantRequest, Plant as SharedPlant, PlantListResponse};

/// Mapper between plant DTOs and domain models.
pub struct PlantMapper;

impl PlantMapper {
    pub fn to_dto(domain: DomainPlant) -> SharedPlant {
        SharedPlant {
            id: domain.id,
            name: domain.name,
            planted_at: domain.planted_at,
            notes: domain.notes,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_with_chores_dto(domain: PlantWithChores) -> shared::PlantWithChores {
        shared::PlantWithChores {
            plant: Self::to_dto(domain.plant),
            chores: domain
                .chores
                .into_iter()
                .map(ChoreMapper::to_details_dto)
                .collect(),
        }
    }

    pub fn to_list_dto(plants: Vec<PlantWithChores>) -> PlantListResponse {
        PlantListResponse {
            plants: plants.into_iter().map(Self::to_with_chores_dto).collect(),
        }
    }

    /// Create and update share the same request shape
    pub fn to_command(request: CreatePlantRequest) -> PlantCommand {
        PlantCommand {
            name: request.name,
            planted_at: ClientDate::Text(request.planted_at),
            notes: request.notes,
            client_timezone_offset: request.client_timezone_offset,
        }
    }
}
