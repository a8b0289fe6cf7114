use crate::backend::domain::commands::fertilizer::FertilizerCommand;
use crate::backend::domain::models::fertilizer::Fertilizer as DomainFertilizer;
use shared::{CreateFertilizerRequest, Fertilizer as SharedFertilizer, FertilizerListResponse};

pub struct FertilizerMapper;

impl FertilizerMapper {
    pub fn to_dto(domain: DomainFertilizer) -> SharedFertilizer {
        SharedFertilizer {
            id: domain.id,
            name: domain.name,
            fertilizer_type: domain.fertilizer_type,
            is_organic: domain.is_organic,
            notes: domain.notes,
            nitrogen: domain.nitrogen,
            phosphorus: domain.phosphorus,
            potassium: domain.potassium,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_list_dto(fertilizers: Vec<DomainFertilizer>) -> FertilizerListResponse {
        FertilizerListResponse {
            fertilizers: fertilizers.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_command(request: CreateFertilizerRequest) -> FertilizerCommand {
        FertilizerCommand {
            name: request.name,
            fertilizer_type: request.fertilizer_type,
            is_organic: request.is_organic,
            notes: request.notes,
            nitrogen: request.nitrogen,
            phosphorus: request.phosphorus,
            potassium: request.potassium,
        }
    }
}
