use crate::backend::domain::commands::chore::{CreateChoreCommand, UpdateChoreCommand};
use crate::backend::domain::models::chore::{Chore as DomainChore, ScheduledChore};
use crate::backend::io::rest::mappers::{ChoreLogMapper, FertilizerMapper, PlantMapper};
use shared::{
    Chore as SharedChore, ChoreDetails, ChoreListResponse, CreateChoreRequest, UpdateChoreRequest,
};

pub struct ChoreMapper;

impl ChoreMapper {
    pub fn to_dto(domain: DomainChore) -> SharedChore {
        SharedChore {
            id: domain.id,
            plant_id: domain.plant_id,
            description: domain.description,
            fertilizer_id: domain.fertilizer_id,
            fertilizer_amount: domain.fertilizer_amount,
            recur_amount: domain.recur_amount,
            recur_unit: domain.recur_unit,
            notes: domain.notes,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_details_dto(domain: ScheduledChore) -> ChoreDetails {
        ChoreDetails {
            chore: Self::to_dto(domain.chore),
            fertilizer: domain.fertilizer.map(FertilizerMapper::to_dto),
            logs: domain.logs.into_iter().map(ChoreLogMapper::to_dto).collect(),
            plant: domain.plant.map(PlantMapper::to_dto),
            next_date: domain.next_date,
        }
    }

    pub fn to_list_dto(chores: Vec<ScheduledChore>) -> ChoreListResponse {
        ChoreListResponse {
            chores: chores.into_iter().map(Self::to_details_dto).collect(),
        }
    }

    /// `clientTimezoneOffset` is accepted but chores carry no client dates
    pub fn to_create_command(request: CreateChoreRequest) -> CreateChoreCommand {
        CreateChoreCommand {
            plant_id: request.plant_id,
            description: request.description,
            fertilizer_id: request.fertilizer_id,
            fertilizer_amount: request.fertilizer_amount,
            recur_amount: request.recur_amount,
            recur_unit: request.recur_unit,
            notes: request.notes,
        }
    }

    pub fn to_update_command(request: UpdateChoreRequest) -> UpdateChoreCommand {
        UpdateChoreCommand {
            description: request.description,
            fertilizer_id: request.fertilizer_id,
            fertilizer_amount: request.fertilizer_amount,
            recur_amount: request.recur_amount,
            recur_unit: request.recur_unit,
            notes: request.notes,
        }
    }
}
