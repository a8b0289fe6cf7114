use crate::backend::domain::commands::chore_log::CreateChoreLogCommand;
use crate::backend::domain::models::chore_log::{ChoreLog as DomainChoreLog, ChoreLogDetails};
use crate::backend::domain::time_normalizer::ClientDate;
use crate::backend::io::rest::mappers::{ChoreMapper, FertilizerMapper, PlantMapper};
use shared::{ChoreLog as SharedChoreLog, ChoreLogListResponse, CreateChoreLogRequest};

pub struct ChoreLogMapper;

impl ChoreLogMapper {
    pub fn to_dto(domain: DomainChoreLog) -> SharedChoreLog {
        SharedChoreLog {
            id: domain.id,
            chore_id: domain.chore_id,
            fertilizer_amount: domain.fertilizer_amount,
            done_at: domain.done_at,
            notes: domain.notes,
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }

    pub fn to_details_dto(domain: ChoreLogDetails) -> shared::ChoreLogDetails {
        shared::ChoreLogDetails {
            log: Self::to_dto(domain.log),
            chore: domain.chore.map(ChoreMapper::to_dto),
            fertilizer: domain.fertilizer.map(FertilizerMapper::to_dto),
            plant: domain.plant.map(PlantMapper::to_dto),
        }
    }

    pub fn to_list_dto(logs: Vec<ChoreLogDetails>) -> ChoreLogListResponse {
        ChoreLogListResponse {
            chore_logs: logs.into_iter().map(Self::to_details_dto).collect(),
        }
    }

    pub fn to_command(request: CreateChoreLogRequest) -> CreateChoreLogCommand {
        CreateChoreLogCommand {
            chore_id: request.chore_id,
            fertilizer_amount: request.fertilizer_amount,
            notes: request.notes,
            done_at: request.done_at.map(ClientDate::Text),
            client_timezone_offset: request.client_timezone_offset,
        }
    }
}
