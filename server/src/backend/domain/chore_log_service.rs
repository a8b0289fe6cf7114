//! Recording and listing chore completions.
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::{chore_log::CreateChoreLogCommand, SearchQuery};
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::chore_log::{ChoreLog, ChoreLogDetails};
use crate::backend::domain::time_normalizer::TimeNormalizer;
use crate::backend::storage::{
    ChoreLogStorage, ChoreStorage, Connection, FertilizerStorage, PlantStorage,
};

#[derive(Clone)]
pub struct ChoreLogService<C: Connection> {
    chore_log_repository: C::ChoreLogRepository,
    chore_repository: C::ChoreRepository,
    fertilizer_repository: C::FertilizerRepository,
    plant_repository: C::PlantRepository,
    normalizer: TimeNormalizer,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> ChoreLogService<C> {
    pub fn new(connection: Arc<C>, normalizer: TimeNormalizer, clock: Arc<dyn Clock>) -> Self {
        Self {
            chore_log_repository: connection.create_chore_log_repository(),
            chore_repository: connection.create_chore_repository(),
            fertilizer_repository: connection.create_fertilizer_repository(),
            plant_repository: connection.create_plant_repository(),
            normalizer,
            clock,
        }
    }

    /// Logs most recently done first, each with its chore, the chore's
    /// fertilizer and the owning plant
    pub async fn list_chore_logs(&self, query: SearchQuery) -> DomainResult<Vec<ChoreLogDetails>> {
        let logs = self.chore_log_repository.list_chore_logs(query.term()).await?;
        if logs.is_empty() {
            return Ok(Vec::new());
        }

        let mut chore_ids: Vec<String> = logs.iter().map(|l| l.chore_id.clone()).collect();
        chore_ids.sort();
        chore_ids.dedup();
        let chores: HashMap<String, _> = self
            .chore_repository
            .get_chores(&chore_ids)
            .await?
            .into_iter()
            .map(|c| (c.id.clone(), c))
            .collect();

        let mut plant_ids: Vec<String> = chores.values().map(|c| c.plant_id.clone()).collect();
        plant_ids.sort();
        plant_ids.dedup();
        let mut fertilizer_ids: Vec<String> =
            chores.values().filter_map(|c| c.fertilizer_id.clone()).collect();
        fertilizer_ids.sort();
        fertilizer_ids.dedup();

        let plants: HashMap<String, _> = self
            .plant_repository
            .get_plants(&plant_ids)
            .await?
            .into_iter()
            .map(|p| (p.id.clone(), p))
            .collect();
        let fertilizers: HashMap<String, _> = self
            .fertilizer_repository
            .get_fertilizers(&fertilizer_ids)
            .await?
            .into_iter()
            .map(|f| (f.id.clone(), f))
            .collect();

        Ok(logs
            .into_iter()
            .map(|log| {
                let chore = chores.get(&log.chore_id).cloned();
                let fertilizer = chore
                    .as_ref()
                    .and_then(|c| c.fertilizer_id.as_ref())
                    .and_then(|id| fertilizers.get(id).cloned());
                let plant = chore
                    .as_ref()
                    .and_then(|c| plants.get(&c.plant_id).cloned());
                ChoreLogDetails {
                    log,
                    chore,
                    fertilizer,
                    plant,
                }
            })
            .collect())
    }

    /// Record a completion. `done_at` defaults to now and is normalized to UTC.
    pub async fn create_chore_log(&self, command: CreateChoreLogCommand) -> DomainResult<ChoreLog> {
        if self.chore_repository.get_chore(&command.chore_id).await?.is_none() {
            return Err(DomainError::not_found("Chore", command.chore_id));
        }

        let now = self.clock.now();
        let done_at = match &command.done_at {
            Some(date) => self
                .normalizer
                .to_utc(date, command.client_timezone_offset)?,
            None => now,
        };

        let log = ChoreLog {
            id: ChoreLog::generate_id(),
            chore_id: command.chore_id,
            fertilizer_amount: command.fertilizer_amount,
            done_at,
            notes: command.notes,
            created_at: now,
            updated_at: now,
        };

        self.chore_log_repository.store_chore_log(&log).await?;
        info!("Logged chore {} as done at {}", log.chore_id, log.done_at);
        Ok(log)
    }
}
