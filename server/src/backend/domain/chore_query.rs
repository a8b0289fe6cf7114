//! Builds scheduled chores: each chore joined with its fertilizer, its plant
//! and its completion history, plus the computed next due date.

use std::collections::HashMap;
use tracing::debug;

use crate::backend::domain::error::DomainResult;
use crate::backend::domain::models::chore::{Chore, ScheduledChore};
use crate::backend::domain::models::chore_log::ChoreLog;
use crate::backend::domain::recurrence::{compare_by_next_due, RecurrenceCalculator};
use crate::backend::storage::{
    ChoreLogStorage, ChoreStorage, Connection, FertilizerStorage, PlantStorage,
};

#[derive(Clone)]
pub struct ChoreQueryAssembler<C: Connection> {
    chore_repository: C::ChoreRepository,
    chore_log_repository: C::ChoreLogRepository,
    fertilizer_repository: C::FertilizerRepository,
    plant_repository: C::PlantRepository,
    recurrence: RecurrenceCalculator,
}

impl<C: Connection> ChoreQueryAssembler<C> {
    pub fn new(connection: &C, recurrence: RecurrenceCalculator) -> Self {
        Self {
            chore_repository: connection.create_chore_repository(),
            chore_log_repository: connection.create_chore_log_repository(),
            fertilizer_repository: connection.create_fertilizer_repository(),
            plant_repository: connection.create_plant_repository(),
            recurrence,
        }
    }

    /// All chores matching `search`, soonest due first
    pub async fn list(&self, search: Option<&str>) -> DomainResult<Vec<ScheduledChore>> {
        let chores = self.chore_repository.list_chores(search).await?;
        self.assemble(chores).await
    }

    /// Chores of the given plants, soonest due first
    pub async fn list_for_plants(&self, plant_ids: &[String]) -> DomainResult<Vec<ScheduledChore>> {
        let chores = self.chore_repository.list_chores_for_plants(plant_ids).await?;
        self.assemble(chores).await
    }

    pub async fn get(&self, chore_id: &str) -> DomainResult<Option<ScheduledChore>> {
        match self.chore_repository.get_chore(chore_id).await? {
            Some(chore) => Ok(self.assemble(vec![chore]).await?.pop()),
            None => Ok(None),
        }
    }

    /// Attach associations and next due dates, then order the result
    pub async fn assemble(&self, chores: Vec<Chore>) -> DomainResult<Vec<ScheduledChore>> {
        if chores.is_empty() {
            return Ok(Vec::new());
        }

        let chore_ids: Vec<String> = chores.iter().map(|c| c.id.clone()).collect();
        let plant_ids = distinct(chores.iter().map(|c| c.plant_id.as_str()));
        let fertilizer_ids = distinct(chores.iter().filter_map(|c| c.fertilizer_id.as_deref()));

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

        // Completion order is kept per chore while grouping
        let mut logs_by_chore: HashMap<String, Vec<ChoreLog>> = HashMap::new();
        for log in self.chore_log_repository.list_logs_for_chores(&chore_ids).await? {
            logs_by_chore.entry(log.chore_id.clone()).or_default().push(log);
        }

        debug!(
            "Assembling {} chores across {} plants",
            chores.len(),
            plants.len()
        );

        let mut scheduled: Vec<ScheduledChore> = chores
            .into_iter()
            .map(|chore| {
                let logs = logs_by_chore.remove(&chore.id).unwrap_or_default();
                let next_date =
                    self.recurrence
                        .next_due_date(chore.recur_amount, chore.recur_unit, &logs);
                let fertilizer = chore
                    .fertilizer_id
                    .as_ref()
                    .and_then(|id| fertilizers.get(id).cloned());
                let plant = plants.get(&chore.plant_id).cloned();
                ScheduledChore {
                    chore,
                    fertilizer,
                    logs,
                    plant,
                    next_date,
                }
            })
            .collect();

        sort_by_next_due(&mut scheduled);
        Ok(scheduled)
    }
}

/// Stable sort: earliest due first, undated last, newest first on ties
pub fn sort_by_next_due(chores: &mut [ScheduledChore]) {
    chores.sort_by(|a, b| {
        compare_by_next_due(a.next_date, a.chore.created_at, b.next_date, b.chore.created_at)
    });
}

fn distinct<'a>(ids: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for id in ids {
        if !out.iter().any(|seen| seen == id) {
            out.push(id.to_string());
        }
    }
    out
}
