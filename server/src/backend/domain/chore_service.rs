//! Chore management.
//!
//! Chores belong to a plant and may reference a fertilizer. Reads always go
//! through [`ChoreQueryAssembler`] so that every chore handed out carries its
//! associations and a freshly computed next due date.

use std::sync::Arc;
use tracing::info;

use crate::backend::domain::chore_query::ChoreQueryAssembler;
use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::chore::{CreateChoreCommand, UpdateChoreCommand};
use crate::backend::domain::commands::SearchQuery;
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::chore::{validate_recur_amount, Chore, ScheduledChore};
use crate::backend::storage::{ChoreStorage, Connection, FertilizerStorage, PlantStorage};

#[derive(Clone)]
pub struct ChoreService<C: Connection> {
    chore_repository: C::ChoreRepository,
    plant_repository: C::PlantRepository,
    fertilizer_repository: C::FertilizerRepository,
    chore_query: ChoreQueryAssembler<C>,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> ChoreService<C> {
    pub fn new(
        connection: Arc<C>,
        chore_query: ChoreQueryAssembler<C>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            chore_repository: connection.create_chore_repository(),
            plant_repository: connection.create_plant_repository(),
            fertilizer_repository: connection.create_fertilizer_repository(),
            chore_query,
            clock,
        }
    }

    /// Chores matching the query, soonest due first
    pub async fn list_chores(&self, query: SearchQuery) -> DomainResult<Vec<ScheduledChore>> {
        self.chore_query.list(query.term()).await
    }

    pub async fn create_chore(&self, command: CreateChoreCommand) -> DomainResult<ScheduledChore> {
        validate_recur_amount(command.recur_amount)?;
        self.ensure_plant_exists(&command.plant_id).await?;
        let fertilizer_id = non_blank(command.fertilizer_id);
        if let Some(fertilizer_id) = &fertilizer_id {
            self.ensure_fertilizer_exists(fertilizer_id).await?;
        }

        let now = self.clock.now();
        let chore = Chore {
            id: Chore::generate_id(),
            plant_id: command.plant_id,
            description: command.description,
            fertilizer_id,
            fertilizer_amount: command.fertilizer_amount,
            recur_amount: command.recur_amount,
            recur_unit: command.recur_unit,
            notes: command.notes,
            created_at: now,
            updated_at: now,
        };

        self.chore_repository.store_chore(&chore).await?;
        info!("Created chore {} for plant {}", chore.id, chore.plant_id);
        self.scheduled(&chore.id).await
    }

    /// Apply a partial update; absent fields are left untouched
    pub async fn update_chore(
        &self,
        chore_id: &str,
        command: UpdateChoreCommand,
    ) -> DomainResult<ScheduledChore> {
        let mut chore = self
            .chore_repository
            .get_chore(chore_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Chore", chore_id))?;

        if let Some(recur_amount) = command.recur_amount {
            validate_recur_amount(recur_amount)?;
            chore.recur_amount = recur_amount;
        }
        if let Some(recur_unit) = command.recur_unit {
            chore.recur_unit = recur_unit;
        }
        if let Some(fertilizer_id) = command.fertilizer_id {
            let fertilizer_id = non_blank(fertilizer_id);
            if let Some(id) = &fertilizer_id {
                self.ensure_fertilizer_exists(id).await?;
            }
            chore.fertilizer_id = fertilizer_id;
        }
        if let Some(description) = command.description {
            chore.description = description;
        }
        if let Some(fertilizer_amount) = command.fertilizer_amount {
            chore.fertilizer_amount = fertilizer_amount;
        }
        if let Some(notes) = command.notes {
            chore.notes = notes;
        }
        chore.updated_at = self.clock.now();

        if !self.chore_repository.update_chore(&chore).await? {
            return Err(DomainError::not_found("Chore", chore_id));
        }
        info!("Updated chore {}", chore.id);
        self.scheduled(&chore.id).await
    }

    /// Removes the chore and its logs
    pub async fn delete_chore(&self, chore_id: &str) -> DomainResult<()> {
        if !self.chore_repository.delete_chore(chore_id).await? {
            return Err(DomainError::not_found("Chore", chore_id));
        }
        info!("Deleted chore {}", chore_id);
        Ok(())
    }

    async fn scheduled(&self, chore_id: &str) -> DomainResult<ScheduledChore> {
        self.chore_query
            .get(chore_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Chore", chore_id))
    }

    async fn ensure_plant_exists(&self, plant_id: &str) -> DomainResult<()> {
        match self.plant_repository.get_plant(plant_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Plant", plant_id)),
        }
    }

    async fn ensure_fertilizer_exists(&self, fertilizer_id: &str) -> DomainResult<()> {
        match self.fertilizer_repository.get_fertilizer(fertilizer_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Fertilizer", fertilizer_id)),
        }
    }
}

/// Clients send an empty string to mean "no fertilizer"
fn non_blank(id: Option<String>) -> Option<String> {
    id.filter(|id| !id.trim().is_empty())
}
