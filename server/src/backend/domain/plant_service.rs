//! Plant management.
//!
//! Plants are inert records apart from their planting date, which arrives as
//! a client-local date and is normalized to UTC before it is stored. Listing
//! plants also assembles each plant's chores with their next due dates.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::backend::domain::chore_query::ChoreQueryAssembler;
use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::{plant::PlantCommand, SearchQuery};
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::chore::ScheduledChore;
use crate::backend::domain::models::plant::{validate_plant_name, Plant, PlantWithChores};
use crate::backend::domain::time_normalizer::TimeNormalizer;
use crate::backend::storage::{Connection, PlantStorage};

#[derive(Clone)]
pub struct PlantService<C: Connection> {
    plant_repository: C::PlantRepository,
    chore_query: ChoreQueryAssembler<C>,
    normalizer: TimeNormalizer,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> PlantService<C> {
    pub fn new(
        connection: Arc<C>,
        chore_query: ChoreQueryAssembler<C>,
        normalizer: TimeNormalizer,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            plant_repository: connection.create_plant_repository(),
            chore_query,
            normalizer,
            clock,
        }
    }

    /// Plants by name, each with its chores ordered by next due date
    pub async fn list_plants(&self, query: SearchQuery) -> DomainResult<Vec<PlantWithChores>> {
        let plants = self.plant_repository.list_plants(query.term()).await?;
        let plant_ids: Vec<String> = plants.iter().map(|p| p.id.clone()).collect();

        let mut chores_by_plant: HashMap<String, Vec<ScheduledChore>> = HashMap::new();
        for scheduled in self.chore_query.list_for_plants(&plant_ids).await? {
            chores_by_plant
                .entry(scheduled.chore.plant_id.clone())
                .or_default()
                .push(scheduled);
        }

        Ok(plants
            .into_iter()
            .map(|plant| PlantWithChores {
                chores: chores_by_plant.remove(&plant.id).unwrap_or_default(),
                plant,
            })
            .collect())
    }

    pub async fn create_plant(&self, command: PlantCommand) -> DomainResult<Plant> {
        let name = validate_plant_name(&command.name)?;
        let planted_at = self
            .normalizer
            .to_utc(&command.planted_at, command.client_timezone_offset)?;

        let now = self.clock.now();
        let plant = Plant {
            id: Plant::generate_id(),
            name,
            planted_at,
            notes: command.notes,
            created_at: now,
            updated_at: now,
        };

        self.plant_repository.store_plant(&plant).await?;
        info!("Created plant {} ({})", plant.id, plant.name);
        Ok(plant)
    }

    pub async fn update_plant(&self, plant_id: &str, command: PlantCommand) -> DomainResult<Plant> {
        let existing = self
            .plant_repository
            .get_plant(plant_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Plant", plant_id))?;

        let plant = Plant {
            name: validate_plant_name(&command.name)?,
            planted_at: self
                .normalizer
                .to_utc(&command.planted_at, command.client_timezone_offset)?,
            notes: command.notes,
            updated_at: self.clock.now(),
            ..existing
        };

        if !self.plant_repository.update_plant(&plant).await? {
            return Err(DomainError::not_found("Plant", plant_id));
        }
        info!("Updated plant {}", plant.id);
        Ok(plant)
    }

    /// Removes the plant together with its chores and their logs
    pub async fn delete_plant(&self, plant_id: &str) -> DomainResult<()> {
        if !self.plant_repository.delete_plant(plant_id).await? {
            return Err(DomainError::not_found("Plant", plant_id));
        }
        info!("Deleted plant {}", plant_id);
        Ok(())
    }
}
