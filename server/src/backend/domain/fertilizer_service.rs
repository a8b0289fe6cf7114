//! Fertilizer catalogue management.
use std::sync::Arc;
use tracing::info;

use crate::backend::domain::clock::Clock;
use crate::backend::domain::commands::{fertilizer::FertilizerCommand, SearchQuery};
use crate::backend::domain::error::{DomainError, DomainResult};
use crate::backend::domain::models::fertilizer::Fertilizer;
use crate::backend::storage::{Connection, FertilizerStorage};

#[derive(Clone)]
pub struct FertilizerService<C: Connection> {
    fertilizer_repository: C::FertilizerRepository,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> FertilizerService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            fertilizer_repository: connection.create_fertilizer_repository(),
            clock,
        }
    }

    pub async fn list_fertilizers(&self, query: SearchQuery) -> DomainResult<Vec<Fertilizer>> {
        Ok(self.fertilizer_repository.list_fertilizers(query.term()).await?)
    }

    pub async fn create_fertilizer(&self, command: FertilizerCommand) -> DomainResult<Fertilizer> {
        let name = Self::validate(&command)?;
        let now = self.clock.now();
        let fertilizer = Fertilizer {
            id: Fertilizer::generate_id(),
            name,
            fertilizer_type: command.fertilizer_type,
            is_organic: command.is_organic,
            notes: command.notes,
            nitrogen: command.nitrogen,
            phosphorus: command.phosphorus,
            potassium: command.potassium,
            created_at: now,
            updated_at: now,
        };

        self.fertilizer_repository.store_fertilizer(&fertilizer).await?;
        info!("Created fertilizer {} ({})", fertilizer.id, fertilizer.name);
        Ok(fertilizer)
    }

    pub async fn update_fertilizer(
        &self,
        fertilizer_id: &str,
        command: FertilizerCommand,
    ) -> DomainResult<Fertilizer> {
        let existing = self
            .fertilizer_repository
            .get_fertilizer(fertilizer_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Fertilizer", fertilizer_id))?;

        let fertilizer = Fertilizer {
            name: Self::validate(&command)?,
            fertilizer_type: command.fertilizer_type,
            is_organic: command.is_organic,
            notes: command.notes,
            nitrogen: command.nitrogen,
            phosphorus: command.phosphorus,
            potassium: command.potassium,
            updated_at: self.clock.now(),
            ..existing
        };

        if !self.fertilizer_repository.update_fertilizer(&fertilizer).await? {
            return Err(DomainError::not_found("Fertilizer", fertilizer_id));
        }
        info!("Updated fertilizer {}", fertilizer.id);
        Ok(fertilizer)
    }

    /// Chores using the fertilizer are kept and lose their reference
    pub async fn delete_fertilizer(&self, fertilizer_id: &str) -> DomainResult<()> {
        if !self.fertilizer_repository.delete_fertilizer(fertilizer_id).await? {
            return Err(DomainError::not_found("Fertilizer", fertilizer_id));
        }
        info!("Deleted fertilizer {}", fertilizer_id);
        Ok(())
    }

    fn validate(command: &FertilizerCommand) -> DomainResult<String> {
        Ok(Fertilizer::validate(
            &command.name,
            [
                ("nitrogen", command.nitrogen),
                ("phosphorus", command.phosphorus),
                ("potassium", command.potassium),
            ],
        )?)
    }
}
