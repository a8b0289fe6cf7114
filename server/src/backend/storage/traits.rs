//! # Storage Traits
//!
//! Repository abstractions the domain layer is written against. Each
//! connection type hands out its own repositories through [`Connection`],
//! so services stay generic over the backing store.

use anyhow::Result;
use async_trait::async_trait;

use crate::backend::domain::models::{
    chore::Chore, chore_log::ChoreLog, fertilizer::Fertilizer, plant::Plant,
};

#[async_trait]
pub trait PlantStorage: Send + Sync {
    async fn store_plant(&self, plant: &Plant) -> Result<()>;

    async fn get_plant(&self, plant_id: &str) -> Result<Option<Plant>>;

    /// Fetch several plants at once; unknown IDs are skipped
    async fn get_plants(&self, plant_ids: &[String]) -> Result<Vec<Plant>>;

    /// List plants ordered by name, then newest first.
    /// `search` matches name or notes, case-insensitively.
    async fn list_plants(&self, search: Option<&str>) -> Result<Vec<Plant>>;

    /// Returns false when no plant has that ID
    async fn update_plant(&self, plant: &Plant) -> Result<bool>;

    /// Deletes the plant along with its chores and their logs.
    /// Returns false when no plant has that ID.
    async fn delete_plant(&self, plant_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait FertilizerStorage: Send + Sync {
    async fn store_fertilizer(&self, fertilizer: &Fertilizer) -> Result<()>;

    async fn get_fertilizer(&self, fertilizer_id: &str) -> Result<Option<Fertilizer>>;

    async fn get_fertilizers(&self, fertilizer_ids: &[String]) -> Result<Vec<Fertilizer>>;

    /// List fertilizers ordered by name, then newest first
    async fn list_fertilizers(&self, search: Option<&str>) -> Result<Vec<Fertilizer>>;

    async fn update_fertilizer(&self, fertilizer: &Fertilizer) -> Result<bool>;

    /// Chores that referenced the fertilizer keep existing without one
    async fn delete_fertilizer(&self, fertilizer_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait ChoreStorage: Send + Sync {
    async fn store_chore(&self, chore: &Chore) -> Result<()>;

    async fn get_chore(&self, chore_id: &str) -> Result<Option<Chore>>;

    async fn get_chores(&self, chore_ids: &[String]) -> Result<Vec<Chore>>;

    /// List chores, newest first. `search` matches notes.
    async fn list_chores(&self, search: Option<&str>) -> Result<Vec<Chore>>;

    /// All chores belonging to any of the given plants, newest first
    async fn list_chores_for_plants(&self, plant_ids: &[String]) -> Result<Vec<Chore>>;

    async fn update_chore(&self, chore: &Chore) -> Result<bool>;

    /// Deletes the chore along with its logs
    async fn delete_chore(&self, chore_id: &str) -> Result<bool>;
}

#[async_trait]
pub trait ChoreLogStorage: Send + Sync {
    async fn store_chore_log(&self, log: &ChoreLog) -> Result<()>;

    /// Logs of the given chores in completion order: `done_at` ascending,
    /// then insertion order
    async fn list_logs_for_chores(&self, chore_ids: &[String]) -> Result<Vec<ChoreLog>>;

    /// All logs, most recently done first, then newest first.
    /// `search` matches notes.
    async fn list_chore_logs(&self, search: Option<&str>) -> Result<Vec<ChoreLog>>;
}

/// Connection trait that can create repositories
#[async_trait]
pub trait Connection: Send + Sync + Clone + 'static {
    type PlantRepository: PlantStorage + Clone;
    type FertilizerRepository: FertilizerStorage + Clone;
    type ChoreRepository: ChoreStorage + Clone;
    type ChoreLogRepository: ChoreLogStorage + Clone;

    fn create_plant_repository(&self) -> Self::PlantRepository;

    fn create_fertilizer_repository(&self) -> Self::FertilizerRepository;

    fn create_chore_repository(&self) -> Self::ChoreRepository;

    fn create_chore_log_repository(&self) -> Self::ChoreLogRepository;

    /// Round-trip to the backing store
    async fn ping(&self) -> Result<()>;
}
