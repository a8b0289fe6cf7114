pub mod chore_log_repository;
pub mod chore_repository;
pub mod fertilizer_repository;
pub mod plant_repository;

pub use chore_log_repository::ChoreLogRepository;
pub use chore_repository::ChoreRepository;
pub use fertilizer_repository::FertilizerRepository;
pub use plant_repository::PlantRepository;
