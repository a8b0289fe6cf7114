pub mod chore_log_mapper;
pub mod chore_mapper;
pub mod fertilizer_mapper;
pub mod plant_mapper;

pub use chore_log_mapper::ChoreLogMapper;
pub use chore_mapper::ChoreMapper;
pub use fertilizer_mapper::FertilizerMapper;
pub use plant_mapper::PlantMapper;
