pub mod chore;
pub mod chore_log;
pub mod fertilizer;
pub mod plant;
