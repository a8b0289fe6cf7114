//! Plannting gardening tracker: REST API over SQLite for plants, fertilizers,
//! chores and chore completion logs.

pub mod backend;
