//! # Storage Module
//!
//! Persistence for plants, fertilizers, chores and chore logs.
//!
//! The domain layer only sees the traits in [`traits`]; the SQLite
//! implementation in [`sqlite`] is what the server runs on. Instants are
//! stored as RFC 3339 UTC text so that lexical and chronological order agree.

pub mod sqlite;
pub mod traits;

pub use sqlite::DbConnection;
pub use traits::*;
