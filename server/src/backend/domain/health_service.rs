use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::warn;

use crate::backend::domain::clock::Clock;
use crate::backend::storage::Connection;

/// Result of a liveness check
#[derive(Debug, Clone, PartialEq)]
pub struct HealthReport {
    /// `Err` carries the database failure message
    pub database: Result<(), String>,
    pub checked_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct HealthService<C: Connection> {
    connection: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<C: Connection> HealthService<C> {
    pub fn new(connection: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self { connection, clock }
    }

    /// Never fails; a database outage is reported, not propagated
    pub async fn check(&self) -> HealthReport {
        let database = match self.connection.ping().await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("Database ping failed: {}", e);
                Err(e.to_string())
            }
        };

        HealthReport {
            database,
            checked_at: self.clock.now(),
        }
    }
}
