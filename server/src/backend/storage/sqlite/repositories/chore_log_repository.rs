use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::backend::domain::models::chore_log::ChoreLog;
use crate::backend::storage::sqlite::{decode_instant, encode_instant, like_pattern, DbConnection};
use crate::backend::storage::traits::ChoreLogStorage;

const CHORE_LOG_COLUMNS: &str = "id, chore_id, fertilizer_amount, done_at, notes, created_at, updated_at";

/// Repository for chore log operations
#[derive(Clone)]
pub struct ChoreLogRepository {
    db: DbConnection,
}

impl ChoreLogRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Result<ChoreLog> {
        Ok(ChoreLog {
            id: row.try_get("id")?,
            chore_id: row.try_get("chore_id")?,
            fertilizer_amount: row.try_get("fertilizer_amount")?,
            done_at: decode_instant(row.try_get("done_at")?)?,
            notes: row.try_get("notes")?,
            created_at: decode_instant(row.try_get("created_at")?)?,
            updated_at: decode_instant(row.try_get("updated_at")?)?,
        })
    }
}

#[async_trait]
impl ChoreLogStorage for ChoreLogRepository {
    async fn store_chore_log(&self, log: &ChoreLog) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO chore_logs (id, chore_id, fertilizer_amount, done_at, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&log.id)
        .bind(&log.chore_id)
        .bind(&log.fertilizer_amount)
        .bind(encode_instant(&log.done_at))
        .bind(&log.notes)
        .bind(encode_instant(&log.created_at))
        .bind(encode_instant(&log.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn list_logs_for_chores(&self, chore_ids: &[String]) -> Result<Vec<ChoreLog>> {
        if chore_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM chore_logs WHERE chore_id IN (",
            CHORE_LOG_COLUMNS
        ));
        let mut ids = builder.separated(", ");
        for id in chore_ids {
            ids.push_bind(id.as_str());
        }
        ids.push_unseparated(") ORDER BY done_at ASC, rowid ASC");

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::from_row).collect()
    }

    async fn list_chore_logs(&self, search: Option<&str>) -> Result<Vec<ChoreLog>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM chore_logs
            WHERE ?1 IS NULL OR notes LIKE ?1 ESCAPE '\'
            ORDER BY done_at DESC, created_at DESC, rowid DESC
            "#,
            CHORE_LOG_COLUMNS
        ))
        .bind(search.map(like_pattern))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::from_row).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::{chore::Chore, plant::Plant};
    use crate::backend::storage::sqlite::{ChoreRepository, PlantRepository};
    use crate::backend::storage::traits::{ChoreStorage, PlantStorage};
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    async fn setup() -> (DbConnection, ChoreLogRepository, Chore) {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        let plant = Plant {
            id: Plant::generate_id(),
            name: "Lemon".to_string(),
            planted_at: at(1, 0),
            notes: None,
            created_at: at(1, 0),
            updated_at: at(1, 0),
        };
        PlantRepository::new(db.clone()).store_plant(&plant).await.unwrap();

        let chore = Chore {
            id: Chore::generate_id(),
            plant_id: plant.id,
            description: Some("Water".to_string()),
            fertilizer_id: None,
            fertilizer_amount: None,
            recur_amount: Some(3),
            recur_unit: Some(shared::RecurUnit::Day),
            notes: None,
            created_at: at(1, 0),
            updated_at: at(1, 0),
        };
        ChoreRepository::new(db.clone()).store_chore(&chore).await.unwrap();

        (db.clone(), ChoreLogRepository::new(db), chore)
    }

    fn log(chore_id: &str, done_at: DateTime<Utc>, notes: Option<&str>) -> ChoreLog {
        ChoreLog {
            id: ChoreLog::generate_id(),
            chore_id: chore_id.to_string(),
            fertilizer_amount: None,
            done_at,
            notes: notes.map(str::to_string),
            created_at: at(20, 0),
            updated_at: at(20, 0),
        }
    }

    #[tokio::test]
    async fn test_logs_for_chores_are_in_completion_order() {
        let (_db, repo, chore) = setup().await;
        // Backdated entry inserted after a later one
        let late = log(&chore.id, at(10, 9), None);
        let early = log(&chore.id, at(4, 9), None);
        let same_instant = log(&chore.id, at(10, 9), None);
        for l in [&late, &early, &same_instant] {
            repo.store_chore_log(l).await.unwrap();
        }

        let logs = repo.list_logs_for_chores(&[chore.id.clone()]).await.unwrap();

        assert_eq!(logs, vec![early, late, same_instant]);
    }

    #[tokio::test]
    async fn test_list_chore_logs_newest_first_with_search() {
        let (_db, repo, chore) = setup().await;
        let first = log(&chore.id, at(2, 8), Some("Soil was dry"));
        let second = log(&chore.id, at(5, 8), Some("after rain"));
        repo.store_chore_log(&first).await.unwrap();
        repo.store_chore_log(&second).await.unwrap();

        assert_eq!(
            repo.list_chore_logs(None).await.unwrap(),
            vec![second.clone(), first.clone()]
        );
        assert_eq!(repo.list_chore_logs(Some("dry")).await.unwrap(), vec![first]);
    }

    #[tokio::test]
    async fn test_deleting_chore_cascades_to_logs() {
        let (db, repo, chore) = setup().await;
        repo.store_chore_log(&log(&chore.id, at(3, 3), None)).await.unwrap();

        ChoreRepository::new(db).delete_chore(&chore.id).await.unwrap();

        assert!(repo.list_chore_logs(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_log_requires_existing_chore() {
        let (_db, repo, _chore) = setup().await;

        assert!(repo
            .store_chore_log(&log("chore::missing", at(3, 3), None))
            .await
            .is_err());
    }
}
