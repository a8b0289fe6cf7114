use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::FertilizerType;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::backend::domain::models::fertilizer::Fertilizer;
use crate::backend::storage::sqlite::{decode_instant, encode_instant, like_pattern, DbConnection};
use crate::backend::storage::traits::FertilizerStorage;

const FERTILIZER_COLUMNS: &str = "id, name, fertilizer_type, is_organic, notes, nitrogen, phosphorus, potassium, created_at, updated_at";

/// Repository for fertilizer operations
#[derive(Clone)]
pub struct FertilizerRepository {
    db: DbConnection,
}

impl FertilizerRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Result<Fertilizer> {
        let fertilizer_type: &str = row.try_get("fertilizer_type")?;
        let fertilizer_type = fertilizer_type
            .parse::<FertilizerType>()
            .map_err(|e| anyhow!("Corrupt fertilizer row: {}", e))?;

        Ok(Fertilizer {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            fertilizer_type,
            is_organic: row.try_get("is_organic")?,
            notes: row.try_get("notes")?,
            nitrogen: row.try_get("nitrogen")?,
            phosphorus: row.try_get("phosphorus")?,
            potassium: row.try_get("potassium")?,
            created_at: decode_instant(row.try_get("created_at")?)?,
            updated_at: decode_instant(row.try_get("updated_at")?)?,
        })
    }
}

#[async_trait]
impl FertilizerStorage for FertilizerRepository {
    async fn store_fertilizer(&self, fertilizer: &Fertilizer) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO fertilizers (id, name, fertilizer_type, is_organic, notes, nitrogen, phosphorus, potassium, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&fertilizer.id)
        .bind(&fertilizer.name)
        .bind(fertilizer.fertilizer_type.as_str())
        .bind(fertilizer.is_organic)
        .bind(&fertilizer.notes)
        .bind(fertilizer.nitrogen)
        .bind(fertilizer.phosphorus)
        .bind(fertilizer.potassium)
        .bind(encode_instant(&fertilizer.created_at))
        .bind(encode_instant(&fertilizer.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_fertilizer(&self, fertilizer_id: &str) -> Result<Option<Fertilizer>> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM fertilizers WHERE id = ?",
            FERTILIZER_COLUMNS
        ))
        .bind(fertilizer_id)
        .fetch_optional(self.db.pool())
        .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn get_fertilizers(&self, fertilizer_ids: &[String]) -> Result<Vec<Fertilizer>> {
        if fertilizer_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM fertilizers WHERE id IN (",
            FERTILIZER_COLUMNS
        ));
        let mut ids = builder.separated(", ");
        for id in fertilizer_ids {
            ids.push_bind(id.as_str());
        }
        ids.push_unseparated(")");

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::from_row).collect()
    }

    async fn list_fertilizers(&self, search: Option<&str>) -> Result<Vec<Fertilizer>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM fertilizers
            WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\' OR notes LIKE ?1 ESCAPE '\'
            ORDER BY name ASC, created_at DESC
            "#,
            FERTILIZER_COLUMNS
        ))
        .bind(search.map(like_pattern))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn update_fertilizer(&self, fertilizer: &Fertilizer) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE fertilizers
            SET name = ?, fertilizer_type = ?, is_organic = ?, notes = ?,
                nitrogen = ?, phosphorus = ?, potassium = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&fertilizer.name)
        .bind(fertilizer.fertilizer_type.as_str())
        .bind(fertilizer.is_organic)
        .bind(&fertilizer.notes)
        .bind(fertilizer.nitrogen)
        .bind(fertilizer.phosphorus)
        .bind(fertilizer.potassium)
        .bind(encode_instant(&fertilizer.updated_at))
        .bind(&fertilizer.id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_fertilizer(&self, fertilizer_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM fertilizers WHERE id = ?")
            .bind(fertilizer_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, day, 8, 0, 0).unwrap()
    }

    fn fertilizer(name: &str, fertilizer_type: FertilizerType, created_day: u32) -> Fertilizer {
        Fertilizer {
            id: Fertilizer::generate_id(),
            name: name.to_string(),
            fertilizer_type,
            is_organic: true,
            notes: None,
            nitrogen: Some(10.0),
            phosphorus: None,
            potassium: Some(4.5),
            created_at: at(created_day),
            updated_at: at(created_day),
        }
    }

    async fn setup() -> FertilizerRepository {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        FertilizerRepository::new(db)
    }

    #[tokio::test]
    async fn test_store_get_and_list_fertilizers() {
        let repo = setup().await;
        let kelp = fertilizer("Kelp", FertilizerType::Liquid, 2);
        let blood_meal = fertilizer("Blood meal", FertilizerType::Granules, 3);
        repo.store_fertilizer(&kelp).await.unwrap();
        repo.store_fertilizer(&blood_meal).await.unwrap();

        assert_eq!(repo.get_fertilizer(&kelp.id).await.unwrap(), Some(kelp.clone()));

        let listed = repo.list_fertilizers(None).await.unwrap();
        assert_eq!(listed, vec![blood_meal.clone(), kelp.clone()]);

        let searched = repo.list_fertilizers(Some("kel")).await.unwrap();
        assert_eq!(searched, vec![kelp.clone()]);

        let by_ids = repo.get_fertilizers(&[kelp.id.clone()]).await.unwrap();
        assert_eq!(by_ids, vec![kelp]);
    }

    #[tokio::test]
    async fn test_update_and_delete_fertilizer() {
        let repo = setup().await;
        let mut fish = fertilizer("Fish", FertilizerType::Liquid, 1);
        repo.store_fertilizer(&fish).await.unwrap();

        fish.fertilizer_type = FertilizerType::Granules;
        fish.is_organic = false;
        fish.nitrogen = None;
        assert!(repo.update_fertilizer(&fish).await.unwrap());
        assert_eq!(repo.get_fertilizer(&fish.id).await.unwrap(), Some(fish.clone()));

        assert!(repo.delete_fertilizer(&fish.id).await.unwrap());
        assert_eq!(repo.get_fertilizer(&fish.id).await.unwrap(), None);
        assert!(!repo.delete_fertilizer(&fish.id).await.unwrap());
    }
}
