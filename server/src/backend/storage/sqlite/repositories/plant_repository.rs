use anyhow::Result;
use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::backend::domain::models::plant::Plant;
use crate::backend::storage::sqlite::{decode_instant, encode_instant, like_pattern, DbConnection};
use crate::backend::storage::traits::PlantStorage;

const PLANT_COLUMNS: &str = "id, name, planted_at, notes, created_at, updated_at";

/// Repository for plant operations
#[derive(Clone)]
pub struct PlantRepository {
    db: DbConnection,
}

impl PlantRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Result<Plant> {
        Ok(Plant {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            planted_at: decode_instant(row.try_get("planted_at")?)?,
            notes: row.try_get("notes")?,
            created_at: decode_instant(row.try_get("created_at")?)?,
            updated_at: decode_instant(row.try_get("updated_at")?)?,
        })
    }
}

#[async_trait]
impl PlantStorage for PlantRepository {
    async fn store_plant(&self, plant: &Plant) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO plants (id, name, planted_at, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&plant.id)
        .bind(&plant.name)
        .bind(encode_instant(&plant.planted_at))
        .bind(&plant.notes)
        .bind(encode_instant(&plant.created_at))
        .bind(encode_instant(&plant.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_plant(&self, plant_id: &str) -> Result<Option<Plant>> {
        let row = sqlx::query(&format!("SELECT {} FROM plants WHERE id = ?", PLANT_COLUMNS))
            .bind(plant_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn get_plants(&self, plant_ids: &[String]) -> Result<Vec<Plant>> {
        if plant_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {} FROM plants WHERE id IN (", PLANT_COLUMNS));
        let mut ids = builder.separated(", ");
        for id in plant_ids {
            ids.push_bind(id.as_str());
        }
        ids.push_unseparated(")");

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::from_row).collect()
    }

    async fn list_plants(&self, search: Option<&str>) -> Result<Vec<Plant>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM plants
            WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\' OR notes LIKE ?1 ESCAPE '\'
            ORDER BY name ASC, created_at DESC
            "#,
            PLANT_COLUMNS
        ))
        .bind(search.map(like_pattern))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn update_plant(&self, plant: &Plant) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE plants
            SET name = ?, planted_at = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&plant.name)
        .bind(encode_instant(&plant.planted_at))
        .bind(&plant.notes)
        .bind(encode_instant(&plant.updated_at))
        .bind(&plant.id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_plant(&self, plant_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM plants WHERE id = ?")
            .bind(plant_id)
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
        Utc.with_ymd_and_hms(2024, 4, day, 12, 0, 0).unwrap()
    }

    fn plant(name: &str, notes: Option<&str>, created_day: u32) -> Plant {
        Plant {
            id: Plant::generate_id(),
            name: name.to_string(),
            planted_at: at(1),
            notes: notes.map(str::to_string),
            created_at: at(created_day),
            updated_at: at(created_day),
        }
    }

    async fn setup() -> PlantRepository {
        let db = DbConnection::init_test().await.expect("Failed to init test DB");
        PlantRepository::new(db)
    }

    #[tokio::test]
    async fn test_store_and_get_plant() {
        let repo = setup().await;
        let tomato = plant("Tomato", Some("San Marzano"), 2);

        repo.store_plant(&tomato).await.unwrap();

        assert_eq!(repo.get_plant(&tomato.id).await.unwrap(), Some(tomato));
        assert_eq!(repo.get_plant("plant::missing").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_list_plants_order_and_search() {
        let repo = setup().await;
        let basil_old = plant("Basil", None, 1);
        let basil_new = plant("Basil", Some("windowsill"), 5);
        let aloe = plant("Aloe", Some("100% shade"), 3);
        for p in [&basil_old, &basil_new, &aloe] {
            repo.store_plant(p).await.unwrap();
        }

        let all = repo.list_plants(None).await.unwrap();
        let ids: Vec<_> = all.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids, vec![aloe.id.clone(), basil_new.id.clone(), basil_old.id.clone()]);

        let by_notes = repo.list_plants(Some("WINDOW")).await.unwrap();
        assert_eq!(by_notes, vec![basil_new.clone()]);

        // `%` is literal, not a wildcard
        let literal = repo.list_plants(Some("100%")).await.unwrap();
        assert_eq!(literal, vec![aloe.clone()]);
        assert!(repo.list_plants(Some("0%s")).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_plants_by_ids() {
        let repo = setup().await;
        let a = plant("A", None, 1);
        let b = plant("B", None, 2);
        repo.store_plant(&a).await.unwrap();
        repo.store_plant(&b).await.unwrap();

        let found = repo
            .get_plants(&[b.id.clone(), "plant::missing".to_string()])
            .await
            .unwrap();
        assert_eq!(found, vec![b]);
        assert!(repo.get_plants(&[]).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete_plant() {
        let repo = setup().await;
        let mut fern = plant("Fern", None, 1);
        repo.store_plant(&fern).await.unwrap();

        fern.name = "Boston fern".to_string();
        fern.updated_at = at(9);
        assert!(repo.update_plant(&fern).await.unwrap());
        assert_eq!(repo.get_plant(&fern.id).await.unwrap().unwrap().name, "Boston fern");

        assert!(repo.delete_plant(&fern.id).await.unwrap());
        assert!(!repo.delete_plant(&fern.id).await.unwrap());
        assert!(!repo.update_plant(&fern).await.unwrap());
    }
}
