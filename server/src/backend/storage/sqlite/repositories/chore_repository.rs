use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::RecurUnit;
use sqlx::sqlite::SqliteRow;
use sqlx::{QueryBuilder, Row, Sqlite};

use crate::backend::domain::models::chore::Chore;
use crate::backend::storage::sqlite::{decode_instant, encode_instant, like_pattern, DbConnection};
use crate::backend::storage::traits::ChoreStorage;

const CHORE_COLUMNS: &str = "id, plant_id, description, fertilizer_id, fertilizer_amount, recur_amount, recur_unit, notes, created_at, updated_at";

/// Repository for chore operations
#[derive(Clone)]
pub struct ChoreRepository {
    db: DbConnection,
}

impl ChoreRepository {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    fn from_row(row: &SqliteRow) -> Result<Chore> {
        let recur_amount = row
            .try_get::<Option<i64>, _>("recur_amount")?
            .map(u32::try_from)
            .transpose()
            .map_err(|e| anyhow!("Corrupt chore recur_amount: {}", e))?;
        let recur_unit = row
            .try_get::<Option<&str>, _>("recur_unit")?
            .map(str::parse::<RecurUnit>)
            .transpose()
            .map_err(|e| anyhow!("Corrupt chore row: {}", e))?;

        Ok(Chore {
            id: row.try_get("id")?,
            plant_id: row.try_get("plant_id")?,
            description: row.try_get("description")?,
            fertilizer_id: row.try_get("fertilizer_id")?,
            fertilizer_amount: row.try_get("fertilizer_amount")?,
            recur_amount,
            recur_unit,
            notes: row.try_get("notes")?,
            created_at: decode_instant(row.try_get("created_at")?)?,
            updated_at: decode_instant(row.try_get("updated_at")?)?,
        })
    }

    async fn fetch_where_in(&self, column: &str, values: &[String]) -> Result<Vec<Chore>> {
        if values.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {} FROM chores WHERE {} IN (",
            CHORE_COLUMNS, column
        ));
        let mut separated = builder.separated(", ");
        for value in values {
            separated.push_bind(value.as_str());
        }
        separated.push_unseparated(") ORDER BY created_at DESC, rowid DESC");

        let rows = builder.build().fetch_all(self.db.pool()).await?;
        rows.iter().map(Self::from_row).collect()
    }
}

#[async_trait]
impl ChoreStorage for ChoreRepository {
    async fn store_chore(&self, chore: &Chore) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO chores (id, plant_id, description, fertilizer_id, fertilizer_amount, recur_amount, recur_unit, notes, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&chore.id)
        .bind(&chore.plant_id)
        .bind(&chore.description)
        .bind(&chore.fertilizer_id)
        .bind(&chore.fertilizer_amount)
        .bind(chore.recur_amount.map(i64::from))
        .bind(chore.recur_unit.map(|unit| unit.as_str()))
        .bind(&chore.notes)
        .bind(encode_instant(&chore.created_at))
        .bind(encode_instant(&chore.updated_at))
        .execute(self.db.pool())
        .await?;
        Ok(())
    }

    async fn get_chore(&self, chore_id: &str) -> Result<Option<Chore>> {
        let row = sqlx::query(&format!("SELECT {} FROM chores WHERE id = ?", CHORE_COLUMNS))
            .bind(chore_id)
            .fetch_optional(self.db.pool())
            .await?;

        row.as_ref().map(Self::from_row).transpose()
    }

    async fn get_chores(&self, chore_ids: &[String]) -> Result<Vec<Chore>> {
        self.fetch_where_in("id", chore_ids).await
    }

    async fn list_chores(&self, search: Option<&str>) -> Result<Vec<Chore>> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {}
            FROM chores
            WHERE ?1 IS NULL OR notes LIKE ?1 ESCAPE '\'
            ORDER BY created_at DESC, rowid DESC
            "#,
            CHORE_COLUMNS
        ))
        .bind(search.map(like_pattern))
        .fetch_all(self.db.pool())
        .await?;

        rows.iter().map(Self::from_row).collect()
    }

    async fn list_chores_for_plants(&self, plant_ids: &[String]) -> Result<Vec<Chore>> {
        self.fetch_where_in("plant_id", plant_ids).await
    }

    async fn update_chore(&self, chore: &Chore) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE chores
            SET description = ?, fertilizer_id = ?, fertilizer_amount = ?,
                recur_amount = ?, recur_unit = ?, notes = ?, updated_at = ?
            WHERE id = ?
            "#,
        )
        .bind(&chore.description)
        .bind(&chore.fertilizer_id)
        .bind(&chore.fertilizer_amount)
        .bind(chore.recur_amount.map(i64::from))
        .bind(chore.recur_unit.map(|unit| unit.as_str()))
        .bind(&chore.notes)
        .bind(encode_instant(&chore.updated_at))
        .bind(&chore.id)
        .execute(self.db.pool())
        .await?;
        Ok(result.rows_affected() > 0)
    }

    async fn delete_chore(&self, chore_id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM chores WHERE id = ?")
            .bind(chore_id)
            .execute(self.db.pool())
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
