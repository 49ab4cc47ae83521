//! PostgreSQL-backed reading repository.
use async_trait::async_trait;
use esoteric_shared::{NewReading, Reading};
use sqlx::types::Json;
use uuid::Uuid;

use super::rows::{ReadingRow, READING_COLUMNS};
use crate::errors::RepositoryError;
use crate::ReadingRepository;

/// PostgreSQL-backed reading repository.
///
/// Every statement filters on both `id` and `user_id`.
pub struct PostgresReadingRepository {
    pool: sqlx::PgPool,
}

impl PostgresReadingRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ReadingRepository for PostgresReadingRepository {
    async fn create_reading(
        &self,
        user_id: &str,
        reading: &NewReading,
    ) -> Result<Reading, RepositoryError> {
        let row = sqlx::query_as::<_, ReadingRow>(&format!(
            r#"
            INSERT INTO readings (user_id, spread_type, question, is_private, positions, synthesis, tags)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {}
            "#,
            READING_COLUMNS
        ))
        .bind(user_id)
        .bind(&reading.spread_type)
        .bind(&reading.question)
        .bind(reading.is_private)
        .bind(Json(&reading.positions))
        .bind(&reading.synthesis)
        .bind(&reading.tags)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    async fn list_readings(&self, user_id: &str) -> Result<Vec<Reading>, RepositoryError> {
        let rows = sqlx::query_as::<_, ReadingRow>(&format!(
            "SELECT {} FROM readings WHERE user_id = $1 ORDER BY created_at DESC",
            READING_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Reading::from).collect())
    }

    async fn get_reading(
        &self,
        id: Uuid,
        user_id: &str,
    ) -> Result<Option<Reading>, RepositoryError> {
        let row = sqlx::query_as::<_, ReadingRow>(&format!(
            "SELECT {} FROM readings WHERE id = $1 AND user_id = $2",
            READING_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Reading::from))
    }

    async fn delete_reading(&self, id: Uuid, user_id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM readings WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_reading_privacy(
        &self,
        id: Uuid,
        user_id: &str,
        is_private: bool,
    ) -> Result<Option<Reading>, RepositoryError> {
        let row = sqlx::query_as::<_, ReadingRow>(&format!(
            "UPDATE readings SET is_private = $3 WHERE id = $1 AND user_id = $2 RETURNING {}",
            READING_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(is_private)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Reading::from))
    }
}
