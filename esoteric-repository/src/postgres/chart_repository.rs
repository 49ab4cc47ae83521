//! PostgreSQL-backed chart repository.
use async_trait::async_trait;
use esoteric_shared::{Chart, NewChart};
use uuid::Uuid;

use super::rows::{ChartRow, CHART_COLUMNS};
use crate::errors::RepositoryError;
use crate::ChartRepository;

/// PostgreSQL-backed chart repository.
///
/// Every statement filters on both `id` and `user_id`.
pub struct PostgresChartRepository {
    pool: sqlx::PgPool,
}

impl PostgresChartRepository {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ChartRepository for PostgresChartRepository {
    async fn create_chart(
        &self,
        user_id: &str,
        chart: &NewChart,
    ) -> Result<Chart, RepositoryError> {
        let row = sqlx::query_as::<_, ChartRow>(&format!(
            r#"
            INSERT INTO charts (
                user_id, name, chart_type, date, time, location, latitude, longitude,
                house_system, zodiac_type, planetary_positions, houses, aspects, is_private, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {}
            "#,
            CHART_COLUMNS
        ))
        .bind(user_id)
        .bind(&chart.name)
        .bind(&chart.chart_type)
        .bind(chart.date)
        .bind(chart.time)
        .bind(&chart.location)
        .bind(chart.latitude)
        .bind(chart.longitude)
        .bind(&chart.house_system)
        .bind(chart.zodiac_type.as_str())
        .bind(&chart.planetary_positions)
        .bind(&chart.houses)
        .bind(&chart.aspects)
        .bind(chart.is_private)
        .bind(&chart.notes)
        .fetch_one(&self.pool)
        .await?;

        Chart::try_from(row)
    }

    async fn list_charts(&self, user_id: &str) -> Result<Vec<Chart>, RepositoryError> {
        let rows = sqlx::query_as::<_, ChartRow>(&format!(
            "SELECT {} FROM charts WHERE user_id = $1 ORDER BY created_at DESC",
            CHART_COLUMNS
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Chart::try_from).collect()
    }

    async fn get_chart(&self, id: Uuid, user_id: &str) -> Result<Option<Chart>, RepositoryError> {
        let row = sqlx::query_as::<_, ChartRow>(&format!(
            "SELECT {} FROM charts WHERE id = $1 AND user_id = $2",
            CHART_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Chart::try_from).transpose()
    }

    async fn delete_chart(&self, id: Uuid, user_id: &str) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM charts WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_chart_privacy(
        &self,
        id: Uuid,
        user_id: &str,
        is_private: bool,
    ) -> Result<Option<Chart>, RepositoryError> {
        let row = sqlx::query_as::<_, ChartRow>(&format!(
            "UPDATE charts SET is_private = $3 WHERE id = $1 AND user_id = $2 RETURNING {}",
            CHART_COLUMNS
        ))
        .bind(id)
        .bind(user_id)
        .bind(is_private)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Chart::try_from).transpose()
    }
}
