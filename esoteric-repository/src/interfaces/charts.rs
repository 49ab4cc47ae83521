use esoteric_shared::{Chart, NewChart};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// Persistence of astrological charts, always scoped to the owning user.
#[async_trait::async_trait]
pub trait ChartRepository: Send + Sync {
    async fn create_chart(&self, user_id: &str, chart: &NewChart)
        -> Result<Chart, RepositoryError>;

    /// All charts of a user, newest first.
    async fn list_charts(&self, user_id: &str) -> Result<Vec<Chart>, RepositoryError>;

    async fn get_chart(&self, id: Uuid, user_id: &str) -> Result<Option<Chart>, RepositoryError>;

    /// Delete a chart. Returns `false` when nothing owned by `user_id` matched.
    async fn delete_chart(&self, id: Uuid, user_id: &str) -> Result<bool, RepositoryError>;

    async fn update_chart_privacy(
        &self,
        id: Uuid,
        user_id: &str,
        is_private: bool,
    ) -> Result<Option<Chart>, RepositoryError>;
}
