use esoteric_shared::{NewReading, Reading};
use uuid::Uuid;

use crate::errors::RepositoryError;

/// Persistence of tarot readings, always scoped to the owning user.
#[async_trait::async_trait]
pub trait ReadingRepository: Send + Sync {
    /// Store a new reading owned by `user_id`.
    async fn create_reading(
        &self,
        user_id: &str,
        reading: &NewReading,
    ) -> Result<Reading, RepositoryError>;

    /// All readings of a user, newest first.
    async fn list_readings(&self, user_id: &str) -> Result<Vec<Reading>, RepositoryError>;

    /// A reading by id, if it exists and belongs to `user_id`.
    async fn get_reading(
        &self,
        id: Uuid,
        user_id: &str,
    ) -> Result<Option<Reading>, RepositoryError>;

    /// Delete a reading. Returns `false` when nothing owned by `user_id` matched.
    async fn delete_reading(&self, id: Uuid, user_id: &str) -> Result<bool, RepositoryError>;

    /// Set the privacy flag and return the updated reading.
    async fn update_reading_privacy(
        &self,
        id: Uuid,
        user_id: &str,
        is_private: bool,
    ) -> Result<Option<Reading>, RepositoryError>;
}
