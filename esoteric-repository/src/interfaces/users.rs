use esoteric_shared::{BirthDataUpdate, UpsertUser, User};

use crate::errors::RepositoryError;

/// Persistence of user profiles.
///
/// Users are created from identity provider claims, so there is no separate
/// registration step: `upsert_user` is called whenever claims are seen.
#[async_trait::async_trait]
pub trait UserRepository: Send + Sync {
    /// Fetch a user by identity subject.
    async fn get_user(&self, id: &str) -> Result<Option<User>, RepositoryError>;

    /// Insert the user, or refresh the profile fields of an existing one.
    async fn upsert_user(&self, user: &UpsertUser) -> Result<User, RepositoryError>;

    /// Apply a partial birth data update.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(User))` - The updated user
    /// * `Ok(None)` - No user with this id exists
    async fn update_birth_data(
        &self,
        id: &str,
        update: &BirthDataUpdate,
    ) -> Result<Option<User>, RepositoryError>;
}
