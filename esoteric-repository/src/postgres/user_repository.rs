//! PostgreSQL-backed user repository.
use async_trait::async_trait;
use esoteric_shared::{BirthDataUpdate, UpsertUser, User};

use super::rows::{UserRow, USER_COLUMNS};
use crate::errors::RepositoryError;
use crate::UserRepository;

/// PostgreSQL-backed user repository.
pub struct PostgresUserRepository {
    pool: sqlx::PgPool,
}

impl PostgresUserRepository {
    /// Creates a new repository over a pool with the `users` table migrated.
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn get_user(&self, id: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {} FROM users WHERE id = $1",
            USER_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }

    /// Claims missing from `user` keep their stored value.
    async fn upsert_user(&self, user: &UpsertUser) -> Result<User, RepositoryError> {
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            INSERT INTO users (id, email, first_name, last_name, profile_image_url)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id)
            DO UPDATE SET
                email = COALESCE(EXCLUDED.email, users.email),
                first_name = COALESCE(EXCLUDED.first_name, users.first_name),
                last_name = COALESCE(EXCLUDED.last_name, users.last_name),
                profile_image_url = COALESCE(EXCLUDED.profile_image_url, users.profile_image_url),
                updated_at = now()
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.profile_image_url)
        .fetch_one(&self.pool)
        .await?;

        User::try_from(row)
    }

    async fn update_birth_data(
        &self,
        id: &str,
        update: &BirthDataUpdate,
    ) -> Result<Option<User>, RepositoryError> {
        // COALESCE keeps the stored value for every field the update leaves out.
        let row = sqlx::query_as::<_, UserRow>(&format!(
            r#"
            UPDATE users SET
                birth_date = COALESCE($2, birth_date),
                birth_time = COALESCE($3, birth_time),
                birth_location = COALESCE($4, birth_location),
                birth_latitude = COALESCE($5, birth_latitude),
                birth_longitude = COALESCE($6, birth_longitude),
                house_system = COALESCE($7, house_system),
                zodiac_type = COALESCE($8, zodiac_type),
                updated_at = now()
            WHERE id = $1
            RETURNING {}
            "#,
            USER_COLUMNS
        ))
        .bind(id)
        .bind(update.birth_date)
        .bind(update.birth_time)
        .bind(&update.birth_location)
        .bind(update.birth_latitude)
        .bind(update.birth_longitude)
        .bind(&update.house_system)
        .bind(update.zodiac_type.map(|z| z.as_str()))
        .fetch_optional(&self.pool)
        .await?;

        row.map(User::try_from).transpose()
    }
}
