//! Integration tests for the PostgreSQL repositories.
//!
//! These tests require a real PostgreSQL database and use SQLx test macros
//! to ensure proper test isolation and cleanup.
//!
//! Run with: `cargo test --test postgres_integration`

use chrono::{NaiveDate, NaiveTime};
use esoteric_repository::{
    ChartRepository, PostgresChartRepository, PostgresReadingRepository, PostgresUserRepository,
    ReadingRepository, UserRepository,
};
use esoteric_shared::{
    BirthDataUpdate, NewChart, NewReading, Orientation, ReadingPosition, UpsertUser, ZodiacType,
};
use serde_json::json;
use uuid::Uuid;

async fn seed_user(pool: &sqlx::PgPool, id: &str) {
    PostgresUserRepository::new(pool.clone())
        .upsert_user(&UpsertUser::with_id(id))
        .await
        .unwrap();
}

fn make_test_reading(spread: &str) -> NewReading {
    let mut reading = NewReading::new(
        spread,
        vec![
            ReadingPosition {
                position: "Past".to_string(),
                card: "The Hermit".to_string(),
                orientation: Orientation::Reversed,
                interpretation: Some("A period of withdrawal".to_string()),
            },
            ReadingPosition {
                position: "Present".to_string(),
                card: "Ace of Wands".to_string(),
                orientation: Orientation::Upright,
                interpretation: None,
            },
        ],
    );
    reading.question = Some("What should I focus on?".to_string());
    reading.tags = vec!["career".to_string(), "weekly".to_string()];
    reading
}

fn make_test_chart(name: &str) -> NewChart {
    NewChart {
        name: name.to_string(),
        chart_type: "Natal".to_string(),
        date: NaiveDate::from_ymd_opt(1992, 7, 19).unwrap(),
        time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
        location: "Kyoto, Japan".to_string(),
        latitude: 35.01,
        longitude: 135.77,
        house_system: "W".to_string(),
        zodiac_type: ZodiacType::Sidereal,
        planetary_positions: Some(json!({"sun": {"sign": "Cancer", "degree": 26.4}})),
        houses: None,
        aspects: None,
        is_private: true,
        notes: None,
    }
}

// ============================================================================
// Users
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_upsert_creates_and_refreshes_user(pool: sqlx::PgPool) {
    let repository = PostgresUserRepository::new(pool.clone());

    let created = repository
        .upsert_user(&UpsertUser {
            id: "sub-1".to_string(),
            email: Some("seer@example.com".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: None,
            profile_image_url: None,
        })
        .await
        .unwrap();

    assert_eq!(created.house_system, "P");
    assert_eq!(created.zodiac_type, ZodiacType::Tropical);

    let refreshed = repository
        .upsert_user(&UpsertUser {
            id: "sub-1".to_string(),
            email: Some("seer@example.com".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            profile_image_url: None,
        })
        .await
        .unwrap();

    assert_eq!(refreshed.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(refreshed.created_at, created.created_at);

    let count: i64 = sqlx::query_scalar("SELECT count(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_upsert_without_claims_keeps_profile(pool: sqlx::PgPool) {
    let repository = PostgresUserRepository::new(pool);

    repository
        .upsert_user(&UpsertUser {
            id: "sub-3".to_string(),
            email: Some("seer@example.com".to_string()),
            first_name: Some("Ada".to_string()),
            last_name: Some("Lovelace".to_string()),
            profile_image_url: Some("https://img.example/ada.png".to_string()),
        })
        .await
        .unwrap();

    let user = repository
        .upsert_user(&UpsertUser::with_id("sub-3"))
        .await
        .unwrap();

    assert_eq!(user.email.as_deref(), Some("seer@example.com"));
    assert_eq!(user.first_name.as_deref(), Some("Ada"));
    assert_eq!(user.last_name.as_deref(), Some("Lovelace"));
    assert_eq!(
        user.profile_image_url.as_deref(),
        Some("https://img.example/ada.png")
    );
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_get_nonexistent_user(pool: sqlx::PgPool) {
    let repository = PostgresUserRepository::new(pool);
    assert!(repository.get_user("nobody").await.unwrap().is_none());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_birth_data_update_is_partial(pool: sqlx::PgPool) {
    seed_user(&pool, "sub-2").await;
    let repository = PostgresUserRepository::new(pool);

    repository
        .update_birth_data(
            "sub-2",
            &BirthDataUpdate {
                birth_date: NaiveDate::from_ymd_opt(1985, 3, 21),
                birth_location: Some("Quito".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    let user = repository
        .update_birth_data(
            "sub-2",
            &BirthDataUpdate {
                zodiac_type: Some(ZodiacType::Sidereal),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(user.birth_date, NaiveDate::from_ymd_opt(1985, 3, 21));
    assert_eq!(user.birth_location.as_deref(), Some("Quito"));
    assert_eq!(user.zodiac_type, ZodiacType::Sidereal);
    assert_eq!(user.house_system, "P");
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_birth_data_update_unknown_user(pool: sqlx::PgPool) {
    let repository = PostgresUserRepository::new(pool);
    let result = repository
        .update_birth_data("ghost", &BirthDataUpdate::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

// ============================================================================
// Readings
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_create_and_get_reading(pool: sqlx::PgPool) {
    seed_user(&pool, "reader").await;
    let repository = PostgresReadingRepository::new(pool);

    let created = repository
        .create_reading("reader", &make_test_reading("Three Card"))
        .await
        .unwrap();

    assert_eq!(created.user_id, "reader");
    assert!(created.is_private);
    assert_eq!(created.positions.len(), 2);
    assert_eq!(created.positions[0].orientation, Orientation::Reversed);
    assert_eq!(created.tags, vec!["career", "weekly"]);

    let fetched = repository
        .get_reading(created.id, "reader")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(fetched, created);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_list_readings_newest_first(pool: sqlx::PgPool) {
    seed_user(&pool, "reader").await;
    seed_user(&pool, "other").await;
    let repository = PostgresReadingRepository::new(pool.clone());

    let first = repository
        .create_reading("reader", &make_test_reading("Single Card"))
        .await
        .unwrap();
    let second = repository
        .create_reading("reader", &make_test_reading("Celtic Cross"))
        .await
        .unwrap();
    repository
        .create_reading("other", &make_test_reading("Three Card"))
        .await
        .unwrap();

    // now() has microsecond resolution; separate the rows explicitly.
    sqlx::query("UPDATE readings SET created_at = created_at - interval '1 hour' WHERE id = $1")
        .bind(first.id)
        .execute(&pool)
        .await
        .unwrap();

    let readings = repository.list_readings("reader").await.unwrap();
    assert_eq!(readings.len(), 2);
    assert_eq!(readings[0].id, second.id);
    assert_eq!(readings[1].id, first.id);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_reading_is_invisible_to_other_users(pool: sqlx::PgPool) {
    seed_user(&pool, "owner").await;
    seed_user(&pool, "intruder").await;
    let repository = PostgresReadingRepository::new(pool);

    let reading = repository
        .create_reading("owner", &make_test_reading("Three Card"))
        .await
        .unwrap();

    assert!(repository
        .get_reading(reading.id, "intruder")
        .await
        .unwrap()
        .is_none());
    assert!(repository
        .update_reading_privacy(reading.id, "intruder", false)
        .await
        .unwrap()
        .is_none());
    assert!(!repository
        .delete_reading(reading.id, "intruder")
        .await
        .unwrap());

    let untouched = repository
        .get_reading(reading.id, "owner")
        .await
        .unwrap()
        .unwrap();
    assert!(untouched.is_private);
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_reading_privacy_and_delete(pool: sqlx::PgPool) {
    seed_user(&pool, "owner").await;
    let repository = PostgresReadingRepository::new(pool);

    let reading = repository
        .create_reading("owner", &make_test_reading("Three Card"))
        .await
        .unwrap();

    let updated = repository
        .update_reading_privacy(reading.id, "owner", false)
        .await
        .unwrap()
        .unwrap();
    assert!(!updated.is_private);

    assert!(repository.delete_reading(reading.id, "owner").await.unwrap());
    assert!(!repository.delete_reading(reading.id, "owner").await.unwrap());
    assert!(repository
        .get_reading(reading.id, "owner")
        .await
        .unwrap()
        .is_none());
}

// ============================================================================
// Charts
// ============================================================================

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_create_and_list_charts(pool: sqlx::PgPool) {
    seed_user(&pool, "astrologer").await;
    let repository = PostgresChartRepository::new(pool);

    let chart = repository
        .create_chart("astrologer", &make_test_chart("Birth chart"))
        .await
        .unwrap();

    assert_eq!(chart.house_system, "W");
    assert_eq!(chart.zodiac_type, ZodiacType::Sidereal);
    assert_eq!(
        chart.planetary_positions,
        Some(json!({"sun": {"sign": "Cancer", "degree": 26.4}}))
    );
    assert!(chart.houses.is_none());

    let charts = repository.list_charts("astrologer").await.unwrap();
    assert_eq!(charts.len(), 1);
    assert_eq!(charts[0].id, chart.id);
    assert!(repository.list_charts("someone-else").await.unwrap().is_empty());
}

#[sqlx::test(migrations = "src/postgres/migrations")]
async fn test_chart_ownership_filtering(pool: sqlx::PgPool) {
    seed_user(&pool, "astrologer").await;
    seed_user(&pool, "intruder").await;
    let repository = PostgresChartRepository::new(pool);

    let chart = repository
        .create_chart("astrologer", &make_test_chart("Solar return"))
        .await
        .unwrap();

    assert!(repository
        .get_chart(chart.id, "intruder")
        .await
        .unwrap()
        .is_none());
    assert!(!repository.delete_chart(chart.id, "intruder").await.unwrap());

    let updated = repository
        .update_chart_privacy(chart.id, "astrologer", false)
        .await
        .unwrap()
        .unwrap();
    assert!(!updated.is_private);

    assert!(repository
        .get_chart(Uuid::new_v4(), "astrologer")
        .await
        .unwrap()
        .is_none());
    assert!(repository.delete_chart(chart.id, "astrologer").await.unwrap());
}
