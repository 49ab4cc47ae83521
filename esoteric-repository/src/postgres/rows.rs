//! Row types mirroring the table layouts, and their conversion into domain types.
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use esoteric_shared::{Chart, Reading, ReadingPosition, User, ZodiacType};
use serde_json::Value;
use sqlx::types::Json;
use uuid::Uuid;

use crate::errors::RepositoryError;

pub(crate) const USER_COLUMNS: &str = "id, email, first_name, last_name, profile_image_url, \
     birth_date, birth_time, birth_location, birth_latitude, birth_longitude, \
     house_system, zodiac_type, created_at, updated_at";

pub(crate) const READING_COLUMNS: &str =
    "id, user_id, spread_type, question, is_private, created_at, positions, synthesis, tags";

pub(crate) const CHART_COLUMNS: &str = "id, user_id, name, chart_type, date, time, location, \
     latitude, longitude, house_system, zodiac_type, planetary_positions, houses, aspects, \
     is_private, notes, created_at";

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct UserRow {
    id: String,
    email: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
    profile_image_url: Option<String>,
    birth_date: Option<NaiveDate>,
    birth_time: Option<NaiveTime>,
    birth_location: Option<String>,
    birth_latitude: Option<f32>,
    birth_longitude: Option<f32>,
    house_system: String,
    zodiac_type: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            zodiac_type: parse_zodiac(&row.zodiac_type)?,
            id: row.id,
            email: row.email,
            first_name: row.first_name,
            last_name: row.last_name,
            profile_image_url: row.profile_image_url,
            birth_date: row.birth_date,
            birth_time: row.birth_time,
            birth_location: row.birth_location,
            birth_latitude: row.birth_latitude,
            birth_longitude: row.birth_longitude,
            house_system: row.house_system,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ReadingRow {
    id: Uuid,
    user_id: String,
    spread_type: String,
    question: Option<String>,
    is_private: bool,
    created_at: DateTime<Utc>,
    positions: Json<Vec<ReadingPosition>>,
    synthesis: Option<String>,
    tags: Vec<String>,
}

impl From<ReadingRow> for Reading {
    fn from(row: ReadingRow) -> Self {
        Reading {
            id: row.id,
            user_id: row.user_id,
            spread_type: row.spread_type,
            question: row.question,
            is_private: row.is_private,
            created_at: row.created_at,
            positions: row.positions.0,
            synthesis: row.synthesis,
            tags: row.tags,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
pub(crate) struct ChartRow {
    id: Uuid,
    user_id: String,
    name: String,
    chart_type: String,
    date: NaiveDate,
    time: NaiveTime,
    location: String,
    latitude: f32,
    longitude: f32,
    house_system: String,
    zodiac_type: String,
    planetary_positions: Option<Value>,
    houses: Option<Value>,
    aspects: Option<Value>,
    is_private: bool,
    notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<ChartRow> for Chart {
    type Error = RepositoryError;

    fn try_from(row: ChartRow) -> Result<Self, Self::Error> {
        Ok(Chart {
            zodiac_type: parse_zodiac(&row.zodiac_type)?,
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            chart_type: row.chart_type,
            date: row.date,
            time: row.time,
            location: row.location,
            latitude: row.latitude,
            longitude: row.longitude,
            house_system: row.house_system,
            planetary_positions: row.planetary_positions,
            houses: row.houses,
            aspects: row.aspects,
            is_private: row.is_private,
            notes: row.notes,
            created_at: row.created_at,
        })
    }
}

fn parse_zodiac(value: &str) -> Result<ZodiacType, RepositoryError> {
    value
        .parse()
        .map_err(|_| RepositoryError::decode(format!("unknown zodiac_type '{}'", value)))
}
