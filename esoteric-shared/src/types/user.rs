//! User profiles and natal birth data.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::ValidationError;

/// Placidus, the house system used when none is chosen.
pub const DEFAULT_HOUSE_SYSTEM: &str = "P";

/// House system codes understood by the Swiss Ephemeris.
const HOUSE_SYSTEM_CODES: &str = "ABCDEFGHIKLMNOPQRSTUVWXY";

/// The zodiac a chart is cast in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ZodiacType {
    #[default]
    Tropical,
    Sidereal,
}

impl ZodiacType {
    /// The column value stored for this zodiac.
    pub fn as_str(&self) -> &'static str {
        match self {
            ZodiacType::Tropical => "tropical",
            ZodiacType::Sidereal => "sidereal",
        }
    }
}

impl fmt::Display for ZodiacType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZodiacType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "tropical" => Ok(ZodiacType::Tropical),
            "sidereal" => Ok(ZodiacType::Sidereal),
            other => Err(ValidationError::new(format!(
                "zodiacType must be 'tropical' or 'sidereal', got '{}'",
                other
            ))),
        }
    }
}

/// A user of the repository.
///
/// The `id` is the subject claim issued by the identity provider, so it is an
/// opaque string rather than a UUID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,

    pub birth_date: Option<NaiveDate>,
    pub birth_time: Option<NaiveTime>,
    pub birth_location: Option<String>,
    pub birth_latitude: Option<f32>,
    pub birth_longitude: Option<f32>,

    pub house_system: String,
    pub zodiac_type: ZodiacType,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Profile claims received from the identity provider on sign-in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpsertUser {
    pub id: String,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profile_image_url: Option<String>,
}

impl UpsertUser {
    /// Claims carrying only the subject.
    pub fn with_id(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Partial update of the birth data used for natal charts.
///
/// Fields left as `None` keep their stored value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BirthDataUpdate {
    #[serde(default)]
    pub birth_date: Option<NaiveDate>,
    #[serde(default)]
    pub birth_time: Option<NaiveTime>,
    #[serde(default)]
    pub birth_location: Option<String>,
    #[serde(default)]
    pub birth_latitude: Option<f32>,
    #[serde(default)]
    pub birth_longitude: Option<f32>,
    #[serde(default)]
    pub house_system: Option<String>,
    #[serde(default)]
    pub zodiac_type: Option<ZodiacType>,
}

impl BirthDataUpdate {
    /// True when the update would not change anything.
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(latitude) = self.birth_latitude {
            validate_latitude("birthLatitude", latitude)?;
        }
        if let Some(longitude) = self.birth_longitude {
            validate_longitude("birthLongitude", longitude)?;
        }
        if let Some(ref house_system) = self.house_system {
            validate_house_system(house_system)?;
        }
        Ok(())
    }
}

pub(crate) fn validate_latitude(field: &str, value: f32) -> Result<(), ValidationError> {
    if !value.is_finite() || !(-90.0..=90.0).contains(&value) {
        return Err(ValidationError::new(format!(
            "{} must be between -90 and 90",
            field
        )));
    }
    Ok(())
}

pub(crate) fn validate_longitude(field: &str, value: f32) -> Result<(), ValidationError> {
    if !value.is_finite() || !(-180.0..=180.0).contains(&value) {
        return Err(ValidationError::new(format!(
            "{} must be between -180 and 180",
            field
        )));
    }
    Ok(())
}

pub(crate) fn validate_house_system(code: &str) -> Result<(), ValidationError> {
    let mut chars = code.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if HOUSE_SYSTEM_CODES.contains(c) => Ok(()),
        _ => Err(ValidationError::new(format!(
            "houseSystem '{}' is not a known house system code",
            code
        ))),
    }
}
