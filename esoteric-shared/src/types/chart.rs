//! Astrological charts.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::user::{validate_house_system, validate_latitude, validate_longitude};
use super::ZodiacType;
use crate::errors::ValidationError;
use crate::DEFAULT_HOUSE_SYSTEM;

/// A stored chart.
///
/// Planetary positions, house cusps and aspects are kept as opaque JSON as
/// returned by the ephemeris.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Chart {
    pub id: Uuid,
    pub user_id: String,
    pub name: String,
    /// Natal, Transit, Solar Return, etc.
    pub chart_type: String,

    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub latitude: f32,
    pub longitude: f32,

    pub house_system: String,
    pub zodiac_type: ZodiacType,

    pub planetary_positions: Option<Value>,
    pub houses: Option<Value>,
    pub aspects: Option<Value>,

    pub is_private: bool,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Body of a create-chart request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewChart {
    pub name: String,
    pub chart_type: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub location: String,
    pub latitude: f32,
    pub longitude: f32,
    #[serde(default = "default_house_system")]
    pub house_system: String,
    #[serde(default)]
    pub zodiac_type: ZodiacType,
    #[serde(default)]
    pub planetary_positions: Option<Value>,
    #[serde(default)]
    pub houses: Option<Value>,
    #[serde(default)]
    pub aspects: Option<Value>,
    #[serde(default = "default_private")]
    pub is_private: bool,
    #[serde(default)]
    pub notes: Option<String>,
}

fn default_house_system() -> String {
    DEFAULT_HOUSE_SYSTEM.to_string()
}

fn default_private() -> bool {
    true
}

impl NewChart {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::new("name is required"));
        }
        if self.chart_type.trim().is_empty() {
            return Err(ValidationError::new("chartType is required"));
        }
        if self.location.trim().is_empty() {
            return Err(ValidationError::new("location is required"));
        }
        validate_latitude("latitude", self.latitude)?;
        validate_longitude("longitude", self.longitude)?;
        validate_house_system(&self.house_system)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NATAL: &str = r#"{
        "name": "My natal chart",
        "chartType": "Natal",
        "date": "1988-11-02",
        "time": "06:45:00",
        "location": "Lisbon, Portugal",
        "latitude": 38.72,
        "longitude": -9.14
    }"#;

    #[test]
    fn test_new_chart_defaults() {
        let chart: NewChart = serde_json::from_str(NATAL).unwrap();

        assert_eq!(chart.house_system, "P");
        assert_eq!(chart.zodiac_type, ZodiacType::Tropical);
        assert!(chart.is_private);
        assert!(chart.planetary_positions.is_none());
        assert!(chart.validate().is_ok());
    }

    #[test]
    fn test_new_chart_requires_coordinates() {
        let result = serde_json::from_str::<NewChart>(
            r#"{"name": "x", "chartType": "Natal", "date": "1988-11-02",
                "time": "06:45:00", "location": "Lisbon"}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_new_chart_validation() {
        let mut chart: NewChart = serde_json::from_str(NATAL).unwrap();
        chart.latitude = -120.0;
        assert!(chart.validate().is_err());

        let mut chart: NewChart = serde_json::from_str(NATAL).unwrap();
        chart.name = String::new();
        assert_eq!(chart.validate().unwrap_err().reason(), "name is required");

        let mut chart: NewChart = serde_json::from_str(NATAL).unwrap();
        chart.house_system = "Placidus".to_string();
        assert!(chart.validate().is_err());
    }
}
