//! Tarot readings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ValidationError;

/// Whether a card was drawn upright or reversed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Upright,
    Reversed,
}

/// A single card placed in a spread position.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReadingPosition {
    /// Name of the spread position, e.g. "Past" or "Crossing".
    pub position: String,
    pub card: String,
    #[serde(default)]
    pub orientation: Orientation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interpretation: Option<String>,
}

/// A stored tarot reading.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reading {
    pub id: Uuid,
    pub user_id: String,
    /// Celtic Cross, Three Card, etc.
    pub spread_type: String,
    pub question: Option<String>,
    pub is_private: bool,
    pub created_at: DateTime<Utc>,
    pub positions: Vec<ReadingPosition>,
    pub synthesis: Option<String>,
    pub tags: Vec<String>,
}

/// Body of a create-reading request.
///
/// The owner is never read from the body; it is taken from the authenticated
/// identity when the reading is stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewReading {
    pub spread_type: String,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default = "default_private")]
    pub is_private: bool,
    pub positions: Vec<ReadingPosition>,
    #[serde(default)]
    pub synthesis: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

fn default_private() -> bool {
    true
}

impl NewReading {
    /// A private reading with no question, synthesis or tags.
    pub fn new(spread_type: impl Into<String>, positions: Vec<ReadingPosition>) -> Self {
        Self {
            spread_type: spread_type.into(),
            question: None,
            is_private: true,
            positions,
            synthesis: None,
            tags: Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.spread_type.trim().is_empty() {
            return Err(ValidationError::new("spreadType is required"));
        }
        if self.positions.is_empty() {
            return Err(ValidationError::new(
                "positions must contain at least one card",
            ));
        }
        for (idx, position) in self.positions.iter().enumerate() {
            if position.card.trim().is_empty() {
                return Err(ValidationError::new(format!(
                    "positions[{}].card is required",
                    idx
                )));
            }
            if position.position.trim().is_empty() {
                return Err(ValidationError::new(format!(
                    "positions[{}].position is required",
                    idx
                )));
            }
        }
        if self.tags.iter().any(|tag| tag.trim().is_empty()) {
            return Err(ValidationError::new("tags cannot contain empty values"));
        }
        Ok(())
    }
}

/// Body of a privacy toggle request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PrivacyUpdate {
    pub is_private: bool,
}
