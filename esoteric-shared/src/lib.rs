//! # Esoteric Shared
//!
//! Domain types shared across the esoteric repository crates: user profiles
//! with birth data, tarot readings, astrological charts and the result shapes
//! returned by graph exploration.
//!
//! All types serialize to camelCase JSON, which is the wire format of the
//! HTTP API.

pub mod errors;
pub mod types;

pub use errors::ValidationError;
pub use types::{
    BirthDataUpdate, Chart, GraphNode, GraphPath, GraphStats, NewChart, NewReading, NodeDetail,
    Orientation, PathResult, PatternQuery, PatternSearchResult, PrivacyUpdate, Reading,
    ReadingPosition, RelatedNode, UpsertUser, User, ZodiacType, DEFAULT_HOUSE_SYSTEM,
};
