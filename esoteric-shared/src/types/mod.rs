//! Domain types for the esoteric repository.

mod chart;
mod graph;
mod reading;
mod user;

pub use chart::{Chart, NewChart};
pub use graph::{
    GraphNode, GraphPath, GraphStats, NodeDetail, PathResult, PatternQuery, PatternSearchResult,
    RelatedNode,
};
pub use reading::{NewReading, Orientation, PrivacyUpdate, Reading, ReadingPosition};
pub use user::{BirthDataUpdate, UpsertUser, User, ZodiacType, DEFAULT_HOUSE_SYSTEM};
