//! Error types for the esoteric repository.
mod repository;

pub use repository::RepositoryError;
