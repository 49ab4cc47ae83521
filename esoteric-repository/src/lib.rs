//! # Esoteric Repository
//!
//! Traits and implementations for persisting users, tarot readings and
//! astrological charts. It includes definitions for errors, interfaces,
//! and concrete implementations for PostgreSQL.
//!
//! Every reading and chart operation is scoped to an owner: a row that belongs
//! to another user behaves exactly like a missing row.

pub mod errors;
pub mod interfaces;
pub mod postgres;

pub use errors::RepositoryError;
pub use interfaces::{ChartRepository, ReadingRepository, UserRepository};
pub use postgres::{
    PostgresChartRepository, PostgresReadingRepository, PostgresUserRepository,
};
