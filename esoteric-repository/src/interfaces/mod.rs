//! Interface definitions for the repository.
//!
//! The HTTP layer depends only on these traits so that storage can be swapped
//! for in-memory implementations in tests.
mod charts;
mod readings;
mod users;

pub use charts::ChartRepository;
pub use readings::ReadingRepository;
pub use users::UserRepository;
