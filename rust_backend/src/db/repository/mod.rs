//! Repository trait definitions for roster access.
//!
//! - [`error`]: Error types for repository operations
//! - [`roster`]: The [`RosterRepository`] trait

pub mod error;
pub mod roster;

pub use error::{RepositoryError, RepositoryResult};
pub use roster::RosterRepository;
