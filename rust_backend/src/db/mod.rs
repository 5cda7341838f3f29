//! Roster storage for the availability check.
//!
//! Validators never touch storage; only the availability service reads the
//! roster, through the [`RosterRepository`] trait.
//!
//! ```text
//! services::availability ──► RosterRepository ──┬─► LocalRepository (in-memory)
//!                                               └─► HttpRosterRepository (REST, `http-repo`)
//! ```
//!
//! - `repository`: trait definition and error types
//! - `repositories`: backend implementations
//! - `factory`: builds a backend from [`RepositoryType`]

pub mod factory;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repositories::{LocalRepository, RosterFixture};
pub use repository::{RepositoryError, RepositoryResult, RosterRepository};
