//! Repository implementations module.
//!
//! This module contains the implementations of the `RosterRepository` trait:
//! - `local`: In-memory implementation for unit testing and local development
//! - `http`: Remote implementation over the public-works REST API

#[cfg(feature = "http-repo")]
pub mod http;
pub mod local;

#[cfg(feature = "http-repo")]
pub use http::HttpRosterRepository;
pub use local::{LocalRepository, RosterFixture};
