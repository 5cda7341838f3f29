//! Business rules for municipal public-works contracts.
//!
//! The crate validates obra (work), empresa (company) and consortium forms,
//! resolves the procurement law that governs a contract, and detects
//! double-booking of full-time professionals across concurrent works.
//!
//! - [`validation`]: pure form and field validators
//! - [`law`]: Ley 30225 / Ley 32069 selection by contract date
//! - [`algorithms`]: date overlap and staffing conflict detection
//! - [`services`]: repository-backed availability checks
//! - [`db`]: roster repository trait and backends
//! - [`config`]: `rules.toml` loading
//!
//! The library only emits `log` records; the host application installs the
//! logger.

pub mod algorithms;
pub mod config;
pub mod db;
pub mod law;
pub mod models;
pub mod services;
pub mod validation;

pub use algorithms::{check_conflicts, ConflictResult};
pub use validation::{ValidationError, ValidationResult};
