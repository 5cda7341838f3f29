//! Service layer for repository-backed checks.
//!
//! Services sit between the roster repository and the caller (form handler,
//! CLI). They fetch what the pure algorithms need and keep infrastructure
//! failures separate from validation outcomes.

pub mod availability;
pub mod debounce;

pub use availability::{check_assignment, check_professional_availability, AvailabilityService};
pub use debounce::{AvailabilityDebouncer, PendingCheck, DEFAULT_DEBOUNCE};
