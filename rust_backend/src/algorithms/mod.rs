//! Date-interval algorithms for staffing.
//!
//! # Components
//!
//! - [`overlap`]: closed-interval overlap between two date ranges
//! - [`conflicts`]: full-time double-booking detection over a roster
//!
//! # Example
//!
//! ```
//! use chrono::NaiveDate;
//! use obras_rust::algorithms::check_conflicts;
//! use obras_rust::models::{AssignmentState, AssignmentWindow, ObraId, ProfessionalAssignment};
//!
//! let candidate = ProfessionalAssignment {
//!     professional_name: "Ing. Juan Pérez".to_string(),
//!     obra_id: ObraId(1),
//!     participation_percentage: 100.0,
//!     window: AssignmentWindow::new(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap(), None),
//!     state: AssignmentState::Active,
//! };
//! let result = check_conflicts(&candidate, &[], &[], None);
//! assert!(result.available);
//! ```

pub mod conflicts;
pub mod overlap;

pub use conflicts::{
    check_conflicts, AssignmentConflict, ConflictResult, ProfessionalConflictChecker,
};
pub use overlap::{intersection, overlaps};
