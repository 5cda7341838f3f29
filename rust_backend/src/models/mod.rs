//! Value types shared by the validators, the conflict checker and the roster
//! repositories.
//!
//! Every type here is a plain value: validators build them fresh per call and
//! the engine keeps no state of its own.

pub mod macros;

pub mod dates;
pub mod obra;
pub mod staffing;

pub use dates::*;
pub use obra::*;
pub use staffing::*;
