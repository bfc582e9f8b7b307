//! Builder API for ergonomic state machine construction.
//!
//! Registrations are only possible on a [`MachineBuilder`]. Building consumes
//! it and freezes the action registry and transition table, so nothing can be
//! registered once a machine exists.

pub mod error;
pub mod machine;
pub mod macros;

pub use error::{BuildError, ErrorKind};
pub use machine::MachineBuilder;
