//! Dispatch-ready lookup tables.
//!
//! Both tables are filled by the builder and frozen behind an `Arc` when the
//! machine is built; the dispatch worker only ever reads them.

mod actions;
mod transitions;

pub use actions::{ActionKind, ActionRegistration, ActionRegistry};
pub use transitions::TransitionTable;
