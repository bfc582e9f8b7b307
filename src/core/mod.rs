//! Core state machine types.
//!
//! This module contains the building blocks shared by the registry and the
//! dispatch engine:
//! - State bounds via the `State` trait
//! - Entry/exit callbacks (`Action`) and their failure type
//! - Guard predicates for conditional actions
//! - Hop history recorded by the dispatch worker

mod action;
mod guard;
mod history;
mod state;

pub use action::{Action, ActionError};
pub use guard::Guard;
pub use history::{StateHistory, StateTransition};
pub use state::State;
