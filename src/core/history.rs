//! State transition history tracking.
//!
//! The dispatch worker records every completed hop of a run. The history is
//! handed back to the caller in the run summary once the machine is quiescent.

use super::state::State;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Record of a single completed hop.
///
/// # Example
///
/// ```rust
/// use reactive_fsm::core::StateTransition;
/// use chrono::Utc;
///
/// let transition = StateTransition {
///     from: "collapsed",
///     to: "fading_in",
///     timestamp: Utc::now(),
///     hop: 1,
/// };
/// assert_eq!(transition.hop, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateTransition<S> {
    /// The state being transitioned from
    pub from: S,
    /// The state being transitioned to
    pub to: S,
    /// When the hop completed (after its entry actions ran)
    pub timestamp: DateTime<Utc>,
    /// 1-based position of the hop within the cascade
    pub hop: usize,
}

/// Ordered history of state transitions.
///
/// The dispatch worker appends one transition per completed hop.
///
/// # Example
///
/// ```rust
/// use reactive_fsm::core::{StateHistory, StateTransition};
/// use chrono::Utc;
///
/// let mut history = StateHistory::new();
/// history.push(StateTransition { from: 'a', to: 'b', timestamp: Utc::now(), hop: 1 });
/// history.push(StateTransition { from: 'b', to: 'c', timestamp: Utc::now(), hop: 2 });
///
/// assert_eq!(history.get_path(), vec![&'a', &'b', &'c']);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StateHistory<S> {
    transitions: Vec<StateTransition<S>>,
}

impl<S: State> Default for StateHistory<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> StateHistory<S> {
    /// Create a new empty history.
    pub fn new() -> Self {
        Self {
            transitions: Vec::new(),
        }
    }

    /// Append a completed hop.
    pub fn push(&mut self, transition: StateTransition<S>) {
        self.transitions.push(transition);
    }

    /// Get the path of states traversed.
    ///
    /// Returns references to states in order: the `from` state of the first
    /// transition, then the `to` state of each transition.
    pub fn get_path(&self) -> Vec<&S> {
        let mut path = Vec::new();
        if let Some(first) = self.transitions.first() {
            path.push(&first.from);
        }
        for transition in &self.transitions {
            path.push(&transition.to);
        }
        path
    }

    /// Calculate total duration from first to last transition.
    ///
    /// Returns `None` if there are no transitions.
    pub fn duration(&self) -> Option<Duration> {
        if let (Some(first), Some(last)) = (self.transitions.first(), self.transitions.last()) {
            let duration = last.timestamp.signed_duration_since(first.timestamp);
            duration.to_std().ok()
        } else {
            None
        }
    }

    /// Get all transitions in the order they completed.
    pub fn transitions(&self) -> &[StateTransition<S>] {
        &self.transitions
    }

    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// The state the last recorded hop arrived at.
    pub fn last_state(&self) -> Option<&S> {
        self.transitions.last().map(|t| &t.to)
    }
}
