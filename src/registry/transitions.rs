//! Automatic transition table.

use crate::builder::BuildError;
use crate::core::State;
use std::collections::{HashMap, HashSet};

/// At most one automatic successor per source state.
#[derive(Debug, Clone)]
pub struct TransitionTable<S: State> {
    automatic: HashMap<S, S>,
}

impl<S: State> Default for TransitionTable<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> TransitionTable<S> {
    pub fn new() -> Self {
        Self {
            automatic: HashMap::new(),
        }
    }

    /// Register an automatic transition `from -> to`.
    ///
    /// Fails when `from == to`, and when `from` already has an automatic
    /// successor. The table is left unchanged on failure.
    pub fn register_automatic(&mut self, from: S, to: S) -> Result<(), BuildError> {
        if from == to {
            return Err(BuildError::SelfTransition {
                state: format!("{:?}", from),
            });
        }

        if let Some(existing) = self.automatic.get(&from) {
            return Err(BuildError::DuplicateAutomaticTransition {
                from: format!("{:?}", from),
                existing: format!("{:?}", existing),
                attempted: format!("{:?}", to),
            });
        }

        self.automatic.insert(from, to);
        Ok(())
    }

    /// The automatic successor of `state`, if any.
    pub fn automatic_successor(&self, state: &S) -> Option<&S> {
        self.automatic.get(state)
    }

    /// Find a cycle reachable through automatic transitions.
    ///
    /// Returns the states on the cycle in traversal order, starting and
    /// ending with the same state.
    pub fn find_cycle(&self) -> Option<Vec<S>> {
        let mut finished: HashSet<&S> = HashSet::new();

        for start in self.automatic.keys() {
            if finished.contains(start) {
                continue;
            }

            let mut walk: Vec<&S> = Vec::new();
            let mut on_walk: HashSet<&S> = HashSet::new();
            let mut current = Some(start);

            while let Some(state) = current {
                if finished.contains(state) {
                    break;
                }
                if on_walk.contains(state) {
                    let begin = walk.iter().position(|s| *s == state).unwrap_or(0);
                    let mut cycle: Vec<S> = walk[begin..].iter().map(|s| (*s).clone()).collect();
                    cycle.push(state.clone());
                    return Some(cycle);
                }
                walk.push(state);
                on_walk.insert(state);
                current = self.automatic.get(state);
            }

            finished.extend(walk);
        }

        None
    }

    pub fn len(&self) -> usize {
        self.automatic.len()
    }

    pub fn is_empty(&self) -> bool {
        self.automatic.is_empty()
    }
}
