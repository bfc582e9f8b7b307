//! Entry and exit action registrations.

use crate::builder::BuildError;
use crate::core::{Action, Guard, State};
use std::collections::HashMap;
use std::fmt;

/// Whether a registration fires on entering or on exiting its target state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Entry,
    Exit,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Entry => "entry",
            Self::Exit => "exit",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single entry or exit action bound to a state.
///
/// `scope` narrows the registration to one adjacent state: the predecessor
/// for entry actions, the successor for exit actions.
#[derive(Debug, Clone)]
pub struct ActionRegistration<S: State> {
    kind: ActionKind,
    target: S,
    scope: Option<S>,
    action: Action,
    guard: Option<Guard>,
    order: usize,
}

impl<S: State> ActionRegistration<S> {
    /// Validate and create a registration.
    ///
    /// Fails with `MissingAction` when `action` is `None` and with
    /// `InternalTransition` when `scope` equals `target`.
    pub fn new(
        kind: ActionKind,
        target: S,
        scope: Option<S>,
        action: Option<Action>,
        guard: Option<Guard>,
        order: usize,
    ) -> Result<Self, BuildError> {
        let action = action.ok_or_else(|| BuildError::MissingAction {
            kind: kind.as_str(),
            state: format!("{:?}", target),
        })?;

        if scope.as_ref() == Some(&target) {
            return Err(BuildError::InternalTransition {
                kind: kind.as_str(),
                state: format!("{:?}", target),
            });
        }

        Ok(Self {
            kind,
            target,
            scope,
            action,
            guard,
            order,
        })
    }

    /// Whether this registration fires given the actual adjacent state.
    ///
    /// Unscoped registrations always apply. Scoped ones apply only when the
    /// adjacent state is present and equal to the scope.
    pub fn applies_to(&self, adjacent: Option<&S>) -> bool {
        match &self.scope {
            None => true,
            Some(scope) => adjacent == Some(scope),
        }
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn target(&self) -> &S {
        &self.target
    }

    pub fn scope(&self) -> Option<&S> {
        self.scope.as_ref()
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn guard(&self) -> Option<&Guard> {
        self.guard.as_ref()
    }

    /// Declaration sequence number, unique within one registry.
    pub fn order(&self) -> usize {
        self.order
    }
}

/// Entry and exit registrations indexed by target state.
///
/// Registrations for one target are kept in declaration order, so filtering
/// a bucket preserves the order the caller registered them in.
#[derive(Debug, Clone)]
pub struct ActionRegistry<S: State> {
    entry: HashMap<S, Vec<ActionRegistration<S>>>,
    exit: HashMap<S, Vec<ActionRegistration<S>>>,
    next_order: usize,
}

impl<S: State> Default for ActionRegistry<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: State> ActionRegistry<S> {
    pub fn new() -> Self {
        Self {
            entry: HashMap::new(),
            exit: HashMap::new(),
            next_order: 0,
        }
    }

    /// Register an action run when `target` is entered, optionally only
    /// when arriving from `from`. Returns the declaration order.
    pub fn register_entry(
        &mut self,
        target: S,
        from: Option<S>,
        action: Option<Action>,
        guard: Option<Guard>,
    ) -> Result<usize, BuildError> {
        self.register(ActionKind::Entry, target, from, action, guard)
    }

    /// Register an action run when `target` is exited, optionally only when
    /// departing to `to`. Returns the declaration order.
    pub fn register_exit(
        &mut self,
        target: S,
        to: Option<S>,
        action: Option<Action>,
        guard: Option<Guard>,
    ) -> Result<usize, BuildError> {
        self.register(ActionKind::Exit, target, to, action, guard)
    }

    fn register(
        &mut self,
        kind: ActionKind,
        target: S,
        scope: Option<S>,
        action: Option<Action>,
        guard: Option<Guard>,
    ) -> Result<usize, BuildError> {
        let order = self.next_order;
        let registration = ActionRegistration::new(kind, target, scope, action, guard, order)?;

        let buckets = match kind {
            ActionKind::Entry => &mut self.entry,
            ActionKind::Exit => &mut self.exit,
        };
        buckets
            .entry(registration.target.clone())
            .or_default()
            .push(registration);

        self.next_order += 1;
        Ok(order)
    }

    /// Entry actions to run when arriving at `to` from `from`.
    ///
    /// `from` is `None` for the initial state on start, in which case only
    /// unscoped registrations apply.
    pub fn applicable_entry_actions<'a>(
        &'a self,
        from: Option<&'a S>,
        to: &S,
    ) -> impl Iterator<Item = &'a ActionRegistration<S>> + 'a {
        self.entry
            .get(to)
            .into_iter()
            .flatten()
            .filter(move |r| r.applies_to(from))
    }

    /// Exit actions to run when leaving `from` for `to`.
    pub fn applicable_exit_actions<'a>(
        &'a self,
        from: &S,
        to: &'a S,
    ) -> impl Iterator<Item = &'a ActionRegistration<S>> + 'a {
        self.exit
            .get(from)
            .into_iter()
            .flatten()
            .filter(move |r| r.applies_to(Some(to)))
    }

    /// Total number of registrations of both kinds.
    pub fn len(&self) -> usize {
        self.next_order
    }

    pub fn is_empty(&self) -> bool {
        self.next_order == 0
    }
}
