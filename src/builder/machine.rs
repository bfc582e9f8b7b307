//! Builder for constructing state machines.

use crate::builder::error::BuildError;
use crate::config::MachineConfig;
use crate::core::{Action, Guard, State};
use crate::dispatch::ReactiveStateMachine;
use crate::registry::{ActionRegistry, TransitionTable};

/// Builder for constructing state machines with a fluent API.
///
/// Every `add_*` call validates its arguments immediately and returns the
/// builder on success, so setups chain with `?`. Actions are accepted as
/// `impl Into<Option<Action>>`; passing `None` fails with
/// [`BuildError::MissingAction`].
///
/// # Example
///
/// ```rust
/// use reactive_fsm::builder::MachineBuilder;
/// use reactive_fsm::core::Action;
///
/// # fn main() -> Result<(), reactive_fsm::builder::BuildError> {
/// let machine = MachineBuilder::new("collapsed")
///     .add_automatic_transition("collapsed", "fading_in")?
///     .add_entry_action("fading_in", Action::new(|| println!("fading in")))?
///     .add_exit_action_to("collapsed", "fading_in", Action::new(|| println!("leaving")))?
///     .build()?;
///
/// assert_eq!(machine.initial_state(), &"collapsed");
/// # Ok(())
/// # }
/// ```
pub struct MachineBuilder<S: State> {
    initial: S,
    registry: ActionRegistry<S>,
    table: TransitionTable<S>,
    config: MachineConfig,
}

impl<S: State> MachineBuilder<S> {
    /// Create a new builder for a machine starting in `initial`.
    pub fn new(initial: S) -> Self {
        Self {
            initial,
            registry: ActionRegistry::new(),
            table: TransitionTable::new(),
            config: MachineConfig::default(),
        }
    }

    /// Replace the machine configuration.
    pub fn config(mut self, config: MachineConfig) -> Self {
        self.config = config;
        self
    }

    /// Run `action` every time `state` is entered.
    pub fn add_entry_action(
        self,
        state: S,
        action: impl Into<Option<Action>>,
    ) -> Result<Self, BuildError> {
        self.entry(state, None, action.into(), None)
    }

    /// Run `action` every time `state` is entered and `guard` passes.
    pub fn add_entry_action_when(
        self,
        state: S,
        action: impl Into<Option<Action>>,
        guard: Guard,
    ) -> Result<Self, BuildError> {
        self.entry(state, None, action.into(), Some(guard))
    }

    /// Run `action` when `state` is entered from `from`.
    pub fn add_entry_action_from(
        self,
        state: S,
        from: S,
        action: impl Into<Option<Action>>,
    ) -> Result<Self, BuildError> {
        self.entry(state, Some(from), action.into(), None)
    }

    /// Run `action` when `state` is entered from `from` and `guard` passes.
    pub fn add_entry_action_from_when(
        self,
        state: S,
        from: S,
        action: impl Into<Option<Action>>,
        guard: Guard,
    ) -> Result<Self, BuildError> {
        self.entry(state, Some(from), action.into(), Some(guard))
    }

    /// Run `action` every time `state` is exited.
    pub fn add_exit_action(
        self,
        state: S,
        action: impl Into<Option<Action>>,
    ) -> Result<Self, BuildError> {
        self.exit(state, None, action.into(), None)
    }

    /// Run `action` every time `state` is exited and `guard` passes.
    pub fn add_exit_action_when(
        self,
        state: S,
        action: impl Into<Option<Action>>,
        guard: Guard,
    ) -> Result<Self, BuildError> {
        self.exit(state, None, action.into(), Some(guard))
    }

    /// Run `action` when `state` is exited towards `to`.
    pub fn add_exit_action_to(
        self,
        state: S,
        to: S,
        action: impl Into<Option<Action>>,
    ) -> Result<Self, BuildError> {
        self.exit(state, Some(to), action.into(), None)
    }

    /// Run `action` when `state` is exited towards `to` and `guard` passes.
    pub fn add_exit_action_to_when(
        self,
        state: S,
        to: S,
        action: impl Into<Option<Action>>,
        guard: Guard,
    ) -> Result<Self, BuildError> {
        self.exit(state, Some(to), action.into(), Some(guard))
    }

    /// Move from `from` to `to` automatically whenever `from` is reached.
    pub fn add_automatic_transition(mut self, from: S, to: S) -> Result<Self, BuildError> {
        self.table.register_automatic(from, to)?;
        Ok(self)
    }

    /// Register automatic transitions between consecutive states.
    ///
    /// `[a, b, c]` adds `a -> b` and `b -> c`.
    pub fn add_automatic_chain<I>(mut self, states: I) -> Result<Self, BuildError>
    where
        I: IntoIterator<Item = S>,
    {
        let mut states = states.into_iter();
        if let Some(mut previous) = states.next() {
            for next in states {
                self.table.register_automatic(previous, next.clone())?;
                previous = next;
            }
        }
        Ok(self)
    }

    fn entry(
        mut self,
        state: S,
        from: Option<S>,
        action: Option<Action>,
        guard: Option<Guard>,
    ) -> Result<Self, BuildError> {
        self.registry.register_entry(state, from, action, guard)?;
        Ok(self)
    }

    fn exit(
        mut self,
        state: S,
        to: Option<S>,
        action: Option<Action>,
        guard: Option<Guard>,
    ) -> Result<Self, BuildError> {
        self.registry.register_exit(state, to, action, guard)?;
        Ok(self)
    }

    /// Freeze the registrations into a machine.
    ///
    /// Fails if the configuration is invalid, or if `reject_cycles` is set
    /// and the automatic transitions contain a cycle.
    pub fn build(self) -> Result<ReactiveStateMachine<S>, BuildError> {
        self.config.validate()?;

        if self.config.reject_cycles {
            if let Some(cycle) = self.table.find_cycle() {
                let path = cycle
                    .iter()
                    .map(|s| format!("{:?}", s))
                    .collect::<Vec<_>>()
                    .join(" -> ");
                return Err(BuildError::CyclicTransitions { path });
            }
        }

        tracing::debug!(
            initial = ?self.initial,
            actions = self.registry.len(),
            automatic_transitions = self.table.len(),
            "Built state machine"
        );

        Ok(ReactiveStateMachine::new(
            self.initial,
            self.registry,
            self.table,
            self.config,
        ))
    }
}
