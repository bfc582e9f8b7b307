//! The dispatch-ready machine and the handle to its running worker.

use crate::config::MachineConfig;
use crate::core::{State, StateHistory};
use crate::dispatch::engine::Dispatcher;
use crate::dispatch::error::RunError;
use crate::dispatch::events::{EventBus, MachineEvent};
use crate::registry::{ActionRegistry, TransitionTable};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Unique identifier of a machine instance, used in logs and run summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MachineId(Uuid);

impl MachineId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MachineId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MachineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle of a machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum RunState {
    NotStarted = 0,
    /// The dispatch worker is running the cascade.
    Running = 1,
    /// No automatic transition applies to the current state.
    Quiescent = 2,
    /// The cascade was stopped by the configured hop limit.
    Halted = 3,
}

impl RunState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::NotStarted,
            1 => Self::Running,
            2 => Self::Quiescent,
            _ => Self::Halted,
        }
    }
}

/// Run state shared between the machine and its worker.
#[derive(Debug)]
pub(crate) struct RunStateCell(AtomicU8);

impl RunStateCell {
    pub(crate) fn new() -> Self {
        Self(AtomicU8::new(RunState::NotStarted as u8))
    }

    pub(crate) fn get(&self) -> RunState {
        RunState::from_u8(self.0.load(Ordering::Acquire))
    }

    pub(crate) fn set(&self, state: RunState) {
        self.0.store(state as u8, Ordering::Release);
    }

    /// Move from `NotStarted` to `Running`; fails if already started.
    fn begin(&self) -> Result<(), RunError> {
        self.0
            .compare_exchange(
                RunState::NotStarted as u8,
                RunState::Running as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(|_| RunError::AlreadyStarted)
    }
}

/// What a completed cascade produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunSummary<S> {
    pub machine_id: MachineId,
    /// The state the machine came to rest in
    pub final_state: S,
    /// Every hop of the cascade, in order
    pub history: StateHistory<S>,
    /// Number of guard and action failures contained during the run
    pub faults: usize,
}

/// A configured, immutable state machine ready to start.
///
/// Produced by [`MachineBuilder::build`](crate::builder::MachineBuilder::build).
/// Subscribe before calling [`start`](Self::start) to observe every event.
pub struct ReactiveStateMachine<S: State> {
    id: MachineId,
    initial: S,
    registry: Arc<ActionRegistry<S>>,
    table: Arc<TransitionTable<S>>,
    bus: EventBus<S>,
    config: MachineConfig,
    run_state: Arc<RunStateCell>,
}

impl<S: State> ReactiveStateMachine<S> {
    pub(crate) fn new(
        initial: S,
        registry: ActionRegistry<S>,
        table: TransitionTable<S>,
        config: MachineConfig,
    ) -> Self {
        Self {
            id: MachineId::new(),
            initial,
            registry: Arc::new(registry),
            table: Arc::new(table),
            bus: EventBus::new(),
            config,
            run_state: Arc::new(RunStateCell::new()),
        }
    }

    pub fn id(&self) -> MachineId {
        self.id
    }

    pub fn initial_state(&self) -> &S {
        &self.initial
    }

    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    pub fn registry(&self) -> &ActionRegistry<S> {
        &self.registry
    }

    pub fn transitions(&self) -> &TransitionTable<S> {
        &self.table
    }

    pub fn run_state(&self) -> RunState {
        self.run_state.get()
    }

    /// Receive every event published from now on.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<MachineEvent<S>> {
        self.bus.subscribe()
    }

    pub fn subscriber_count(&self) -> usize {
        self.bus.subscriber_count()
    }

    /// Launch the dispatch worker and return immediately.
    ///
    /// The worker runs on the tokio blocking pool of the current runtime.
    /// A machine can be started once; later calls fail with
    /// [`RunError::AlreadyStarted`].
    pub fn start(&self) -> Result<MachineHandle<S>, RunError> {
        let runtime = Handle::try_current().map_err(|_| RunError::NoRuntime)?;
        self.run_state.begin()?;

        let dispatcher = Dispatcher {
            id: self.id,
            registry: Arc::clone(&self.registry),
            table: Arc::clone(&self.table),
            bus: self.bus.clone(),
            max_hops: self.config.max_cascade_hops,
            run_state: Arc::clone(&self.run_state),
        };
        let initial = self.initial.clone();

        tracing::debug!(machine = %self.id, state = ?initial, "Launching dispatch worker");
        let task = runtime.spawn_blocking(move || dispatcher.run(initial));

        Ok(MachineHandle { id: self.id, task })
    }
}

impl<S: State> fmt::Debug for ReactiveStateMachine<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactiveStateMachine")
            .field("id", &self.id)
            .field("initial", &self.initial)
            .field("run_state", &self.run_state.get())
            .field("actions", &self.registry.len())
            .field("automatic_transitions", &self.table.len())
            .finish()
    }
}

/// Handle to a started machine's dispatch worker.
///
/// Dropping the handle detaches the worker; the cascade still runs to
/// completion.
pub struct MachineHandle<S: State> {
    id: MachineId,
    task: JoinHandle<Result<RunSummary<S>, RunError>>,
}

impl<S: State> MachineHandle<S> {
    pub fn id(&self) -> MachineId {
        self.id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the cascade to come to rest.
    pub async fn wait(self) -> Result<RunSummary<S>, RunError> {
        self.task.await?
    }
}
