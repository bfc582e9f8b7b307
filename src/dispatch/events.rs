//! Machine events and the observer list that carries them.

use crate::core::State;
use crate::registry::ActionKind;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Which half of a registration failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultStage {
    Guard,
    Action,
}

/// A contained failure of a guard or action.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MachineFault<S> {
    /// Entry or exit registration
    pub kind: ActionKind,
    /// Whether the guard or the action failed
    pub stage: FaultStage,
    /// State the registration is attached to
    pub state: S,
    /// Predecessor (entry) or successor (exit) of the hop, `None` on start
    pub adjacent: Option<S>,
    /// Declaration order of the failed registration
    pub order: usize,
    pub message: String,
    /// True when the failure was a panic rather than a returned error
    pub panicked: bool,
}

/// Events published by a running machine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MachineEvent<S> {
    /// Entry actions of the initial state have run.
    Started { state: S },

    /// A hop completed, including all of its entry actions.
    StateChanged { from: S, to: S },

    /// A guard or action failed and was skipped.
    Fault(MachineFault<S>),
}

impl<S: State> MachineEvent<S> {
    pub fn is_state_change_to(&self, state: &S) -> bool {
        matches!(self, Self::StateChanged { to, .. } if to == state)
    }

    pub fn fault(&self) -> Option<&MachineFault<S>> {
        match self {
            Self::Fault(fault) => Some(fault),
            _ => None,
        }
    }
}

/// Observer list fanning events out to every subscriber.
///
/// Each subscriber owns an unbounded channel, so publishing never blocks the
/// worker and a slow subscriber never loses events. Subscribers only see
/// events published after they subscribed.
#[derive(Debug, Clone)]
pub(crate) struct EventBus<S: State> {
    observers: Arc<Mutex<Vec<mpsc::UnboundedSender<MachineEvent<S>>>>>,
}

impl<S: State> EventBus<S> {
    pub(crate) fn new() -> Self {
        Self {
            observers: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Deliver `event` to every live subscriber, dropping closed ones.
    pub(crate) fn publish(&self, event: MachineEvent<S>) {
        let mut observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        observers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    pub(crate) fn subscribe(&self) -> mpsc::UnboundedReceiver<MachineEvent<S>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.observers
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(tx);
        rx
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        let mut observers = self.observers.lock().unwrap_or_else(|e| e.into_inner());
        observers.retain(|tx| !tx.is_closed());
        observers.len()
    }
}
