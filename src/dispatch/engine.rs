//! The cascade loop run by the dispatch worker.

use crate::core::{State, StateHistory, StateTransition};
use crate::dispatch::error::RunError;
use crate::dispatch::events::{EventBus, MachineEvent, MachineFault};
use crate::dispatch::invoker::{invoke, Outcome};
use crate::dispatch::machine::{MachineId, RunState, RunStateCell, RunSummary};
use crate::registry::{ActionRegistration, ActionRegistry, TransitionTable};
use chrono::Utc;
use std::sync::Arc;

/// Everything the worker needs, moved onto the worker thread on start.
pub(crate) struct Dispatcher<S: State> {
    pub(crate) id: MachineId,
    pub(crate) registry: Arc<ActionRegistry<S>>,
    pub(crate) table: Arc<TransitionTable<S>>,
    pub(crate) bus: EventBus<S>,
    pub(crate) max_hops: Option<usize>,
    pub(crate) run_state: Arc<RunStateCell>,
}

impl<S: State> Dispatcher<S> {
    /// Enter `initial`, then follow automatic transitions until none applies.
    ///
    /// Per hop: exit actions, state change, entry actions, `StateChanged`.
    pub(crate) fn run(self, initial: S) -> Result<RunSummary<S>, RunError> {
        let span = tracing::info_span!("fsm_dispatch", machine = %self.id);
        let _enter = span.enter();

        let mut faults = self.run_batch(self.registry.applicable_entry_actions(None, &initial), None);
        tracing::info!(state = ?initial, "State machine started");
        self.bus.publish(MachineEvent::Started {
            state: initial.clone(),
        });

        let mut current = initial;
        let mut history = StateHistory::new();

        while let Some(next) = self.table.automatic_successor(&current) {
            let next = next.clone();

            if let Some(limit) = self.max_hops {
                if history.len() >= limit {
                    tracing::warn!(state = ?current, limit, "Cascade hop limit reached, halting");
                    self.run_state.set(RunState::Halted);
                    return Err(RunError::HopLimitExceeded {
                        limit,
                        state: format!("{:?}", current),
                    });
                }
            }

            faults += self.run_batch(
                self.registry.applicable_exit_actions(&current, &next),
                Some(&next),
            );

            let from = std::mem::replace(&mut current, next);

            faults += self.run_batch(
                self.registry.applicable_entry_actions(Some(&from), &current),
                Some(&from),
            );

            let hop = history.len() + 1;
            tracing::debug!(from = ?from, to = ?current, hop, "State changed");
            history.push(StateTransition {
                from: from.clone(),
                to: current.clone(),
                timestamp: Utc::now(),
                hop,
            });
            self.bus.publish(MachineEvent::StateChanged {
                from,
                to: current.clone(),
            });
        }

        self.run_state.set(RunState::Quiescent);
        tracing::info!(state = ?current, hops = history.len(), faults, "State machine quiescent");

        Ok(RunSummary {
            machine_id: self.id,
            final_state: current,
            history,
            faults,
        })
    }

    /// Invoke each registration in order, publishing a fault event for every
    /// failure. Returns the number of faults.
    fn run_batch<'a>(
        &self,
        registrations: impl Iterator<Item = &'a ActionRegistration<S>>,
        adjacent: Option<&S>,
    ) -> usize {
        let mut faults = 0;

        for registration in registrations {
            match invoke(registration) {
                Outcome::Ran => {
                    tracing::debug!(
                        kind = %registration.kind(),
                        state = ?registration.target(),
                        order = registration.order(),
                        "Action ran"
                    );
                }
                Outcome::Skipped => {
                    tracing::debug!(
                        kind = %registration.kind(),
                        state = ?registration.target(),
                        order = registration.order(),
                        "Guard rejected action"
                    );
                }
                Outcome::Faulted(detail) => {
                    faults += 1;
                    tracing::warn!(
                        kind = %registration.kind(),
                        stage = ?detail.stage,
                        state = ?registration.target(),
                        order = registration.order(),
                        panicked = detail.panicked,
                        "State machine action failed: {}",
                        detail.message
                    );
                    self.bus.publish(MachineEvent::Fault(MachineFault {
                        kind: registration.kind(),
                        stage: detail.stage,
                        state: registration.target().clone(),
                        adjacent: adjacent.cloned(),
                        order: registration.order(),
                        message: detail.message,
                        panicked: detail.panicked,
                    }));
                }
            }
        }

        faults
    }
}
