//! Dispatch engine and notification surface.
//!
//! A started machine owns a single worker on the tokio blocking pool. The
//! worker runs every guard and action one at a time, in declaration order,
//! and publishes [`MachineEvent`]s to every subscriber's own unbounded channel.
//! Subscribers read from their receivers and never run on the worker.
//!
//! Ordering per hop `s -> s'`:
//! 1. exit actions of `s` that apply to `s'`
//! 2. current state becomes `s'`
//! 3. entry actions of `s'` that apply to `s`
//! 4. `StateChanged { from: s, to: s' }` is published
//!
//! The cascade ends when the current state has no automatic successor. A
//! cycle in the automatic transitions never ends unless
//! [`MachineConfig::max_cascade_hops`](crate::config::MachineConfig) is set.

mod engine;
mod error;
mod events;
mod invoker;
mod machine;

pub use error::RunError;
pub use events::{FaultStage, MachineEvent, MachineFault};
pub use invoker::{invoke, FaultDetail, Outcome};
pub use machine::{MachineHandle, MachineId, ReactiveStateMachine, RunState, RunSummary};
