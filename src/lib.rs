//! Reactive FSM: a state machine engine driven by automatic transitions.
//!
//! A machine is described by a table of automatic transitions (at most one per
//! source state) and a set of entry and exit actions. Starting the machine
//! enters the initial state and then follows automatic transitions until none
//! applies, running the matching actions for every hop on a dedicated worker.
//!
//! # Core Concepts
//!
//! - **Actions**: entry/exit callbacks, optionally scoped to one adjacent state
//!   and optionally gated by a guard
//! - **Fault isolation**: a failing guard or action is skipped and reported,
//!   the cascade carries on
//! - **Events**: `Started`, `StateChanged` and `Fault` reach every
//!   asynchronous subscriber, none are dropped
//!
//! # Example
//!
//! ```rust
//! use reactive_fsm::{Action, MachineBuilder, MachineEvent};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let machine = MachineBuilder::new(0u8)
//!     .add_automatic_chain([0, 1, 2])?
//!     .add_entry_action(2, Action::new(|| println!("arrived")))?
//!     .build()?;
//!
//! let mut events = machine.subscribe();
//! let summary = machine.start()?.wait().await?;
//! assert_eq!(summary.final_state, 2);
//!
//! assert_eq!(events.recv().await, Some(MachineEvent::Started { state: 0 }));
//! assert_eq!(events.recv().await, Some(MachineEvent::StateChanged { from: 0, to: 1 }));
//! assert_eq!(events.recv().await, Some(MachineEvent::StateChanged { from: 1, to: 2 }));
//! # Ok(())
//! # }
//! ```

pub mod builder;
pub mod config;
pub mod core;
pub mod dispatch;
pub mod registry;

// Re-export commonly used types
pub use builder::{BuildError, ErrorKind, MachineBuilder};
pub use config::MachineConfig;
pub use self::core::{Action, ActionError, Guard, State, StateHistory, StateTransition};
pub use dispatch::{
    MachineEvent, MachineFault, MachineHandle, ReactiveStateMachine, RunError, RunState,
    RunSummary,
};
