//! Core State trait for state machine states.
//!
//! States are opaque to the engine. It only needs to compare them, hash them
//! into its lookup tables, clone them into events, and print them in logs.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state machine states.
///
/// Implemented automatically for every type with the required bounds, so
/// plain enums, integers and strings all work as states.
///
/// # Required Traits
///
/// - `Clone`: States are copied into events and history records
/// - `Eq` + `Hash`: States key the transition table and action registry
/// - `Debug`: States are rendered in logs and error messages
/// - `Send` + `Sync`: States cross into the dispatch worker and subscribers
///
/// # Example
///
/// ```rust
/// use reactive_fsm::core::State;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum TaskState {
///     Pending,
///     Running,
///     Complete,
/// }
///
/// fn accepts_state<S: State>(_state: S) {}
///
/// accepts_state(TaskState::Pending);
/// accepts_state(42u32);
/// accepts_state("idle".to_string());
/// ```
pub trait State: Clone + Eq + Hash + Debug + Send + Sync + 'static {}

impl<T> State for T where T: Clone + Eq + Hash + Debug + Send + Sync + 'static {}
