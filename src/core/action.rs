//! Entry and exit action callbacks.
//!
//! Actions are user-supplied side effects run by the dispatch worker when a
//! state is entered or exited. An action can fail either by returning an
//! [`ActionError`] or by panicking; both are contained by the invoker and
//! reported as fault events.

use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Failure reported by a user-supplied action or guard.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ActionError {
    message: String,
}

impl ActionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<&str> for ActionError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

impl From<String> for ActionError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

type ActionFn = dyn Fn() -> Result<(), ActionError> + Send + Sync;

/// A reusable, shareable entry or exit action.
///
/// The same `Action` may be registered any number of times; each registration
/// invokes it independently.
///
/// # Example
///
/// ```rust
/// use reactive_fsm::core::{Action, ActionError};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let calls = Arc::new(AtomicUsize::new(0));
/// let counter = Arc::clone(&calls);
/// let action = Action::new(move || {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// action.run().unwrap();
/// action.run().unwrap();
/// assert_eq!(calls.load(Ordering::SeqCst), 2);
///
/// let failing = Action::fallible(|| Err(ActionError::new("disk full")));
/// assert!(failing.run().is_err());
/// ```
#[derive(Clone)]
pub struct Action {
    run: Arc<ActionFn>,
}

impl Action {
    /// Create an action from a closure that cannot report failure.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        Self::fallible(move || {
            action();
            Ok(())
        })
    }

    /// Create an action from a closure that reports failure through `Err`.
    pub fn fallible<F>(action: F) -> Self
    where
        F: Fn() -> Result<(), ActionError> + Send + Sync + 'static,
    {
        Self {
            run: Arc::new(action),
        }
    }

    /// Run the action on the calling thread.
    ///
    /// Panics raised by the closure are not caught here; the dispatch
    /// invoker is responsible for containing them.
    pub fn run(&self) -> Result<(), ActionError> {
        (self.run)()
    }
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}
