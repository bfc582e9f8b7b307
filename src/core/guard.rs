//! Guard predicates for conditional entry and exit actions.
//!
//! A guard is a zero-argument predicate evaluated right before its action.
//! If it returns `false` the action is skipped. A guard that fails (returns
//! an error or panics) also skips its action, and the failure is reported.

use super::action::ActionError;
use std::fmt;
use std::sync::Arc;

type Predicate = dyn Fn() -> Result<bool, ActionError> + Send + Sync;

/// Predicate that decides whether a registered action runs.
///
/// # Example
///
/// ```rust
/// use reactive_fsm::core::Guard;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use std::sync::Arc;
///
/// let enabled = Arc::new(AtomicBool::new(true));
/// let flag = Arc::clone(&enabled);
/// let guard = Guard::new(move || flag.load(Ordering::SeqCst));
///
/// assert_eq!(guard.check(), Ok(true));
/// enabled.store(false, Ordering::SeqCst);
/// assert_eq!(guard.check(), Ok(false));
/// ```
#[derive(Clone)]
pub struct Guard {
    predicate: Arc<Predicate>,
}

impl Guard {
    /// Create a guard from a plain boolean predicate.
    ///
    /// The predicate must be thread-safe (Send + Sync); it runs on the
    /// dispatch worker.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn() -> bool + Send + Sync + 'static,
    {
        Self::fallible(move || Ok(predicate()))
    }

    /// Create a guard whose evaluation can fail.
    pub fn fallible<F>(predicate: F) -> Self
    where
        F: Fn() -> Result<bool, ActionError> + Send + Sync + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
        }
    }

    /// A guard that always allows its action.
    pub fn always() -> Self {
        Self::new(|| true)
    }

    /// Evaluate the predicate.
    pub fn check(&self) -> Result<bool, ActionError> {
        (self.predicate)()
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard").finish_non_exhaustive()
    }
}
