//! Guarded invocation of a single registration.
//!
//! Nothing raised by user code leaves this module: returned errors and panics
//! from either the guard or the action are turned into an [`Outcome`].

use crate::core::State;
use crate::dispatch::events::FaultStage;
use crate::registry::ActionRegistration;
use std::any::Any;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Captured failure of a guard or action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultDetail {
    pub stage: FaultStage,
    pub message: String,
    pub panicked: bool,
}

/// Result of invoking one registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The guard passed (or was absent) and the action completed.
    Ran,
    /// The guard returned false.
    Skipped,
    /// The guard or the action failed. A failed guard skips the action.
    Faulted(FaultDetail),
}

/// Evaluate the registration's guard, then run its action if allowed.
pub fn invoke<S: State>(registration: &ActionRegistration<S>) -> Outcome {
    if let Some(guard) = registration.guard() {
        match contain(FaultStage::Guard, || guard.check()) {
            Ok(true) => {}
            Ok(false) => return Outcome::Skipped,
            Err(detail) => return Outcome::Faulted(detail),
        }
    }

    match contain(FaultStage::Action, || registration.action().run()) {
        Ok(()) => Outcome::Ran,
        Err(detail) => Outcome::Faulted(detail),
    }
}

fn contain<T, F>(stage: FaultStage, f: F) -> Result<T, FaultDetail>
where
    F: FnOnce() -> Result<T, crate::core::ActionError>,
{
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(error)) => Err(FaultDetail {
            stage,
            message: error.to_string(),
            panicked: false,
        }),
        Err(payload) => Err(FaultDetail {
            stage,
            message: panic_payload_to_string(&payload),
            panicked: true,
        }),
    }
}

fn panic_payload_to_string(payload: &Box<dyn Any + Send>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
