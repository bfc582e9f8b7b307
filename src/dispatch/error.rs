//! Lifecycle errors of a running machine.
//!
//! Guard and action failures are never reported here; they are published as
//! fault events instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("State machine has already been started")]
    AlreadyStarted,

    #[error("No tokio runtime available to host the dispatch worker")]
    NoRuntime,

    #[error("Cascade exceeded {limit} hops, halted in state '{state}'")]
    HopLimitExceeded { limit: usize, state: String },

    #[error("Dispatch worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}
