//! Build errors for the machine builder, action registry and transition table.

use crate::config::ConfigError;
use thiserror::Error;

/// Broad classification of a configuration error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required argument was absent.
    InvalidArgument,
    /// The arguments were present but the operation is not allowed.
    InvalidOperation,
}

/// Errors that can occur while configuring a state machine.
///
/// All of them are raised synchronously by the setup call that caused them.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Action not specified for {kind} action on state '{state}'")]
    MissingAction { kind: &'static str, state: String },

    #[error("Internal transition '{state}' -> '{state}' cannot trigger {kind} actions")]
    InternalTransition { kind: &'static str, state: String },

    #[error("Automatic transition '{state}' -> '{state}' is an internal transition")]
    SelfTransition { state: String },

    #[error(
        "Automatic transition from '{from}' already targets '{existing}', cannot add '{attempted}'"
    )]
    DuplicateAutomaticTransition {
        from: String,
        existing: String,
        attempted: String,
    },

    #[error("Automatic transitions form a cycle: {path}")]
    CyclicTransitions { path: String },

    #[error("Invalid machine configuration: {0}")]
    Config(#[from] ConfigError),
}

impl BuildError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingAction { .. } | Self::Config(_) => ErrorKind::InvalidArgument,
            Self::InternalTransition { .. }
            | Self::SelfTransition { .. }
            | Self::DuplicateAutomaticTransition { .. }
            | Self::CyclicTransitions { .. } => ErrorKind::InvalidOperation,
        }
    }
}
