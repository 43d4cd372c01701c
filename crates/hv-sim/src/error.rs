//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while configuring or running a harvester simulation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] hv_core::HvError),

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Diverged at step {step} (t = {t} s): state is no longer finite")]
    Divergence { step: usize, t: f64 },

    #[error("Settled window is empty: starts at sample {start} of {len}")]
    EmptyWindow { start: usize, len: usize },
}

pub type SimResult<T> = Result<T, SimError>;
