//! Engine error taxonomy.

use crate::timer::TimerPhase;
use std::io;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    /// No usable profile record: missing file, unparsable JSON or a missing key.
    #[error("no saved profile found")]
    NotFound,

    #[error("not enough gold: need {needed}, have {available}")]
    InsufficientFunds { needed: u64, available: u64 },

    #[error("you don't own any {0}")]
    NotOwned(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("no unspent stat points")]
    InsufficientPoints,

    #[error("cannot {action} while the timer is {phase}")]
    InvalidTransition {
        phase: TimerPhase,
        action: &'static str,
    },

    #[error("profile I/O failed: {0}")]
    Io(#[from] io::Error),
}

impl EngineError {
    pub fn invalid(message: impl Into<String>) -> Self {
        EngineError::InvalidArgument(message.into())
    }
}
