//! Engine error types.

use thiserror::Error;

use crate::session::TaskError;
use crate::settings::SettingsError;

/// Errors raised while the engine applies commands or publishes events.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A completion answer arrived with no completion awaiting one.
    #[error("no completed interval is waiting for an answer")]
    NoPendingDecision,

    /// Rejected settings update.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// Rejected task edit.
    #[error(transparent)]
    Task(#[from] TaskError),

    /// Every event receiver has been dropped.
    #[error("timer event channel closed")]
    EventChannelClosed,
}

impl EngineError {
    /// Returns true if the engine cannot keep running after this error.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::EventChannelClosed)
    }
}
