//! Error types.
//!
//! Pure engine operations (generation, evaluation, rewards) never fail.
//! These cover the edges: persistence collaborators and UI misuse.

use thiserror::Error;

use crate::change_engine::till::Denomination;

pub use crate::change_engine::money::MoneyParseError;

/// Failures from a [`ProgressStore`](super::store::ProgressStore).
///
/// The trainer logs these and carries on; they never reach scoring.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("progress file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("progress record is malformed: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A remote store could not be reached or refused the request.
    #[error("progress store unavailable: {0}")]
    Unavailable(String),
}

/// Requests the trainer refuses in its current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TrainerError {
    /// The current problem is already solved; request a new one first.
    #[error("submit is disabled until a new problem is requested")]
    SubmitDisabled,

    #[error("{0} is not in the till while pennies are off")]
    DenominationUnavailable(Denomination),
}
