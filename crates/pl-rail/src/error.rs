use pl_core::{ManipulatorId, StationId};
use pl_line::LineError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RailError {
    /// Non-fatal: the move is refused and the manipulator is left as it was.
    #[error("manipulator {manipulator} cannot reach station {station}")]
    OutOfReach {
        manipulator: ManipulatorId,
        station:     StationId,
    },

    #[error("manipulator {0} does not exist")]
    UnknownManipulator(ManipulatorId),

    #[error("manipulator {0} is not holding a carrier")]
    NotHolding(ManipulatorId),

    #[error("manipulator {0} has no target station")]
    NoTarget(ManipulatorId),

    #[error("manipulator {manipulator} found no carrier to pick up at station {station}")]
    NothingToPickUp {
        manipulator: ManipulatorId,
        station:     StationId,
    },

    #[error("rail configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Line(#[from] LineError),
}

impl RailError {
    /// `true` for errors that only affect the offending operation.
    pub fn is_local(&self) -> bool {
        matches!(self, RailError::OutOfReach { .. })
    }
}

pub type RailResult<T> = Result<T, RailError>;
