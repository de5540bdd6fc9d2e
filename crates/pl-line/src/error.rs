use pl_core::{CarrierId, StationId, TemplateId};
use thiserror::Error;

use crate::CarrierState;

#[derive(Debug, Error)]
pub enum LineError {
    #[error("station {0} does not exist")]
    UnknownStation(StationId),

    #[error("carrier {0} does not exist")]
    UnknownCarrier(CarrierId),

    #[error("recipe template {0} does not exist")]
    UnknownTemplate(TemplateId),

    #[error("station {station} already holds carrier {occupant}")]
    StationOccupied {
        station:  StationId,
        occupant: CarrierId,
    },

    #[error("station {station} is already claimed by carrier {claimant}")]
    StationClaimed {
        station:  StationId,
        claimant: CarrierId,
    },

    #[error("carrier {carrier}: illegal transition {from} -> {to}")]
    IllegalTransition {
        carrier: CarrierId,
        from:    CarrierState,
        to:      CarrierState,
    },

    #[error("carrier {carrier}: unexpected state {found}, expected {expected}")]
    UnexpectedState {
        carrier:  CarrierId,
        expected: CarrierState,
        found:    CarrierState,
    },

    #[error("carrier {0} has no further recipe steps")]
    RecipeExhausted(CarrierId),

    #[error("recipe template {0:?} has no steps")]
    EmptyRecipe(String),

    #[error("template library is empty")]
    EmptyLibrary,

    #[error("malformed line: {0}")]
    MalformedLine(String),
}

pub type LineResult<T> = Result<T, LineError>;
