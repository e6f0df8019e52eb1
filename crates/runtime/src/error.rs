//! Error types surfaced by the runtime.
//!
//! Navigation failures inside a tick are ordinary outcomes and never reach
//! this type; only misuse of the driver, bad board edits and config/map
//! loading failures do.
use tactics_core::{Position, UnitId};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("no unit is taking its turn")]
    NoActiveUnit,

    #[error("unit {0} is not on the board")]
    UnknownUnit(UnitId),

    #[error("unit {0} is player controlled")]
    PlayerControlled(UnitId),

    #[error("unit {0} is AI controlled but has no brain")]
    MissingBrain(UnitId),

    #[error("unit {0} is already on the board")]
    DuplicateUnit(UnitId),

    #[error("cell {position} is not available for unit {unit}")]
    BlockedPlacement { unit: UnitId, position: Position },

    #[error("map is empty")]
    EmptyMap,

    #[error("map row {row} has {found} cells, expected {expected}")]
    RaggedMap {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("unknown map glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph {
        glyph: char,
        row: usize,
        column: usize,
    },

    #[error(transparent)]
    Load(#[from] anyhow::Error),
}
