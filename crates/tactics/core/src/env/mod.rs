//! Traits describing the world outside the AI.
//!
//! [`TerrainOracle`] exposes static map geometry, [`Battlefield`] exposes unit
//! positions, occupancy and the commands an AI may issue. [`TickContext`]
//! bundles both for the duration of one decision so navigators need no
//! coupling to concrete implementations.
mod battlefield;
mod context;
mod map;
mod rng;

pub use battlefield::{Battlefield, Side, UnitId, UnitSnapshot, within_attack_range};
pub use context::TickContext;
pub use map::{MapDimensions, StaticTile, TerrainKind, TerrainOracle};
pub use rng::{PcgRng, compute_seed};
