//! In-memory implementations of the static oracles consumed by the AI.
mod map;

pub use map::GridMap;
