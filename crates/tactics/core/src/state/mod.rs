//! Grid primitives shared by every navigator.
//!
//! Positions, compass directions and a dense row-major [`Grid`] container.
//! Per-agent layers (heat fields, graph nodes) are built on top of [`Grid`].
mod direction;
mod grid;
mod position;

pub use direction::Direction;
pub use grid::Grid;
pub use position::Position;
