//! Per-agent heat field.
//!
//! The low and mid tiers read heat as a probabilistic deterrent and a
//! pheromone-like trail; the high tier reuses the same field as a 0/1 marker
//! of cells visited during the current training episode.

use crate::env::MapDimensions;
use crate::state::{Grid, Position};

/// Grid of non-negative heat values bounded by a tier-specific maximum.
///
/// Every mutation clamps into `[0, maximum]`; off-grid reads yield 0 and
/// off-grid writes are ignored.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CostField {
    grid: Grid<i32>,
    maximum: i32,
}

impl CostField {
    /// A field of zeros.
    pub fn zeroed(dimensions: MapDimensions, maximum: i32) -> Self {
        Self {
            grid: Grid::filled(dimensions, 0),
            maximum: maximum.max(0),
        }
    }

    /// A radial gradient peaking at `center` and decaying to 0 towards the
    /// far edge of the map.
    ///
    /// Per-axis offsets are scaled by `maximum / longest_side` and truncated
    /// before taking the Euclidean norm, so the peak covers a small plateau
    /// around `center`.
    pub fn radial(dimensions: MapDimensions, maximum: i32, center: Position) -> Self {
        let maximum = maximum.max(0);
        let mult = maximum as f32 / dimensions.longest_side().max(1) as f32;
        let grid = Grid::from_fn(dimensions, |position| {
            let dx = ((position.x - center.x).abs() as f32 * mult) as i32;
            let dy = ((position.y - center.y).abs() as f32 * mult) as i32;
            let dist = ((dx * dx + dy * dy) as f32).sqrt() as i32;
            maximum - dist.min(maximum)
        });
        Self { grid, maximum }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.grid.dimensions()
    }

    pub fn maximum(&self) -> i32 {
        self.maximum
    }

    /// Heat at `position`; 0 off-grid.
    pub fn get(&self, position: Position) -> i32 {
        self.grid.get(position).copied().unwrap_or(0)
    }

    /// Stores `value` clamped into `[0, maximum]`.
    pub fn set(&mut self, position: Position, value: i32) {
        let maximum = self.maximum;
        if let Some(cell) = self.grid.get_mut(position) {
            *cell = value.clamp(0, maximum);
        }
    }

    /// Adds one unit of heat. Returns false when the cell is off-grid or saturated.
    pub fn increment(&mut self, position: Position) -> bool {
        let maximum = self.maximum;
        match self.grid.get_mut(position) {
            Some(cell) if *cell < maximum => {
                *cell += 1;
                true
            }
            _ => false,
        }
    }

    /// Removes one unit of heat. Returns false when the cell is off-grid or already 0.
    pub fn decrement(&mut self, position: Position) -> bool {
        match self.grid.get_mut(position) {
            Some(cell) if *cell > 0 => {
                *cell -= 1;
                true
            }
            _ => false,
        }
    }

    /// Resets every cell to 0.
    pub fn clear(&mut self) {
        self.grid.fill(0);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Position, i32)> + '_ {
        self.grid.iter().map(|(position, value)| (position, *value))
    }

    /// True when every cell lies within `[0, maximum]`.
    pub fn is_bounded(&self) -> bool {
        self.grid
            .values()
            .all(|value| (0..=self.maximum).contains(value))
    }
}
