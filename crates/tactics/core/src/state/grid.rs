use crate::env::MapDimensions;

use super::Position;

/// Dense row-major storage with one value per map cell.
///
/// Off-grid access returns `None` instead of panicking so callers can treat
/// the map edge like any other blocked cell.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid<T> {
    dimensions: MapDimensions,
    cells: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// Creates a grid filled with `value`.
    pub fn filled(dimensions: MapDimensions, value: T) -> Self {
        Self {
            dimensions,
            cells: vec![value; dimensions.area()],
        }
    }

    /// Overwrites every cell with `value`.
    pub fn fill(&mut self, value: T) {
        self.cells.fill(value);
    }
}

impl<T> Grid<T> {
    /// Creates a grid by evaluating `init` once per cell in row-major order.
    pub fn from_fn(dimensions: MapDimensions, mut init: impl FnMut(Position) -> T) -> Self {
        let cells = dimensions.positions().map(&mut init).collect();
        Self { dimensions, cells }
    }

    pub fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    pub fn contains(&self, position: Position) -> bool {
        self.dimensions.contains(position)
    }

    pub fn get(&self, position: Position) -> Option<&T> {
        self.index_of(position).map(|index| &self.cells[index])
    }

    pub fn get_mut(&mut self, position: Position) -> Option<&mut T> {
        self.index_of(position).map(|index| &mut self.cells[index])
    }

    /// Iterates `(position, value)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &T)> + '_ {
        self.dimensions.positions().zip(self.cells.iter())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> + '_ {
        self.cells.iter()
    }

    fn index_of(&self, position: Position) -> Option<usize> {
        if !self.dimensions.contains(position) {
            return None;
        }
        Some(position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}
