use core::fmt;

use super::Direction;

/// Discrete grid position expressed in tile coordinates.
///
/// `y` grows downwards, matching the row-major layout of map data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the position shifted by a raw delta.
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Returns the neighbouring cell in `direction`.
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.offset(dx, dy)
    }

    /// Componentwise delta from `self` to `other`.
    pub const fn delta_to(self, other: Position) -> (i32, i32) {
        (other.x - self.x, other.y - self.y)
    }

    /// Squared Euclidean distance, exact in integer arithmetic.
    pub fn distance_squared(self, other: Position) -> i64 {
        let dx = i64::from(other.x - self.x);
        let dy = i64::from(other.y - self.y);
        dx * dx + dy * dy
    }

    /// True when `other` lies within `±range` of `self` on both axes.
    pub fn within_box(self, other: Position, range: u32) -> bool {
        let range = i64::from(range);
        (i64::from(other.x) - i64::from(self.x)).abs() <= range
            && (i64::from(other.y) - i64::from(self.y)).abs() <= range
    }

    /// True when `other` is one of the eight neighbours of `self`.
    pub fn is_adjacent(self, other: Position) -> bool {
        let (dx, dy) = self.delta_to(other);
        self != other && dx.abs() <= 1 && dy.abs() <= 1
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
