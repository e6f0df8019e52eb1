use crate::error::NavigationError;

/// One of the eight compass neighbours of a cell.
///
/// Discriminants follow the row-major 3×3 layout around the centre cell, which
/// is index 4 and has no variant:
///
/// ```text
/// +----+---+----+
/// | NW | N | NE |      0 1 2
/// +----+---+----+
/// | W  | X | E  |      3 X 5
/// +----+---+----+
/// | SW | S | SE |      6 7 8
/// +----+---+----+
/// ```
///
/// With this layout the opposite of index `i` is `8 - i` and the delta is
/// `(i % 3 - 1, i / 3 - 1)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum Direction {
    NorthWest = 0,
    North = 1,
    NorthEast = 2,
    West = 3,
    East = 5,
    SouthWest = 6,
    South = 7,
    SouthEast = 8,
}

impl Direction {
    pub const COUNT: usize = 8;

    pub const ALL: [Direction; Self::COUNT] = [
        Direction::NorthWest,
        Direction::North,
        Direction::NorthEast,
        Direction::West,
        Direction::East,
        Direction::SouthWest,
        Direction::South,
        Direction::SouthEast,
    ];

    /// Compass index in `0..=8`, never 4.
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Dense index in `0..8`, used to address per-direction arrays.
    pub const fn slot(self) -> usize {
        let index = self as usize;
        if index > 4 { index - 1 } else { index }
    }

    /// Decodes a compass index.
    ///
    /// # Errors
    ///
    /// Returns [`NavigationError::InvalidDirection`] for the centre (4) and for
    /// anything above 8.
    pub const fn from_index(index: u8) -> Result<Self, NavigationError> {
        match index {
            0 => Ok(Direction::NorthWest),
            1 => Ok(Direction::North),
            2 => Ok(Direction::NorthEast),
            3 => Ok(Direction::West),
            5 => Ok(Direction::East),
            6 => Ok(Direction::SouthWest),
            7 => Ok(Direction::South),
            8 => Ok(Direction::SouthEast),
            other => Err(NavigationError::InvalidDirection(other)),
        }
    }

    /// Returns the direction whose delta equals `(dx, dy)`, if any.
    pub fn from_delta(dx: i32, dy: i32) -> Option<Self> {
        if !(-1..=1).contains(&dx) || !(-1..=1).contains(&dy) {
            return None;
        }
        let index = (dy + 1) * 3 + (dx + 1);
        Self::from_index(index as u8).ok()
    }

    pub const fn delta(self) -> (i32, i32) {
        let index = self as i32;
        (index % 3 - 1, index / 3 - 1)
    }

    pub const fn opposite(self) -> Self {
        match self {
            Direction::NorthWest => Direction::SouthEast,
            Direction::North => Direction::South,
            Direction::NorthEast => Direction::SouthWest,
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::SouthWest => Direction::NorthEast,
            Direction::South => Direction::North,
            Direction::SouthEast => Direction::NorthWest,
        }
    }

    pub const fn is_diagonal(self) -> bool {
        let (dx, dy) = self.delta();
        dx != 0 && dy != 0
    }
}
