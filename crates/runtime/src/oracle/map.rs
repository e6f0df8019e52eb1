//! Static walkability grid served through [`tactics_core::TerrainOracle`].
use tactics_core::{MapDimensions, Position, StaticTile, TerrainKind, TerrainOracle};

use crate::error::{Result, RuntimeError};

/// TerrainOracle implementation with static map data.
///
/// Holds immutable map structure; units live on the battlefield.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    dimensions: MapDimensions,
    tiles: Vec<StaticTile>,
}

impl GridMap {
    /// Creates a map of floor tiles.
    pub fn open(width: u32, height: u32) -> Self {
        let dimensions = MapDimensions::new(width, height);
        Self {
            dimensions,
            tiles: vec![StaticTile::new(TerrainKind::Floor); dimensions.area()],
        }
    }

    /// Parses an ASCII layout.
    ///
    /// Glyphs: `.` floor, `#` wall, `~` water, space void. Unit markers
    /// (`@`, letters and digits) are read as floor so scenario sketches can
    /// be pasted verbatim.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let width = rows.first().map_or(0, |row| row.as_ref().chars().count());
        if width == 0 {
            return Err(RuntimeError::EmptyMap);
        }

        let mut tiles = Vec::with_capacity(width * rows.len());
        for (row, line) in rows.iter().enumerate() {
            let line = line.as_ref();
            let found = line.chars().count();
            if found != width {
                return Err(RuntimeError::RaggedMap {
                    row,
                    expected: width,
                    found,
                });
            }
            for (column, glyph) in line.chars().enumerate() {
                let terrain = match glyph {
                    '#' => TerrainKind::Wall,
                    '~' => TerrainKind::Water,
                    ' ' => TerrainKind::Void,
                    '.' | '@' => TerrainKind::Floor,
                    c if c.is_ascii_alphanumeric() => TerrainKind::Floor,
                    _ => return Err(RuntimeError::UnknownGlyph { glyph, row, column }),
                };
                tiles.push(StaticTile::new(terrain));
            }
        }

        Ok(Self {
            dimensions: MapDimensions::new(width as u32, rows.len() as u32),
            tiles,
        })
    }

    /// Replaces the tile at `position`; off-map positions are ignored.
    pub fn set(&mut self, position: Position, terrain: TerrainKind) {
        if let Some(index) = self.index(position) {
            self.tiles[index] = StaticTile::new(terrain);
        }
    }

    pub fn with_walls(mut self, walls: impl IntoIterator<Item = Position>) -> Self {
        for position in walls {
            self.set(position, TerrainKind::Wall);
        }
        self
    }

    /// Number of walkable tiles.
    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_passable()).count()
    }

    fn index(&self, position: Position) -> Option<usize> {
        self.dimensions
            .contains(position)
            .then(|| position.y as usize * self.dimensions.width as usize + position.x as usize)
    }
}

impl TerrainOracle for GridMap {
    fn dimensions(&self) -> MapDimensions {
        self.dimensions
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        self.index(position).map(|index| self.tiles[index])
    }
}
