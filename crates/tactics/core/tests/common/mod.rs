#![allow(dead_code)]

use tactics_core::env::within_attack_range;
use tactics_core::{
    Battlefield, MapDimensions, Position, Side, StaticTile, TerrainKind, TerrainOracle, UnitId,
    UnitSnapshot,
};

pub const AI: UnitId = UnitId(1);
pub const PLAYER: UnitId = UnitId(2);

/// ASCII terrain: `#` is a wall, anything else floor.
#[derive(Clone)]
pub struct Ascii {
    rows: Vec<Vec<u8>>,
}

impl Ascii {
    pub fn new(rows: &[&str]) -> Self {
        Self {
            rows: rows.iter().map(|row| row.as_bytes().to_vec()).collect(),
        }
    }

    pub fn open(width: usize, height: usize) -> Self {
        Self {
            rows: vec![vec![b'.'; width]; height],
        }
    }
}

impl TerrainOracle for Ascii {
    fn dimensions(&self) -> MapDimensions {
        MapDimensions::new(
            self.rows.first().map_or(0, Vec::len) as u32,
            self.rows.len() as u32,
        )
    }

    fn tile(&self, position: Position) -> Option<StaticTile> {
        let row = self.rows.get(usize::try_from(position.y).ok()?)?;
        let cell = *row.get(usize::try_from(position.x).ok()?)?;
        let terrain = if cell == b'#' {
            TerrainKind::Wall
        } else {
            TerrainKind::Floor
        };
        Some(StaticTile::new(terrain))
    }
}

/// Minimal battlefield: the AI unit always has the turn.
pub struct Board {
    pub terrain: Ascii,
    pub units: Vec<UnitSnapshot>,
    pub moves: Vec<(i32, i32)>,
    pub turns_ended: u32,
}

impl Board {
    pub fn new(terrain: Ascii, ai: Position, player: Position) -> Self {
        Self {
            terrain,
            units: vec![
                UnitSnapshot {
                    id: AI,
                    position: ai,
                    side: Side::Ai,
                    range: 1,
                    intelligence: 0,
                },
                UnitSnapshot {
                    id: PLAYER,
                    position: player,
                    side: Side::Player,
                    range: 1,
                    intelligence: 0,
                },
            ],
            moves: Vec::new(),
            turns_ended: 0,
        }
    }

    pub fn position(&self) -> Position {
        self.units[0].position
    }
}

impl Battlefield for Board {
    fn active_unit(&self) -> Option<UnitId> {
        Some(AI)
    }

    fn is_occupied(&self, position: Position) -> bool {
        self.units.iter().any(|unit| unit.position == position)
    }

    fn units(&self) -> Vec<UnitSnapshot> {
        self.units.clone()
    }

    fn targets_in_range(&self, unit: UnitId, from: Position) -> Vec<UnitId> {
        let Some(attacker) = self.units.iter().find(|u| u.id == unit) else {
            return Vec::new();
        };
        self.units
            .iter()
            .filter(|other| attacker.side.opposes(other.side))
            .filter(|other| within_attack_range(from, other.position, attacker.range))
            .map(|other| other.id)
            .collect()
    }

    fn request_move(&mut self, dx: i32, dy: i32) -> bool {
        let destination = self.units[0].position.offset(dx, dy);
        if !self.terrain.is_walkable(destination) || self.is_occupied(destination) {
            return false;
        }
        self.units[0].position = destination;
        self.moves.push((dx, dy));
        true
    }

    fn attack(&mut self, _target: UnitId) {}

    fn end_turn(&mut self) {
        self.turns_ended += 1;
    }
}
