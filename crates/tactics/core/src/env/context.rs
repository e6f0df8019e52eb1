//! Per-tick view of the world handed to navigators.

use crate::state::Position;

use super::{Battlefield, TerrainOracle, UnitId, UnitSnapshot};

/// Everything a navigator may read or command during one AI tick.
///
/// Unit positions are captured once at construction and treated as an
/// immutable snapshot for the rest of the decision; only the controlled
/// unit's own position is tracked as it moves.
pub struct TickContext<'a> {
    unit: UnitSnapshot,
    units: Vec<UnitSnapshot>,
    pub terrain: &'a dyn TerrainOracle,
    pub board: &'a mut dyn Battlefield,
}

impl<'a> TickContext<'a> {
    /// Captures the board snapshot for `unit`.
    ///
    /// Returns `None` when the unit is not on the board.
    pub fn new(
        unit: UnitId,
        terrain: &'a dyn TerrainOracle,
        board: &'a mut dyn Battlefield,
    ) -> Option<Self> {
        let units = board.units();
        let unit = units.iter().copied().find(|snapshot| snapshot.id == unit)?;
        Some(Self {
            unit,
            units,
            terrain,
            board,
        })
    }

    pub fn unit(&self) -> &UnitSnapshot {
        &self.unit
    }

    pub fn position(&self) -> Position {
        self.unit.position
    }

    pub fn units(&self) -> &[UnitSnapshot] {
        &self.units
    }

    /// Units of the opposite allegiance, in board order.
    pub fn opponents(&self) -> impl Iterator<Item = &UnitSnapshot> + '_ {
        let side = self.unit.side;
        self.units
            .iter()
            .filter(move |other| other.id != self.unit.id && side.opposes(other.side))
    }

    /// Euclidean-nearest opponent; ties go to the first one found.
    pub fn nearest_opponent(&self) -> Option<UnitSnapshot> {
        let origin = self.unit.position;
        let mut nearest: Option<(i64, UnitSnapshot)> = None;
        for other in self.opponents() {
            let distance = origin.distance_squared(other.position);
            if nearest.is_none_or(|(best, _)| distance < best) {
                nearest = Some((distance, *other));
            }
        }
        nearest.map(|(_, unit)| unit)
    }

    /// True when `position` is on the map, walkable and unoccupied.
    pub fn is_open(&self, position: Position) -> bool {
        self.terrain.is_walkable(position) && !self.board.is_occupied(position)
    }

    /// True when an opponent is in attack range as seen from `from`.
    pub fn threatens_from(&self, from: Position) -> bool {
        self.board.in_attack_range(self.unit.id, from)
    }

    /// Requests a move and tracks the controlled unit's position on success.
    pub fn request_move(&mut self, dx: i32, dy: i32) -> bool {
        let moved = self.board.request_move(dx, dy);
        if moved {
            self.unit.position = self.unit.position.offset(dx, dy);
        }
        moved
    }
}
