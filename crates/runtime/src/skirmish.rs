//! Reference in-memory battlefield.
//!
//! [`Skirmish`] applies the board rules the AI is written against: a
//! rotating turn order, a per-turn movement allowance in which diagonal steps
//! alternate between costing 1 and 2, and a rounded circular attack range.
//! Combat resolution is left to the host; attacks are only recorded.
//!
//! A move only checks its destination, so a delta longer than one cell is a
//! jump that costs the same as a single step.
use std::collections::VecDeque;
use std::sync::Arc;

use tactics_core::{
    Battlefield, Position, Side, TerrainOracle, UnitId, UnitSnapshot, env::within_attack_range,
};

use crate::error::{Result, RuntimeError};
use crate::oracle::GridMap;

/// A unit placed on a [`Skirmish`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Combatant {
    pub snapshot: UnitSnapshot,
    /// Movement allowance per turn; negative means unlimited.
    pub move_limit: i32,
}

impl Combatant {
    pub fn new(id: u32, position: Position, side: Side) -> Self {
        Self {
            snapshot: UnitSnapshot {
                id: UnitId(id),
                position,
                side,
                range: 1,
                intelligence: 0,
            },
            move_limit: -1,
        }
    }

    pub fn with_range(mut self, range: u32) -> Self {
        self.snapshot.range = range;
        self
    }

    pub fn with_intelligence(mut self, intelligence: i32) -> Self {
        self.snapshot.intelligence = intelligence;
        self
    }

    pub fn with_move_limit(mut self, move_limit: i32) -> Self {
        self.move_limit = move_limit;
        self
    }
}

/// An attack issued through [`Battlefield::attack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AttackRecord {
    pub attacker: UnitId,
    pub target: UnitId,
}

#[derive(Clone, Debug)]
pub struct Skirmish {
    map: Arc<GridMap>,
    units: Vec<Combatant>,
    turns: VecDeque<UnitId>,
    /// Allowance left for the active unit; negative means unlimited.
    moves_left: i32,
    diagonal_moves: u32,
    attacks: Vec<AttackRecord>,
    turns_taken: u64,
}

impl Skirmish {
    pub fn new(map: Arc<GridMap>) -> Self {
        Self {
            map,
            units: Vec::new(),
            turns: VecDeque::new(),
            moves_left: -1,
            diagonal_moves: 0,
            attacks: Vec::new(),
            turns_taken: 0,
        }
    }

    pub fn map(&self) -> &Arc<GridMap> {
        &self.map
    }

    /// Places a unit at the back of the turn order.
    pub fn spawn(&mut self, combatant: Combatant) -> Result<()> {
        let id = combatant.snapshot.id;
        let position = combatant.snapshot.position;
        if self.combatant(id).is_some() {
            return Err(RuntimeError::DuplicateUnit(id));
        }
        if !self.map.is_walkable(position) || self.is_occupied(position) {
            return Err(RuntimeError::BlockedPlacement { unit: id, position });
        }

        self.units.push(combatant);
        self.turns.push_back(id);
        if self.turns.len() == 1 {
            self.begin_turn();
        }
        Ok(())
    }

    /// Removes a unit from the board and the turn order.
    pub fn remove(&mut self, id: UnitId) -> Option<Combatant> {
        let index = self.units.iter().position(|unit| unit.snapshot.id == id)?;
        let was_active = self.turns.front() == Some(&id);
        self.turns.retain(|turn| *turn != id);
        if was_active {
            self.begin_turn();
        }
        Some(self.units.remove(index))
    }

    pub fn combatant(&self, id: UnitId) -> Option<&Combatant> {
        self.units.iter().find(|unit| unit.snapshot.id == id)
    }

    /// Teleports a unit, ignoring movement rules. Used to set up scenarios.
    pub fn place(&mut self, id: UnitId, position: Position) -> Result<()> {
        if !self.map.is_walkable(position) || self.is_occupied(position) {
            return Err(RuntimeError::BlockedPlacement { unit: id, position });
        }
        let unit = self
            .units
            .iter_mut()
            .find(|unit| unit.snapshot.id == id)
            .ok_or(RuntimeError::UnknownUnit(id))?;
        unit.snapshot.position = position;
        Ok(())
    }

    pub fn attacks(&self) -> &[AttackRecord] {
        &self.attacks
    }

    /// Number of completed turns.
    pub fn turns_taken(&self) -> u64 {
        self.turns_taken
    }

    fn begin_turn(&mut self) {
        self.moves_left = self
            .turns
            .front()
            .and_then(|id| self.combatant(*id))
            .map_or(-1, |unit| unit.move_limit);
        self.diagonal_moves = 0;
    }

    fn active_mut(&mut self) -> Option<&mut Combatant> {
        let id = *self.turns.front()?;
        self.units.iter_mut().find(|unit| unit.snapshot.id == id)
    }
}

impl Battlefield for Skirmish {
    fn active_unit(&self) -> Option<UnitId> {
        self.turns.front().copied()
    }

    fn is_occupied(&self, position: Position) -> bool {
        self.units
            .iter()
            .any(|unit| unit.snapshot.position == position)
    }

    fn units(&self) -> Vec<UnitSnapshot> {
        self.units.iter().map(|unit| unit.snapshot).collect()
    }

    fn targets_in_range(&self, unit: UnitId, from: Position) -> Vec<UnitId> {
        let Some(attacker) = self.combatant(unit).map(|unit| unit.snapshot) else {
            return Vec::new();
        };
        self.units
            .iter()
            .map(|other| other.snapshot)
            .filter(|other| other.id != unit && attacker.side.opposes(other.side))
            .filter(|other| within_attack_range(from, other.position, attacker.range))
            .map(|other| other.id)
            .collect()
    }

    fn request_move(&mut self, dx: i32, dy: i32) -> bool {
        if (dx, dy) == (0, 0) {
            return false;
        }
        let Some(origin) = self.active_mut().map(|unit| unit.snapshot.position) else {
            return false;
        };
        let destination = origin.offset(dx, dy);
        if !self.map.is_walkable(destination) || self.is_occupied(destination) {
            return false;
        }

        let diagonal = dx != 0 && dy != 0;
        if self.moves_left >= 0 {
            let cost = if diagonal {
                (self.diagonal_moves % 2 + 1) as i32
            } else {
                1
            };
            if cost > self.moves_left {
                return false;
            }
            self.moves_left -= cost;
        }
        if diagonal {
            self.diagonal_moves += 1;
        }

        if let Some(unit) = self.active_mut() {
            unit.snapshot.position = destination;
        }
        true
    }

    fn attack(&mut self, target: UnitId) {
        let Some(attacker) = self.active_unit() else {
            return;
        };
        tracing::info!(%attacker, %target, "attack");
        self.attacks.push(AttackRecord { attacker, target });
    }

    fn end_turn(&mut self) {
        if let Some(finished) = self.turns.pop_front() {
            self.turns.push_back(finished);
        }
        self.turns_taken += 1;
        self.begin_turn();
    }

    fn moves_remaining(&self) -> Option<u32> {
        u32::try_from(self.moves_left).ok()
    }
}
