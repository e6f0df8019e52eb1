use core::fmt;

use crate::state::Position;

/// Unique identifier of a unit on the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Allegiance of a unit. Units only ever target the other side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum Side {
    /// Units driven by a human player.
    Player,
    /// Units driven by this AI.
    Ai,
}

impl Side {
    pub fn opposes(self, other: Side) -> bool {
        self != other
    }
}

/// Immutable view of a unit for the duration of one decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitSnapshot {
    pub id: UnitId,
    pub position: Position,
    pub side: Side,
    /// Attack reach in tiles.
    pub range: u32,
    pub intelligence: i32,
}

/// Dynamic board state and the commands an AI may issue.
///
/// The battlefield always refers to the unit whose turn it currently is when
/// moving, attacking or ending a turn. Query methods take `&self` and must not
/// change what later queries in the same decision observe.
pub trait Battlefield {
    /// The unit whose turn it is, if any.
    fn active_unit(&self) -> Option<UnitId>;

    /// True when any unit stands on `position`.
    fn is_occupied(&self, position: Position) -> bool;

    /// Snapshot of every unit currently on the board.
    fn units(&self) -> Vec<UnitSnapshot>;

    /// Opposing units that `unit` could attack if it stood on `from`.
    fn targets_in_range(&self, unit: UnitId, from: Position) -> Vec<UnitId>;

    /// Attempts to move the active unit by `(dx, dy)` under the board's rules.
    fn request_move(&mut self, dx: i32, dy: i32) -> bool;

    /// Attacks `target` with the active unit. Resolution is the board's concern.
    fn attack(&mut self, target: UnitId);

    /// Hands the turn to the next unit.
    fn end_turn(&mut self);

    /// Movement allowance left this turn; `None` means unlimited.
    fn moves_remaining(&self) -> Option<u32> {
        None
    }

    fn in_attack_range(&self, unit: UnitId, from: Position) -> bool {
        !self.targets_in_range(unit, from).is_empty()
    }

    fn unit(&self, id: UnitId) -> Option<UnitSnapshot> {
        self.units().into_iter().find(|unit| unit.id == id)
    }
}

/// Rounded Euclidean range test used for melee and ranged attacks.
///
/// The distance is rounded half-up before comparison, so a diagonal neighbour
/// (distance ≈ 1.41) counts as range 1.
pub fn within_attack_range(from: Position, to: Position, range: u32) -> bool {
    let distance = (from.distance_squared(to) as f64).sqrt() + 0.5;
    (distance as u64) <= u64::from(range)
}
