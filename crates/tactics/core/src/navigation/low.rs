//! Low tier: line pursuit with a self-limiting repulsion field.

use std::collections::VecDeque;

use rand::Rng;

use super::{Outcome, shuffled_directions};
use crate::env::TickContext;
use crate::field::CostField;
use crate::state::Position;

/// One remembered cell and whether its push actually added heat.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct MemoryEntry {
    position: Position,
    heated: bool,
}

/// Cells the agent fled from, most recent last.
///
/// Pushing heats the cell by one; forgetting removes the oldest entry and
/// takes exactly that heat back, so a full push/forget cycle leaves the
/// field at its baseline even when a push hit the heat ceiling.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MemoryStack {
    entries: VecDeque<MemoryEntry>,
}

impl MemoryStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Remembers `position` and heats it.
    pub fn push(&mut self, field: &mut CostField, position: Position) {
        let heated = field.increment(position);
        self.entries.push_back(MemoryEntry { position, heated });
    }

    /// Forgets the oldest entry and cools its cell.
    pub fn forget_oldest(&mut self, field: &mut CostField) -> Option<Position> {
        let entry = self.entries.pop_front()?;
        if entry.heated {
            field.decrement(entry.position);
        }
        Some(entry.position)
    }

    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        self.entries.iter().map(|entry| entry.position)
    }
}

/// Adapted Bresenham step from `from` towards `to`.
///
/// Returns the first step of the rasterized line, each component in
/// `-1..=1`. Returns `(0, 0)` when both cells coincide.
pub fn line_step(from: Position, to: Position) -> (i32, i32) {
    let dx = (to.x - from.x).abs();
    let dy = (to.y - from.y).abs();
    let err = (if dx > dy { dx } else { -dy }) / 2;

    let sx = if err > -dx {
        if to.x > from.x { 1 } else { -1 }
    } else {
        0
    };
    let sy = if err < dy {
        if to.y > from.y { 1 } else { -1 }
    } else {
        0
    };
    (sx, sy)
}

/// Pursues the nearest opponent, fleeing sideways when the line is blocked.
///
/// Heat makes cells progressively less attractive without ever making them
/// impassable: a candidate cell is accepted only when a roll in
/// `[0, maximum)` is at least its heat.
#[derive(Clone, Debug, Default)]
pub struct LineStepNavigator {
    memory: MemoryStack,
    forgetting: bool,
}

impl LineStepNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory(&self) -> &MemoryStack {
        &self.memory
    }

    pub fn is_forgetting(&self) -> bool {
        self.forgetting
    }

    pub fn step<R: Rng + ?Sized>(
        &mut self,
        field: &mut CostField,
        ctx: &mut TickContext<'_>,
        rng: &mut R,
    ) -> Outcome {
        let origin = ctx.position();

        let mut moved = None;
        if let Some(target) = ctx.nearest_opponent() {
            let (dx, dy) = line_step(origin, target.position);
            if (dx, dy) != (0, 0) && self.try_move(field, ctx, rng, dx, dy) {
                moved = Some((dx, dy));
            }
        }

        if self.forgetting && !self.memory.is_empty() {
            if let Some(position) = self.memory.forget_oldest(field) {
                tracing::debug!(%position, "forgot oldest memory");
            }
            self.forgetting = false;
        }

        if let Some((dx, dy)) = moved {
            return Outcome::Moved { dx, dy };
        }

        for direction in shuffled_directions(rng) {
            let (dx, dy) = direction.delta();
            if self.try_move(field, ctx, rng, dx, dy) {
                self.memory.push(field, origin);
                tracing::debug!(%origin, %direction, "evaded around obstacle");
                return Outcome::Moved { dx, dy };
            }
        }

        self.forgetting = true;
        Outcome::Stuck
    }

    /// Pops the oldest memory regardless of the forgetting flag.
    pub fn forget_oldest(&mut self, field: &mut CostField) -> Option<Position> {
        self.memory.forget_oldest(field)
    }

    /// Records a successful evasion away from `origin`.
    pub fn remember(&mut self, field: &mut CostField, origin: Position) {
        self.memory.push(field, origin);
    }

    fn try_move<R: Rng + ?Sized>(
        &self,
        field: &CostField,
        ctx: &mut TickContext<'_>,
        rng: &mut R,
        dx: i32,
        dy: i32,
    ) -> bool {
        let destination = ctx.position().offset(dx, dy);
        if !ctx.terrain.contains(destination) {
            return false;
        }
        admits(field, destination, rng) && ctx.request_move(dx, dy)
    }
}

/// Deterrent roll: accept `position` when `roll in [0, maximum) >= heat`.
fn admits<R: Rng + ?Sized>(field: &CostField, position: Position, rng: &mut R) -> bool {
    let maximum = field.maximum();
    if maximum <= 0 {
        return true;
    }
    rng.random_range(0..maximum) >= field.get(position)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{MapDimensions, PcgRng};

    #[test]
    fn line_step_points_towards_target() {
        let origin = Position::new(5, 5);
        assert_eq!(line_step(origin, Position::new(9, 5)), (1, 0));
        assert_eq!(line_step(origin, Position::new(5, 1)), (0, -1));
        assert_eq!(line_step(origin, Position::new(8, 8)), (1, 1));
        assert_eq!(line_step(origin, Position::new(2, 2)), (-1, -1));
        assert_eq!(line_step(origin, origin), (0, 0));
    }

    #[test]
    fn line_step_follows_dominant_axis() {
        let origin = Position::new(0, 0);
        // Shallow slope: horizontal first
        assert_eq!(line_step(origin, Position::new(6, 1)), (1, 0));
        // Steep slope: vertical first
        assert_eq!(line_step(origin, Position::new(1, 6)), (0, 1));
    }

    #[test]
    fn memory_round_trip_restores_baseline() {
        let mut field = CostField::zeroed(MapDimensions::new(4, 4), 5);
        field.set(Position::new(1, 1), 4);
        let baseline = field.clone();

        let mut memory = MemoryStack::new();
        let cells = [
            Position::new(1, 1),
            Position::new(1, 1),
            Position::new(2, 3),
            Position::new(0, 0),
        ];
        for cell in cells {
            memory.push(&mut field, cell);
        }
        // Second push at (1, 1) hit the ceiling
        assert_eq!(field.get(Position::new(1, 1)), 5);

        for _ in 0..cells.len() {
            assert!(memory.forget_oldest(&mut field).is_some());
        }
        assert!(memory.is_empty());
        assert_eq!(field, baseline);
    }

    #[test]
    fn forgetting_pops_oldest_first() {
        let mut field = CostField::zeroed(MapDimensions::new(4, 4), 5);
        let mut memory = MemoryStack::new();
        memory.push(&mut field, Position::new(0, 0));
        memory.push(&mut field, Position::new(3, 3));
        assert_eq!(memory.forget_oldest(&mut field), Some(Position::new(0, 0)));
        assert_eq!(memory.positions().collect::<Vec<_>>(), vec![Position::new(3, 3)]);
    }

    #[test]
    fn cold_cells_are_always_admitted() {
        let field = CostField::zeroed(MapDimensions::new(2, 2), 5);
        let mut rng = PcgRng::new(11);
        assert!((0..100).all(|_| admits(&field, Position::ORIGIN, &mut rng)));
    }

    #[test]
    fn saturated_cells_are_never_admitted() {
        let mut field = CostField::zeroed(MapDimensions::new(2, 2), 5);
        field.set(Position::ORIGIN, 5);
        let mut rng = PcgRng::new(11);
        assert!((0..100).all(|_| !admits(&field, Position::ORIGIN, &mut rng)));
    }
}
