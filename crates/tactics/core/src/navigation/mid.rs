//! Mid tier: a scout swarm converging on the hottest reachable cell.

use rand::Rng;

use super::{Outcome, shuffled_directions};
use crate::env::TickContext;
use crate::field::CostField;
use crate::state::{Direction, Position};

/// A virtual token probing the heat field ahead of the controlled unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Scout {
    pub position: Position,
    /// Direction of the last successful step; its reverse is skipped next time.
    pub last: Option<Direction>,
}

impl Scout {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            last: None,
        }
    }
}

/// Swarm search over the agent's heat field.
///
/// Each cycle spends `moves_per_cycle` ticks advancing scouts; on the next
/// tick the unit steps towards the scout standing on the hottest cell and
/// the swarm is reseeded at the unit's position.
#[derive(Clone, Debug)]
pub struct SwarmNavigator {
    scouts: Vec<Scout>,
    moves: u32,
    moves_per_cycle: u32,
}

impl SwarmNavigator {
    pub fn new(origin: Position, scouts: usize, moves_per_cycle: u32) -> Self {
        Self {
            scouts: vec![Scout::at(origin); scouts.max(1)],
            moves: 0,
            moves_per_cycle,
        }
    }

    pub fn scouts(&self) -> &[Scout] {
        &self.scouts
    }

    /// Scout micro-turns spent in the current cycle.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    pub fn step<R: Rng + ?Sized>(
        &mut self,
        field: &mut CostField,
        ctx: &mut TickContext<'_>,
        rng: &mut R,
    ) -> Outcome {
        if self.moves < self.moves_per_cycle {
            self.advance(field, ctx, rng);
            self.moves += 1;
            return Outcome::Scouting;
        }

        let origin = ctx.position();
        let best = self.scouts[self.best_scout(field)];
        let (dx, dy) = origin.delta_to(best.position);
        self.moves = 0;

        let outcome = if ctx.request_move(dx, dy) {
            Outcome::Moved { dx, dy }
        } else {
            Outcome::Rejected { dx, dy }
        };
        tracing::debug!(%origin, target = %best.position, ?outcome, "swarm committed");

        self.reseed(ctx.position());
        outcome
    }

    /// Index of the scout on the hottest cell.
    ///
    /// Only strictly hotter cells than the running best (starting at 0)
    /// replace it, so ties and an all-cold swarm resolve to the lowest index.
    pub fn best_scout(&self, field: &CostField) -> usize {
        let mut best = 0;
        let mut best_heat = 0;
        for (index, scout) in self.scouts.iter().enumerate() {
            let heat = field.get(scout.position);
            if heat > best_heat {
                best = index;
                best_heat = heat;
            }
        }
        best
    }

    /// Places every scout on `position` and forgets their headings.
    pub fn reseed(&mut self, position: Position) {
        for scout in &mut self.scouts {
            *scout = Scout::at(position);
        }
    }

    /// Regroups the swarm on the current best scout, then moves every scout
    /// one step.
    ///
    /// Destinations rejected as unwalkable or occupied lose one unit of heat,
    /// so contested cells grow less attractive over time.
    fn advance<R: Rng + ?Sized>(
        &mut self,
        field: &mut CostField,
        ctx: &TickContext<'_>,
        rng: &mut R,
    ) {
        let leader = self.scouts[self.best_scout(field)].position;
        for scout in &mut self.scouts {
            scout.position = leader;
        }

        for scout in &mut self.scouts {
            let reverse = scout.last.map(Direction::opposite);
            for direction in shuffled_directions(rng) {
                if Some(direction) == reverse {
                    continue;
                }
                let destination = scout.position.step(direction);
                if !ctx.terrain.contains(destination) {
                    continue;
                }
                if ctx.is_open(destination) {
                    scout.position = destination;
                    scout.last = Some(direction);
                    break;
                }
                field.decrement(destination);
            }
        }
    }
}
