//! Movement navigators for the three intelligence tiers.
//!
//! Each navigator runs to completion within one AI tick and reports what it
//! did through [`Outcome`]. "No valid move" is an ordinary outcome, never an
//! error.

mod high;
mod low;
mod mid;

use arrayvec::ArrayVec;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::state::Direction;

pub use high::GraphNavigator;
pub use low::{LineStepNavigator, MemoryStack, line_step};
pub use mid::{Scout, SwarmNavigator};

/// Result of one navigator invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The controlled unit moved by `(dx, dy)`.
    Moved { dx: i32, dy: i32 },
    /// A move by `(dx, dy)` was requested but the board refused it.
    Rejected { dx: i32, dy: i32 },
    /// Every candidate step was blocked or deterred.
    Stuck,
    /// Scouts advanced; the unit commits later in the cycle.
    Scouting,
    /// The terrain graph is still being trained; the unit stays put.
    Training,
    /// No route to the target exists on the learned graph.
    NoPath,
}

impl Outcome {
    pub fn moved(self) -> bool {
        matches!(self, Outcome::Moved { .. })
    }

    /// True when the tick produced no movement and retrying this turn is pointless.
    pub fn ends_turn(self) -> bool {
        matches!(
            self,
            Outcome::Rejected { .. } | Outcome::Stuck | Outcome::NoPath
        )
    }
}

/// The eight compass directions in a freshly shuffled order.
pub(crate) fn shuffled_directions<R: Rng + ?Sized>(rng: &mut R) -> ArrayVec<Direction, 8> {
    let mut directions = ArrayVec::from(Direction::ALL);
    directions.shuffle(rng);
    directions
}
