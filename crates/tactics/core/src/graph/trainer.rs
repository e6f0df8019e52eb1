//! Episode-based calibration of terrain graph edge weights.
//!
//! The trainer walks a virtual cursor from the agent's cell over open
//! neighbours until an opponent comes into attack range. Each finished
//! episode updates the running path-length statistics and nudges every edge
//! of the episode's path by `median - length`.

use rand::Rng;

use super::TerrainGraph;
use super::terrain::INITIAL_EDGE_COST;
use crate::env::TickContext;
use crate::error::{NavigationError, TacticsError};
use crate::field::CostField;
use crate::navigation::shuffled_directions;
use crate::state::{Direction, Position};

/// Tagged state of the high tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum TrainingPhase {
    /// Random-walking towards the target.
    Exploring,
    /// The target came into range; calibration runs on the next step.
    EpisodeDone,
    /// Budget exhausted; the shortest-path planner takes over.
    Navigating,
}

/// Path-length statistics that persist across episodes.
///
/// `median` is the midpoint of `min` and `max`, not a statistical median.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrainingStats {
    min: u32,
    max: u32,
    median: u32,
    episodes: u32,
}

impl TrainingStats {
    pub fn new() -> Self {
        Self {
            min: u32::MAX,
            max: 0,
            median: INITIAL_EDGE_COST,
            episodes: 0,
        }
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn median(&self) -> u32 {
        self.median
    }

    /// Completed (not abandoned) episodes folded into the statistics.
    pub fn episodes(&self) -> u32 {
        self.episodes
    }

    pub fn record(&mut self, length: u32) {
        self.min = self.min.min(length);
        self.max = self.max.max(length);
        self.median = ((u64::from(self.min) + u64::from(self.max)) / 2) as u32;
        self.episodes += 1;
    }

    /// `min <= median <= max` once at least one episode was recorded.
    pub fn is_consistent(&self) -> bool {
        self.episodes == 0 || (self.min <= self.median && self.median <= self.max)
    }
}

impl Default for TrainingStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Training state machine of one agent.
#[derive(Clone, Debug)]
pub struct GraphTrainer {
    phase: TrainingPhase,
    position: Position,
    stats: TrainingStats,
    /// Direction indices of the current episode, in walk order.
    path: Vec<u8>,
    iterations: u32,
    abandoned: u32,
    budget: u32,
    max_episode_steps: u32,
}

impl GraphTrainer {
    pub fn new(origin: Position, budget: u32, max_episode_steps: u32) -> Self {
        Self {
            phase: TrainingPhase::Exploring,
            position: origin,
            stats: TrainingStats::new(),
            path: Vec::new(),
            iterations: 0,
            abandoned: 0,
            budget,
            max_episode_steps: max_episode_steps.max(1),
        }
    }

    pub fn phase(&self) -> TrainingPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase == TrainingPhase::Navigating
    }

    /// Current cursor of the exploration walk.
    pub fn position(&self) -> Position {
        self.position
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }

    /// Episodes consumed from the budget, including abandoned ones.
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    pub fn abandoned(&self) -> u32 {
        self.abandoned
    }

    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn path(&self) -> &[u8] {
        &self.path
    }

    /// Runs up to `steps` state-machine steps, stopping early once training
    /// is finished.
    pub fn run<R: Rng + ?Sized>(
        &mut self,
        graph: &mut TerrainGraph,
        markers: &mut CostField,
        ctx: &TickContext<'_>,
        rng: &mut R,
        steps: u32,
    ) -> TrainingPhase {
        for _ in 0..steps {
            if self.step(graph, markers, ctx, rng) == TrainingPhase::Navigating {
                break;
            }
        }
        self.phase
    }

    /// Advances the state machine by one step.
    pub fn step<R: Rng + ?Sized>(
        &mut self,
        graph: &mut TerrainGraph,
        markers: &mut CostField,
        ctx: &TickContext<'_>,
        rng: &mut R,
    ) -> TrainingPhase {
        match self.phase {
            TrainingPhase::Navigating => {}
            TrainingPhase::EpisodeDone => self.complete_episode(graph, markers, ctx.position()),
            TrainingPhase::Exploring => {
                if self.iterations >= self.budget {
                    self.phase = TrainingPhase::Navigating;
                    tracing::info!(
                        iterations = self.iterations,
                        abandoned = self.abandoned,
                        min = self.stats.min,
                        max = self.stats.max,
                        median = self.stats.median,
                        visited = graph.visited_count(),
                        "graph training finished"
                    );
                } else if ctx.threatens_from(self.position) {
                    self.phase = TrainingPhase::EpisodeDone;
                } else if self.path.len() >= self.max_episode_steps as usize {
                    self.abandon_episode(markers, ctx.position());
                } else if !self.explore(graph, markers, ctx, rng) {
                    self.abandon_episode(markers, ctx.position());
                }
            }
        }
        self.phase
    }

    /// One random-walk step, preferring cells not yet marked this episode.
    /// Returns false when every neighbour of the cursor is blocked.
    fn explore<R: Rng + ?Sized>(
        &mut self,
        graph: &mut TerrainGraph,
        markers: &mut CostField,
        ctx: &TickContext<'_>,
        rng: &mut R,
    ) -> bool {
        let from = self.position;
        let directions = shuffled_directions(rng);
        let open = |direction: &Direction| ctx.is_open(from.step(*direction));

        let choice = directions
            .iter()
            .copied()
            .find(|direction| open(direction) && markers.get(from.step(*direction)) == 0)
            .or_else(|| directions.iter().copied().find(|direction| open(direction)));

        match choice {
            Some(direction) => {
                self.position = from.step(direction);
                self.path.push(direction.index());
                markers.set(self.position, 1);
                graph.mark_visited(self.position);
                true
            }
            None => {
                tracing::trace!(position = %from, "training walk is enclosed");
                false
            }
        }
    }

    fn complete_episode(
        &mut self,
        graph: &mut TerrainGraph,
        markers: &mut CostField,
        origin: Position,
    ) {
        let length = self.path.len() as u32;
        let first = self.stats.episodes == 0;
        self.stats.record(length);

        let error = i64::from(self.stats.median) - i64::from(length);
        if !first {
            calibrate_path(graph, origin, &self.path, error);
        }

        self.iterations += 1;
        tracing::debug!(
            iteration = self.iterations,
            total = self.budget,
            length,
            min = self.stats.min,
            max = self.stats.max,
            median = self.stats.median,
            error,
            "training episode complete"
        );
        self.reset_episode(markers, origin);
    }

    fn abandon_episode(&mut self, markers: &mut CostField, origin: Position) {
        self.iterations += 1;
        self.abandoned += 1;
        tracing::debug!(
            iteration = self.iterations,
            length = self.path.len(),
            "training episode abandoned"
        );
        self.reset_episode(markers, origin);
    }

    fn reset_episode(&mut self, markers: &mut CostField, origin: Position) {
        markers.clear();
        self.path.clear();
        self.position = origin;
        self.phase = TrainingPhase::Exploring;
    }
}

/// Replays `path` from `origin`, adding `error` to both directions of every
/// traversed edge. Returns the number of edges adjusted.
///
/// Malformed direction indices are logged and skipped; a step that would
/// leave the grid stops the replay.
pub fn calibrate_path(graph: &mut TerrainGraph, origin: Position, path: &[u8], error: i64) -> usize {
    let mut cursor = origin;
    let mut adjusted = 0;
    for &index in path {
        let direction = match Direction::from_index(index) {
            Ok(direction) => direction,
            Err(err) => {
                tracing::warn!(%err, code = err.error_code(), "skipping path step");
                continue;
            }
        };
        let next = cursor.step(direction);
        if !graph.contains(next) {
            let err = NavigationError::PathOffGrid {
                x: next.x,
                y: next.y,
            };
            tracing::warn!(%err, code = err.error_code(), "stopping calibration");
            break;
        }
        cursor = graph.adjust_both(cursor, direction, error);
        adjusted += 1;
    }
    adjusted
}
