//! High tier: learn the terrain graph, then follow Dijkstra routes.

use rand::Rng;

use super::Outcome;
use crate::config::AiConfig;
use crate::env::{TerrainOracle, TickContext};
use crate::field::CostField;
use crate::graph::{GraphTrainer, Route, TerrainGraph, shortest_path};
use crate::state::Position;

/// Graph-learning navigator.
///
/// While training, every tick advances the [`GraphTrainer`] by a bounded
/// number of exploration steps and the unit stays put. Once training is
/// finished the navigator plans a route to the nearest opponent, walks it one
/// cell per tick and replans only when the route runs out or a move is
/// refused.
#[derive(Clone, Debug)]
pub struct GraphNavigator {
    graph: TerrainGraph,
    /// 0/1 markers of cells visited in the current training episode.
    markers: CostField,
    trainer: GraphTrainer,
    route: Option<Route>,
    steps_per_tick: u32,
}

impl GraphNavigator {
    pub fn new<T: TerrainOracle + ?Sized>(terrain: &T, origin: Position, config: &AiConfig) -> Self {
        let graph = TerrainGraph::build(terrain);
        let dimensions = graph.dimensions();
        let cap = config.episode_cap(dimensions.width, dimensions.height);
        Self {
            markers: CostField::zeroed(dimensions, 1),
            trainer: GraphTrainer::new(origin, config.training_iterations, cap),
            route: None,
            steps_per_tick: config.training_steps_per_tick.max(1),
            graph,
        }
    }

    pub fn graph(&self) -> &TerrainGraph {
        &self.graph
    }

    pub fn trainer(&self) -> &GraphTrainer {
        &self.trainer
    }

    pub fn markers(&self) -> &CostField {
        &self.markers
    }

    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    pub fn step<R: Rng + ?Sized>(&mut self, ctx: &mut TickContext<'_>, rng: &mut R) -> Outcome {
        if !self.trainer.is_finished() {
            self.trainer.run(
                &mut self.graph,
                &mut self.markers,
                ctx,
                rng,
                self.steps_per_tick,
            );
            if !self.trainer.is_finished() {
                return Outcome::Training;
            }
        }
        self.follow(ctx)
    }

    fn follow(&mut self, ctx: &mut TickContext<'_>) -> Outcome {
        if self.route.as_ref().is_none_or(Route::is_empty) {
            match self.plan(ctx) {
                Some(route) => self.route = Some(route),
                None => return Outcome::NoPath,
            }
        }

        let origin = ctx.position();
        let Some(next) = self.route.as_mut().and_then(Route::pop) else {
            // Already inside the target's box but not in attack range
            return Outcome::Stuck;
        };

        let (dx, dy) = origin.delta_to(next);
        if ctx.request_move(dx, dy) {
            Outcome::Moved { dx, dy }
        } else {
            tracing::debug!(%origin, %next, "route step refused, discarding route");
            self.route = None;
            Outcome::Rejected { dx, dy }
        }
    }

    fn plan(&self, ctx: &TickContext<'_>) -> Option<Route> {
        let target = ctx.nearest_opponent()?;
        let start = ctx.position();
        let path = shortest_path(&self.graph, start, target.position, ctx.unit().range)?;
        tracing::info!(
            unit = %ctx.unit().id,
            %start,
            target = %target.position,
            steps = path.steps(),
            cost = path.cost(),
            "planned route"
        );
        Some(Route::from(path))
    }
}
