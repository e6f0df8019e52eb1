//! Deterministic movement AI for units on a tactical grid.
//!
//! `tactics-core` owns the per-agent decision logic and exposes pure APIs that
//! the runtime drives once per AI tick. Sophistication grows with a unit's
//! intelligence:
//!
//! - [`navigation::LineStepNavigator`] pursues the nearest opponent along a
//!   rasterized line and remembers cells it fled from.
//! - [`navigation::SwarmNavigator`] sends a small swarm of scouts over the
//!   agent's heat field before committing to a step.
//! - [`navigation::GraphNavigator`] learns a weighted [`graph::TerrainGraph`]
//!   through randomized training episodes and then follows Dijkstra routes.
//!
//! Environment access goes through the oracle traits in [`env`]; all per-agent
//! state lives in an [`AgentBrain`].
pub mod agent;
pub mod config;
pub mod env;
pub mod error;
pub mod field;
pub mod graph;
pub mod navigation;
pub mod state;

pub use agent::{AgentBrain, Navigator, Tier};
pub use config::AiConfig;
pub use env::{
    Battlefield, MapDimensions, PcgRng, Side, StaticTile, TerrainKind, TerrainOracle, TickContext,
    UnitId, UnitSnapshot, compute_seed,
};
pub use error::{ErrorSeverity, NavigationError, TacticsError};
pub use field::CostField;
pub use graph::{
    EdgeWeight, GraphTrainer, Route, ShortestPath, TerrainGraph, TrainingPhase, TrainingStats,
    shortest_path,
};
pub use navigation::{GraphNavigator, LineStepNavigator, MemoryStack, Outcome, Scout, SwarmNavigator};
pub use state::{Direction, Grid, Position};
