//! High-tier terrain model: the learned graph, its trainer and the planner.

mod planner;
mod terrain;
mod trainer;

pub use planner::{Route, ShortestPath, shortest_path};
pub use terrain::{EdgeWeight, INITIAL_EDGE_COST, Node, TerrainGraph};
pub use trainer::{GraphTrainer, TrainingPhase, TrainingStats, calibrate_path};
