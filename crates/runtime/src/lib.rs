//! Runtime orchestration for the tactical movement AI.
//!
//! This crate wires `tactics-core` brains to a board. Hosts keep one
//! [`AiDriver`] per session, create brains as units appear and call
//! [`AiDriver::process_tick`] whenever an AI-controlled unit has the turn.
//!
//! Modules are organized by responsibility:
//! - [`driver`] makes the per-tick attack/navigate/end-turn decision
//! - [`registry`] owns the per-unit brains
//! - [`config`], [`loaders`] and [`scenario`] read settings, maps and unit
//!   placements from disk
//! - [`oracle`] and [`skirmish`] are in-memory reference implementations of
//!   the terrain and battlefield collaborators
pub mod config;
pub mod driver;
pub mod error;
pub mod loaders;
pub mod oracle;
pub mod registry;
pub mod scenario;
pub mod skirmish;

pub use config::{ConfigLoader, RuntimeConfig};
pub use driver::{AiDriver, TickAction, TickReport};
pub use error::{Result, RuntimeError};
pub use loaders::{LoadResult, MapLoader, ScenarioLoader};
pub use oracle::GridMap;
pub use registry::BrainRegistry;
pub use scenario::Scenario;
pub use skirmish::{AttackRecord, Combatant, Skirmish};
