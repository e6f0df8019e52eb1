//! Brain registry for AI-controlled units.
//!
//! The [`BrainRegistry`] owns one [`AgentBrain`] per AI-controlled unit.
//! Brains are created and destroyed explicitly by the host, typically when a
//! unit spawns and when it dies; nothing is shared between them.
//!
//! # Design
//!
//! - **Ownership**: Each brain owns its heat field, navigator and generator
//! - **Seeding**: Generators derive from the session seed and the unit id
//! - **No AI**: Player units and units above every tier threshold get no
//!   brain at all

use std::collections::HashMap;

use tactics_core::{AgentBrain, AiConfig, Battlefield, Side, TerrainOracle, Tier, UnitId};

use crate::error::{Result, RuntimeError};

pub struct BrainRegistry {
    brains: HashMap<UnitId, AgentBrain>,
    config: AiConfig,
    game_seed: u64,
}

impl BrainRegistry {
    pub fn new(config: AiConfig, game_seed: u64) -> Self {
        Self {
            brains: HashMap::new(),
            config,
            game_seed,
        }
    }

    pub fn config(&self) -> &AiConfig {
        &self.config
    }

    /// Create a brain for `unit` from the current board.
    ///
    /// Returns the tier assigned, or `None` when the unit is player controlled
    /// or its intelligence is above every threshold, in which case no brain
    /// is stored. An existing brain for the same unit is replaced.
    pub fn create(
        &mut self,
        unit: UnitId,
        terrain: &dyn TerrainOracle,
        board: &dyn Battlefield,
    ) -> Result<Option<Tier>> {
        let units = board.units();
        let snapshot = units
            .iter()
            .find(|snapshot| snapshot.id == unit)
            .ok_or(RuntimeError::UnknownUnit(unit))?;

        if snapshot.side == Side::Player {
            tracing::debug!(%unit, "player controlled, no brain");
            self.brains.remove(&unit);
            return Ok(None);
        }

        let Some(brain) = AgentBrain::new(snapshot, terrain, &units, &self.config, self.game_seed)
        else {
            tracing::debug!(%unit, intelligence = snapshot.intelligence, "no AI tier");
            self.brains.remove(&unit);
            return Ok(None);
        };

        let tier = brain.tier();
        if self.brains.insert(unit, brain).is_some() {
            tracing::debug!(%unit, "replaced existing brain");
        }
        Ok(Some(tier))
    }

    /// Drop the brain of `unit`. Returns whether one existed.
    pub fn destroy(&mut self, unit: UnitId) -> bool {
        let removed = self.brains.remove(&unit);
        if let Some(brain) = &removed {
            tracing::info!(%unit, tier = %brain.tier(), "agent brain destroyed");
        }
        removed.is_some()
    }

    pub fn get(&self, unit: UnitId) -> Option<&AgentBrain> {
        self.brains.get(&unit)
    }

    pub fn get_mut(&mut self, unit: UnitId) -> Option<&mut AgentBrain> {
        self.brains.get_mut(&unit)
    }

    pub fn contains(&self, unit: UnitId) -> bool {
        self.brains.contains_key(&unit)
    }

    pub fn len(&self) -> usize {
        self.brains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brains.is_empty()
    }

    /// Tier `unit` would get, without creating anything.
    pub fn classify(&self, intelligence: i32) -> Option<Tier> {
        Tier::classify(intelligence, &self.config)
    }
}
