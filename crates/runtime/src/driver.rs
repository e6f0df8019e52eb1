//! Per-tick AI orchestration.
//!
//! Each call to [`AiDriver::process_tick`] makes one decision for the unit
//! whose turn it is: attack if anything is in range, otherwise let the unit's
//! brain navigate, then end the turn when nothing more can happen this turn.

use rand::Rng;
use tactics_core::{
    Battlefield, Outcome, PcgRng, Side, TerrainOracle, TickContext, UnitId, compute_seed,
};

use crate::config::RuntimeConfig;
use crate::error::{Result, RuntimeError};
use crate::registry::BrainRegistry;

/// What the active unit did during one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickAction {
    Attacked(UnitId),
    Navigated(Outcome),
    /// The unit has no movement AI.
    Idle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickReport {
    pub unit: UnitId,
    pub action: TickAction,
    pub turn_ended: bool,
}

pub struct AiDriver {
    registry: BrainRegistry,
    /// Target picks for units without a brain.
    fallback_rng: PcgRng,
}

impl AiDriver {
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            fallback_rng: PcgRng::new(compute_seed(config.game_seed, u32::MAX)),
            registry: BrainRegistry::new(config.ai, config.game_seed),
        }
    }

    pub fn registry(&self) -> &BrainRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut BrainRegistry {
        &mut self.registry
    }

    /// Creates brains for every AI-side unit on the board that qualifies for
    /// a tier and does not have one yet. Returns how many were created.
    pub fn adopt_all(
        &mut self,
        terrain: &dyn TerrainOracle,
        board: &dyn Battlefield,
        units: impl IntoIterator<Item = UnitId>,
    ) -> Result<usize> {
        let mut created = 0;
        for unit in units {
            if !self.registry.contains(unit) && self.registry.create(unit, terrain, board)?.is_some()
            {
                created += 1;
            }
        }
        Ok(created)
    }

    /// Makes one decision for the active unit.
    ///
    /// Fails with [`RuntimeError::PlayerControlled`] on a player's turn; the
    /// host drives those units itself.
    pub fn process_tick(
        &mut self,
        terrain: &dyn TerrainOracle,
        board: &mut dyn Battlefield,
    ) -> Result<TickReport> {
        let unit = board.active_unit().ok_or(RuntimeError::NoActiveUnit)?;
        let snapshot = board.unit(unit).ok_or(RuntimeError::UnknownUnit(unit))?;
        if snapshot.side == Side::Player {
            return Err(RuntimeError::PlayerControlled(unit));
        }

        let targets = board.targets_in_range(unit, snapshot.position);
        if !targets.is_empty() {
            let target = match self.registry.get_mut(unit) {
                Some(brain) => brain.choose_target(&targets),
                None => targets
                    .get(self.fallback_rng.random_range(0..targets.len()))
                    .copied(),
            };
            if let Some(target) = target {
                board.attack(target);
                board.end_turn();
                return Ok(TickReport {
                    unit,
                    action: TickAction::Attacked(target),
                    turn_ended: true,
                });
            }
        }

        let Some(tier) = self.registry.classify(snapshot.intelligence) else {
            tracing::debug!(%unit, "no movement AI, ending turn");
            board.end_turn();
            return Ok(TickReport {
                unit,
                action: TickAction::Idle,
                turn_ended: true,
            });
        };

        let brain = self
            .registry
            .get_mut(unit)
            .ok_or(RuntimeError::MissingBrain(unit))?;
        if brain.tier() != tier {
            tracing::warn!(%unit, brain = %brain.tier(), current = %tier, "brain tier is stale");
        }

        let outcome = {
            let mut ctx =
                TickContext::new(unit, terrain, &mut *board).ok_or(RuntimeError::UnknownUnit(unit))?;
            brain.think(&mut ctx)
        };

        let turn_ended = outcome.ends_turn() || board.moves_remaining() == Some(0);
        if turn_ended {
            board.end_turn();
        }
        tracing::debug!(%unit, %tier, ?outcome, turn_ended, "ai tick");

        Ok(TickReport {
            unit,
            action: TickAction::Navigated(outcome),
            turn_ended,
        })
    }

    /// Runs ticks until the turn of the currently active unit ends or
    /// `max_ticks` is reached. Returns the reports in order.
    pub fn play_turn(
        &mut self,
        terrain: &dyn TerrainOracle,
        board: &mut dyn Battlefield,
        max_ticks: usize,
    ) -> Result<Vec<TickReport>> {
        let mut reports = Vec::new();
        for _ in 0..max_ticks {
            let report = self.process_tick(terrain, board)?;
            reports.push(report);
            if report.turn_ended {
                break;
            }
        }
        Ok(reports)
    }
}

