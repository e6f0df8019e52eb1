//! Per-agent AI state and tier dispatch.

use rand::{Rng, RngCore};

use crate::config::AiConfig;
use crate::env::{PcgRng, TerrainOracle, TickContext, UnitId, UnitSnapshot, compute_seed};
use crate::field::CostField;
use crate::navigation::{GraphNavigator, LineStepNavigator, Outcome, SwarmNavigator};

/// Sophistication level derived from a unit's intelligence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Tier {
    Low,
    Mid,
    High,
}

impl Tier {
    /// Tier for `intelligence`, or `None` when it exceeds every threshold.
    pub fn classify(intelligence: i32, config: &AiConfig) -> Option<Tier> {
        if intelligence <= config.low_threshold {
            Some(Tier::Low)
        } else if intelligence <= config.mid_threshold {
            Some(Tier::Mid)
        } else if intelligence <= config.high_threshold {
            Some(Tier::High)
        } else {
            None
        }
    }
}

/// Tier-specific navigator together with the state it owns.
#[derive(Clone, Debug)]
pub enum Navigator {
    Low {
        field: CostField,
        navigator: LineStepNavigator,
    },
    Mid {
        field: CostField,
        swarm: SwarmNavigator,
    },
    High(Box<GraphNavigator>),
}

impl Navigator {
    pub fn tier(&self) -> Tier {
        match self {
            Navigator::Low { .. } => Tier::Low,
            Navigator::Mid { .. } => Tier::Mid,
            Navigator::High(_) => Tier::High,
        }
    }
}

/// Everything one AI-controlled unit remembers between ticks.
///
/// A brain is created when its unit gains AI control and dropped when the
/// unit leaves the board; nothing is shared between brains.
#[derive(Clone, Debug)]
pub struct AgentBrain<R = PcgRng> {
    unit: UnitId,
    navigator: Navigator,
    rng: R,
}

impl AgentBrain<PcgRng> {
    /// Creates a brain whose generator is derived from `game_seed` and the
    /// unit id.
    pub fn new<T: TerrainOracle + ?Sized>(
        unit: &UnitSnapshot,
        terrain: &T,
        units: &[UnitSnapshot],
        config: &AiConfig,
        game_seed: u64,
    ) -> Option<Self> {
        let rng = PcgRng::new(compute_seed(game_seed, unit.id.0));
        Self::with_rng(unit, terrain, units, config, rng)
    }
}

impl<R: RngCore> AgentBrain<R> {
    /// Creates a brain for `unit`, or `None` when its intelligence is above
    /// every tier threshold.
    ///
    /// `units` is the board at creation time; the mid tier centres its heat
    /// gradient on the first opposing unit found there.
    pub fn with_rng<T: TerrainOracle + ?Sized>(
        unit: &UnitSnapshot,
        terrain: &T,
        units: &[UnitSnapshot],
        config: &AiConfig,
        rng: R,
    ) -> Option<Self> {
        let tier = Tier::classify(unit.intelligence, config)?;
        let dimensions = terrain.dimensions();

        let navigator = match tier {
            Tier::Low => Navigator::Low {
                field: CostField::zeroed(dimensions, config.low_obstacle),
                navigator: LineStepNavigator::new(),
            },
            Tier::Mid => {
                let center = units
                    .iter()
                    .find(|other| unit.side.opposes(other.side))
                    .map_or(unit.position, |other| other.position);
                Navigator::Mid {
                    field: CostField::radial(dimensions, config.mid_obstacle, center),
                    swarm: SwarmNavigator::new(unit.position, config.scouts, config.moves_per_cycle),
                }
            }
            Tier::High => Navigator::High(Box::new(GraphNavigator::new(
                terrain,
                unit.position,
                config,
            ))),
        };

        tracing::info!(
            unit = %unit.id,
            %tier,
            intelligence = unit.intelligence,
            width = dimensions.width,
            height = dimensions.height,
            "agent brain created"
        );

        Some(Self {
            unit: unit.id,
            navigator,
            rng,
        })
    }

    pub fn unit(&self) -> UnitId {
        self.unit
    }

    pub fn tier(&self) -> Tier {
        self.navigator.tier()
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Heat field of the low and mid tiers, or the training markers of the
    /// high tier.
    pub fn field(&self) -> &CostField {
        match &self.navigator {
            Navigator::Low { field, .. } | Navigator::Mid { field, .. } => field,
            Navigator::High(navigator) => navigator.markers(),
        }
    }

    /// Picks one of `targets` uniformly at random.
    pub fn choose_target(&mut self, targets: &[UnitId]) -> Option<UnitId> {
        if targets.is_empty() {
            return None;
        }
        let index = self.rng.random_range(0..targets.len());
        targets.get(index).copied()
    }

    /// Runs the tier's navigator for one tick.
    pub fn think(&mut self, ctx: &mut TickContext<'_>) -> Outcome {
        let outcome = match &mut self.navigator {
            Navigator::Low { field, navigator } => navigator.step(field, ctx, &mut self.rng),
            Navigator::Mid { field, swarm } => swarm.step(field, ctx, &mut self.rng),
            Navigator::High(navigator) => navigator.step(ctx, &mut self.rng),
        };
        tracing::trace!(unit = %self.unit, ?outcome, "navigator finished");
        outcome
    }
}
