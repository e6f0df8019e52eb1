/// AI configuration constants and tunable parameters.
///
/// Intelligence thresholds are inclusive upper bounds: a unit with
/// intelligence `<= low_threshold` gets the low tier, `<= mid_threshold` the
/// mid tier and `<= high_threshold` the high tier. Anything above has no
/// movement AI and simply ends its turn.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct AiConfig {
    pub low_threshold: i32,
    pub mid_threshold: i32,
    pub high_threshold: i32,

    /// Heat ceiling of the low tier; also the exclusive bound of its deterrent roll.
    pub low_obstacle: i32,
    /// Heat ceiling of the mid tier gradient.
    pub mid_obstacle: i32,

    /// Number of scouts in a mid tier swarm.
    pub scouts: usize,
    /// Scout micro-turns before the controlled unit commits a step.
    pub moves_per_cycle: u32,

    /// Completed training episodes before the high tier starts navigating.
    pub training_iterations: u32,
    /// Exploration steps executed per AI tick while training.
    pub training_steps_per_tick: u32,
    /// Episode length after which an exploration walk is abandoned.
    /// `None` derives the cap from the map area.
    pub max_episode_steps: Option<u32>,
}

impl AiConfig {
    // ===== tier thresholds =====
    pub const LOW_AI: i32 = 5;
    pub const MID_AI: i32 = 10;
    pub const HIGH_AI: i32 = 100;

    // ===== heat ceilings =====
    pub const LOW_AI_OBSTACLE: i32 = 5;
    pub const MID_AI_OBSTACLE: i32 = 10;

    // ===== swarm =====
    pub const MID_AI_NUM_SCOUTS: usize = 5;
    pub const MID_AI_MOVES_PER_CYCLE: u32 = 5;

    // ===== graph training =====
    pub const HIGH_AI_TOTAL_ITERATIONS: u32 = 10_000;
    pub const DEFAULT_TRAINING_STEPS_PER_TICK: u32 = 1024;
    /// Multiplier applied to the map area when no explicit episode cap is set.
    pub const EPISODE_AREA_FACTOR: u32 = 4;

    pub fn new() -> Self {
        Self {
            low_threshold: Self::LOW_AI,
            mid_threshold: Self::MID_AI,
            high_threshold: Self::HIGH_AI,
            low_obstacle: Self::LOW_AI_OBSTACLE,
            mid_obstacle: Self::MID_AI_OBSTACLE,
            scouts: Self::MID_AI_NUM_SCOUTS,
            moves_per_cycle: Self::MID_AI_MOVES_PER_CYCLE,
            training_iterations: Self::HIGH_AI_TOTAL_ITERATIONS,
            training_steps_per_tick: Self::DEFAULT_TRAINING_STEPS_PER_TICK,
            max_episode_steps: None,
        }
    }

    pub fn with_training_iterations(mut self, iterations: u32) -> Self {
        self.training_iterations = iterations;
        self
    }

    pub fn with_training_steps_per_tick(mut self, steps: u32) -> Self {
        self.training_steps_per_tick = steps.max(1);
        self
    }

    pub fn with_max_episode_steps(mut self, steps: u32) -> Self {
        self.max_episode_steps = Some(steps);
        self
    }

    /// Resolves the episode cap for a map of `width * height` cells.
    pub fn episode_cap(&self, width: u32, height: u32) -> u32 {
        self.max_episode_steps.unwrap_or_else(|| {
            width
                .saturating_mul(height)
                .saturating_mul(Self::EPISODE_AREA_FACTOR)
                .max(1)
        })
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn episode_cap_derives_from_area() {
        let config = AiConfig::default();
        assert_eq!(config.episode_cap(5, 5), 100);
        assert_eq!(config.with_max_episode_steps(7).episode_cap(5, 5), 7);
    }

    #[test]
    fn steps_per_tick_never_zero() {
        let config = AiConfig::default().with_training_steps_per_tick(0);
        assert_eq!(config.training_steps_per_tick, 1);
    }
}
