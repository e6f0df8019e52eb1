//! Runtime configuration structures and loaders.

use std::env;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tactics_core::AiConfig;

use crate::loaders::{LoadResult, read_file};

/// Settings for one AI session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Session seed; every brain derives its generator from it and its unit id.
    pub game_seed: u64,
    pub ai: AiConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_seed: 0,
            ai: AiConfig::default(),
        }
    }
}

impl RuntimeConfig {
    pub const fn new(game_seed: u64, ai: AiConfig) -> Self {
        Self { game_seed, ai }
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TACTICS_GAME_SEED` - Session seed (default: 0)
    /// - `TACTICS_LOW_THRESHOLD` - Highest intelligence of the low tier (default: 5)
    /// - `TACTICS_MID_THRESHOLD` - Highest intelligence of the mid tier (default: 10)
    /// - `TACTICS_HIGH_THRESHOLD` - Highest intelligence of the high tier (default: 100)
    /// - `TACTICS_SCOUTS` - Scouts per mid tier swarm (default: 5)
    /// - `TACTICS_MOVES_PER_CYCLE` - Scout moves before committing (default: 5)
    /// - `TACTICS_TRAINING_ITERATIONS` - Training episodes (default: 10000)
    /// - `TACTICS_TRAINING_STEPS` - Exploration steps per tick (default: 1024)
    /// - `TACTICS_MAX_EPISODE_STEPS` - Episode length cap (default: 4 × map area)
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Applies `TACTICS_*` overrides from the process environment.
    pub fn with_env(self) -> Self {
        self.with_overrides(|key| env::var(key).ok())
    }

    /// Applies `TACTICS_*` overrides resolved through `lookup`.
    ///
    /// Unparseable values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(seed) = read_env::<u64, _>(&lookup, "TACTICS_GAME_SEED") {
            self.game_seed = seed;
        }

        let ai = &mut self.ai;
        if let Some(value) = read_env(&lookup, "TACTICS_LOW_THRESHOLD") {
            ai.low_threshold = value;
        }
        if let Some(value) = read_env(&lookup, "TACTICS_MID_THRESHOLD") {
            ai.mid_threshold = value;
        }
        if let Some(value) = read_env(&lookup, "TACTICS_HIGH_THRESHOLD") {
            ai.high_threshold = value;
        }
        if let Some(count) = read_env::<usize, _>(&lookup, "TACTICS_SCOUTS") {
            ai.scouts = count.max(1);
        }
        if let Some(moves) = read_env(&lookup, "TACTICS_MOVES_PER_CYCLE") {
            ai.moves_per_cycle = moves;
        }
        if let Some(iterations) = read_env(&lookup, "TACTICS_TRAINING_ITERATIONS") {
            ai.training_iterations = iterations;
        }
        if let Some(steps) = read_env::<u32, _>(&lookup, "TACTICS_TRAINING_STEPS") {
            ai.training_steps_per_tick = steps.max(1);
        }
        if let Some(steps) = read_env::<u32, _>(&lookup, "TACTICS_MAX_EPISODE_STEPS") {
            ai.max_episode_steps = Some(steps.max(1));
        }

        self
    }
}

/// Loader for runtime configuration from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load a [`RuntimeConfig`] from a TOML file. Missing keys keep their
    /// defaults.
    pub fn load(path: &Path) -> LoadResult<RuntimeConfig> {
        let content = read_file(path)?;
        let config: RuntimeConfig = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML {}: {}", path.display(), e))?;
        Ok(config)
    }
}

fn read_env<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)?.trim().parse().ok()
}
