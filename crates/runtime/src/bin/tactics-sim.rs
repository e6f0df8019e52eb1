//! Headless skirmish runner for AI scenarios.
//!
//! Usage: `tactics-sim <scenario> [config.toml] [ticks]`
//!
//! Player units pass their turn; every AI unit is driven by its brain. Set
//! `RUST_LOG=tactics_core=debug` to follow individual decisions.
use std::path::Path;

use anyhow::Result;
use tactics_core::{Battlefield, Side};
use tactics_runtime::{AiDriver, ConfigLoader, RuntimeConfig, ScenarioLoader, TickAction};

const DEFAULT_TICKS: usize = 500;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let scenario_path = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("usage: tactics-sim <scenario> [config.toml] [ticks]"))?;
    let config = match args.next() {
        Some(path) => ConfigLoader::load(Path::new(&path))?.with_env(),
        None => RuntimeConfig::from_env(),
    };
    let ticks = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .map_err(|e| anyhow::anyhow!("Invalid tick count {raw:?}: {e}"))?,
        None => DEFAULT_TICKS,
    };

    let scenario = ScenarioLoader::load(Path::new(&scenario_path))?;
    let (map, mut board) = scenario.into_skirmish()?;

    let mut driver = AiDriver::new(config);
    let units: Vec<_> = board.units().iter().map(|unit| unit.id).collect();
    let created = driver.adopt_all(map.as_ref(), &board, units)?;
    tracing::info!(created, ticks, "scenario loaded");

    for tick in 0..ticks {
        let Some(active) = board.active_unit() else {
            break;
        };
        if board.unit(active).is_some_and(|unit| unit.side == Side::Player) {
            board.end_turn();
            continue;
        }

        let report = driver.process_tick(map.as_ref(), &mut board)?;
        if let TickAction::Attacked(target) = report.action {
            tracing::info!(tick, attacker = %report.unit, %target, "attack issued");
        }
    }

    tracing::info!(
        turns = board.turns_taken(),
        attacks = board.attacks().len(),
        "simulation finished"
    );
    Ok(())
}
