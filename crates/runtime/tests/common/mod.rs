#![allow(dead_code)]

use std::sync::Arc;

use tactics_runtime::{AiDriver, Combatant, GridMap, RuntimeConfig, Skirmish};
use tactics_core::{AiConfig, Battlefield, Position, Side, UnitId};

pub const AI: u32 = 1;
pub const PLAYER: u32 = 2;

/// Installs a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Scenario {
    pub map: Arc<GridMap>,
    pub board: Skirmish,
    pub driver: AiDriver,
}

impl Scenario {
    pub fn new(map: GridMap, ai: AiConfig, units: &[Combatant]) -> Self {
        init_tracing();
        let map = Arc::new(map);
        let mut board = Skirmish::new(map.clone());
        for unit in units {
            board.spawn(*unit).expect("valid placement");
        }
        let mut driver = AiDriver::new(RuntimeConfig::new(17, ai));
        let ids: Vec<UnitId> = board.units().iter().map(|unit| unit.id).collect();
        driver
            .adopt_all(map.as_ref(), &board, ids)
            .expect("units on board");
        Self { map, board, driver }
    }

    pub fn tick(&mut self) -> tactics_runtime::TickReport {
        self.driver
            .process_tick(self.map.as_ref(), &mut self.board)
            .expect("tick succeeds")
    }

    pub fn position(&self, id: u32) -> Position {
        self.board
            .unit(UnitId(id))
            .map(|unit| unit.position)
            .expect("unit on board")
    }

    /// Hands the turn back to the AI unit after the player's turn.
    pub fn skip_player(&mut self) {
        if self.board.active_unit() == Some(UnitId(PLAYER)) {
            self.board.end_turn();
        }
    }
}

pub fn ai(x: i32, y: i32, intelligence: i32) -> Combatant {
    Combatant::new(AI, Position::new(x, y), Side::Ai).with_intelligence(intelligence)
}

pub fn player(x: i32, y: i32) -> Combatant {
    Combatant::new(PLAYER, Position::new(x, y), Side::Player)
}
