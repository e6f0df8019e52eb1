//! ASCII scenario sketches: terrain plus unit placement.
//!
//! Unit glyphs stand on floor and become units numbered in row-major order
//! from 1: `P` or `@` is a player unit, `L`, `M` and `H` are AI units at the
//! low, mid and high tier thresholds, and `G` is an AI unit smart enough to
//! need no movement AI.
use std::sync::Arc;

use tactics_core::{AiConfig, Position, Side};

use crate::error::Result;
use crate::oracle::GridMap;
use crate::skirmish::{Combatant, Skirmish};

#[derive(Clone, Debug)]
pub struct Scenario {
    pub map: GridMap,
    pub units: Vec<Combatant>,
}

impl Scenario {
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let map = GridMap::from_rows(rows)?;
        let mut units = Vec::new();
        for (y, line) in rows.iter().enumerate() {
            for (x, glyph) in line.as_ref().chars().enumerate() {
                let Some((side, intelligence)) = unit_glyph(glyph) else {
                    continue;
                };
                let id = units.len() as u32 + 1;
                let position = Position::new(x as i32, y as i32);
                units.push(Combatant::new(id, position, side).with_intelligence(intelligence));
            }
        }
        Ok(Self { map, units })
    }

    /// Builds a board with every unit spawned in id order.
    pub fn into_skirmish(self) -> Result<(Arc<GridMap>, Skirmish)> {
        let map = Arc::new(self.map);
        let mut board = Skirmish::new(map.clone());
        for unit in self.units {
            board.spawn(unit)?;
        }
        Ok((map, board))
    }
}

fn unit_glyph(glyph: char) -> Option<(Side, i32)> {
    match glyph {
        'P' | '@' => Some((Side::Player, 0)),
        'L' => Some((Side::Ai, AiConfig::LOW_AI)),
        'M' => Some((Side::Ai, AiConfig::MID_AI)),
        'H' => Some((Side::Ai, AiConfig::HIGH_AI)),
        'G' => Some((Side::Ai, AiConfig::HIGH_AI + 1)),
        _ => None,
    }
}
