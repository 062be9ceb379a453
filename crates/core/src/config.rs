//! Engine and session configuration

use serde::{Deserialize, Serialize};

use crate::board::Color;
use crate::error::{Error, Result};
use crate::rules::DrawRules;

/// Shortest history that can hold a threefold repetition: the position
/// recurs at most every fourth ply
pub const MIN_HISTORY_LIMIT: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Plies searched for every engine reply
    pub search_depth: u8,
    /// Countdown budget in ticks, shared by both sides
    pub clock_budget: u32,
    /// Side the human plays; the engine takes the other one
    pub human_color: Color,
    /// Enables the fifty-move draw (off by default)
    pub fifty_move_rule: bool,
    /// Positions kept for repetition detection, oldest dropped first
    pub history_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_depth: 2,
            clock_budget: 300,
            human_color: Color::White,
            fifty_move_rule: false,
            history_limit: 512,
        }
    }
}

impl EngineConfig {
    /// Parses a JSON config; missing fields take their defaults
    pub fn from_json(text: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.search_depth == 0 {
            return Err(Error::InvalidConfig("search_depth must be at least 1".into()));
        }
        if self.clock_budget == 0 {
            return Err(Error::InvalidConfig("clock_budget must be at least 1".into()));
        }
        if self.history_limit < MIN_HISTORY_LIMIT {
            return Err(Error::InvalidConfig(format!(
                "history_limit must hold at least {} positions",
                MIN_HISTORY_LIMIT
            )));
        }
        Ok(())
    }

    pub fn engine_color(&self) -> Color {
        self.human_color.opposite()
    }

    pub fn draw_rules(&self) -> DrawRules {
        DrawRules {
            fifty_move_rule: self.fifty_move_rule,
        }
    }
}
