//! Tunable engine constants, loadable from a RON file.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::Result;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Characters revealed per second by the output queue.
    pub typing_speed: f32,
    /// Maximum number of lines the output queue holds.
    pub output_capacity: usize,
    /// Lines longer than this are truncated.
    pub max_line_length: usize,
    /// Level cap; also the denominator of the damage level scale.
    pub max_level: u8,
    /// Divisor applied to the experience yield of defeated enemies.
    pub experience_divisor: u32,
    /// Clear stat boosts along with the other per-round state.
    pub reset_boosts_each_round: bool,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            typing_speed: 16.0,
            output_capacity: 32,
            max_line_length: 255,
            max_level: 100,
            experience_divisor: 10,
            reset_boosts_each_round: true,
        }
    }
}

impl BattleConfig {
    pub fn from_ron_str(text: &str) -> Result<Self> {
        Ok(ron::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }
}
