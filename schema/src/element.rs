use serde::{Deserialize, Serialize};
use std::fmt;
use strum::EnumIter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, EnumIter)]
pub enum ElementType {
    Basic,
    Fire,
    Water,
    Ice,
    Wind,
    Earth,
    Metal,
    Light,
    Dark,
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ElementType {
    /// Damage multiplier for an attacking type against one defending type.
    /// Returns: 2.0 = Super Effective, 1.0 = Normal, 0.5 = Not Very Effective.
    ///
    /// The table is deliberately asymmetric: Fire into Water is halved while
    /// Water into Fire is doubled.
    pub fn type_matchup(attacking: ElementType, defending: ElementType) -> f32 {
        use ElementType::*;

        match (attacking, defending) {
            // Basic
            (Basic, Ice) | (Basic, Metal) => 0.5,
            (Basic, _) => 1.0,

            // Fire
            (Fire, Fire) | (Fire, Water) => 0.5,
            (Fire, Ice) | (Fire, Earth) | (Fire, Metal) | (Fire, Dark) => 2.0,
            (Fire, _) => 1.0,

            // Water
            (Water, Water) | (Water, Ice) => 0.5,
            (Water, Fire) | (Water, Metal) => 2.0,
            (Water, _) => 1.0,

            // Ice
            (Ice, Fire) | (Ice, Metal) => 0.5,
            (Ice, Earth) => 2.0,
            (Ice, _) => 1.0,

            // Wind
            (Wind, Metal) => 0.5,
            (Wind, Earth) => 2.0,
            (Wind, _) => 1.0,

            // Earth
            (Earth, Fire) | (Earth, Wind) => 2.0,
            (Earth, _) => 1.0,

            // Metal
            (Metal, Water) | (Metal, Metal) => 0.5,
            (Metal, Ice) => 2.0,
            (Metal, _) => 1.0,

            // Light
            (Light, Earth) | (Light, Light) => 0.5,
            (Light, Water) | (Light, Dark) => 2.0,
            (Light, _) => 1.0,

            // Dark
            (Dark, Dark) => 0.5,
            (Dark, Light) => 2.0,
            (Dark, _) => 1.0,
        }
    }

    /// Combined multiplier against a defender with one or two types.
    /// Dual-typed defenders multiply both lookups.
    pub fn matchup_against(
        attacking: ElementType,
        primary: ElementType,
        secondary: Option<ElementType>,
    ) -> f32 {
        let first = Self::type_matchup(attacking, primary);
        match secondary {
            Some(second) => first * Self::type_matchup(attacking, second),
            None => first,
        }
    }
}
