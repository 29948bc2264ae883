use crate::{ElementType, Technique};
use serde::{Deserialize, Serialize};
use strum::EnumIter;

/// Stable identifier for every species. Discriminants are the ids used by
/// the data tables and save files; they are not contiguous.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
#[repr(u8)]
pub enum Species {
    Coalshark = 1,
    Jayraptor = 2,
    Minesphere = 3,
    Hocus = 4,
    Nessie = 5,
    Oscillate = 6,
    Puzzle = 7,
    Launchpad = 8,
    Garpike = 9,
    Moatmonster = 10,
    GoldDragon = 11,
    Replica = 12,
    Nitrobomb = 13,
    Flopjelly = 14,
    Gasmog = 15,
    Fogfang = 16,
    Glacialith = 20,
    Butcherbird = 21,
    Cumulus = 22,
    Sssnake = 23,
    PrgmError = 30,
    Phoenix = 31,
    Lektron = 45,
    Voltdragon = 47,
}

/// How quickly a species levels up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter)]
pub enum GrowthRate {
    Fastest,
    Fast,
    Medium,
    Slow,
    Slowest,
}

impl GrowthRate {
    /// Scaling constant used by the experience curve.
    pub fn experience_rate(self) -> u32 {
        match self {
            GrowthRate::Fastest => 60,
            GrowthRate::Fast => 80,
            GrowthRate::Medium => 100,
            GrowthRate::Slow => 120,
            GrowthRate::Slowest => 140,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovesetEntry {
    pub level: u8,
    pub technique: Technique,
}

/// Base data for a species. Stats are level-independent bases that
/// `Spectra` scales by level.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    pub types: (ElementType, Option<ElementType>),
    pub health: u32,
    pub power: u32,
    pub attack: u32,
    pub defend: u32,
    pub evade: u32,
    pub luck: u32,
    pub growth: GrowthRate,
    /// Base capture chance, 0 to 100.
    pub catch_rate: u8,
    /// Experience yielded when defeated.
    pub experience: u32,
    /// Money yielded when defeated.
    pub money: u32,
    /// Techniques learned by level, in the order they are learned.
    pub moveset: Vec<MovesetEntry>,
    #[serde(default)]
    pub description: String,
}

impl SpeciesData {
    pub fn has_type(&self, element: ElementType) -> bool {
        self.types.0 == element || self.types.1 == Some(element)
    }
}
