use crate::Species;
use serde::{Deserialize, Serialize};

/// Where a random encounter is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EncounterKind {
    Overworld,
    Fishing,
    Boss,
}

/// One weighted row of an encounter table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterEntry {
    /// Percent weight. The weights of a table sum to at most 100.
    pub chance: u8,
    pub species: Species,
    /// Inclusive level range.
    pub levels: (u8, u8),
}

/// Random encounters for one location.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncounterTable {
    pub name: String,
    #[serde(default)]
    pub overworld: Vec<EncounterEntry>,
    #[serde(default)]
    pub fishing: Vec<EncounterEntry>,
}

impl EncounterTable {
    pub fn entries(&self, kind: EncounterKind) -> &[EncounterEntry] {
        match kind {
            EncounterKind::Fishing => &self.fishing,
            EncounterKind::Overworld | EncounterKind::Boss => &self.overworld,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BossEntry {
    pub species: Species,
    pub level: u8,
}

/// A fixed enemy party of up to three creatures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossParty {
    pub name: String,
    pub members: Vec<BossEntry>,
}
