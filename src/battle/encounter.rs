//! Building the enemy side of a battle.

use schema::{BossParty, EncounterEntry, EncounterKind, EncounterTable, Species};
use tracing::{debug, warn};

use crate::battle::battler::TEAM_SIZE;
use crate::battle::rng::BattleRng;
use crate::data::{get_boss_party, get_encounter_table};
use crate::errors::{DataResult, Result};
use crate::spectra::Spectra;

/// Appears when a roll falls past every entry of a table.
pub const FALLBACK_SPECIES: Species = Species::PrgmError;
pub const FALLBACK_LEVEL: u8 = 80;

/// What the player ran into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Encounter {
    /// `count` random creatures from a named encounter table.
    Wild {
        table: String,
        fishing: bool,
        count: usize,
    },
    /// A fixed boss party.
    Boss(String),
}

impl Encounter {
    pub fn kind(&self) -> EncounterKind {
        match self {
            Encounter::Wild { fishing: true, .. } => EncounterKind::Fishing,
            Encounter::Wild { .. } => EncounterKind::Overworld,
            Encounter::Boss(_) => EncounterKind::Boss,
        }
    }

    pub fn build_enemies(&self, rng: &mut BattleRng) -> Result<Vec<Spectra>> {
        match self {
            Encounter::Wild { table, count, .. } => {
                let table = get_encounter_table(table)?;
                Ok(random_enemies(table, self.kind(), *count, rng)?)
            }
            Encounter::Boss(name) => Ok(boss_enemies(get_boss_party(name)?)?),
        }
    }
}

/// Walks the cumulative chances with one percent roll.
pub fn pick_entry<'a>(entries: &'a [EncounterEntry], rng: &mut BattleRng) -> Option<&'a EncounterEntry> {
    let roll = rng.percent("encounter species");
    let mut cumulative = 0u32;
    entries.iter().find(|entry| {
        cumulative += entry.chance as u32;
        roll < cumulative
    })
}

/// One random creature from a table, or the fallback when nothing matched.
pub fn roll_wild_spectra(
    table: &EncounterTable,
    kind: EncounterKind,
    rng: &mut BattleRng,
) -> DataResult<Spectra> {
    match pick_entry(table.entries(kind), rng) {
        Some(entry) => {
            let (low, high) = entry.levels;
            let level = rng.range(low as u32, high as u32, "encounter level") as u8;
            Spectra::new(entry.species, level)
        }
        None => {
            warn!(table = %table.name, "encounter roll matched nothing, using fallback");
            Spectra::new(FALLBACK_SPECIES, FALLBACK_LEVEL)
        }
    }
}

/// Between one and three random creatures.
pub fn random_enemies(
    table: &EncounterTable,
    kind: EncounterKind,
    count: usize,
    rng: &mut BattleRng,
) -> DataResult<Vec<Spectra>> {
    let count = count.clamp(1, TEAM_SIZE);
    let enemies = (0..count)
        .map(|_| roll_wild_spectra(table, kind, rng))
        .collect::<DataResult<Vec<_>>>()?;
    debug!(table = %table.name, ?kind, count, "wild enemies rolled");
    Ok(enemies)
}

pub fn boss_enemies(party: &BossParty) -> DataResult<Vec<Spectra>> {
    party
        .members
        .iter()
        .take(TEAM_SIZE)
        .map(|member| Spectra::new(member.species, member.level))
        .collect()
}
