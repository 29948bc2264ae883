//! Static data tables, embedded at compile time and parsed on first use.

use std::collections::HashMap;
use std::sync::LazyLock;

use schema::{
    BossParty, EncounterTable, Item, ItemData, Species, SpeciesData, Technique, TechniqueData,
};
use serde::Deserialize;
use strum::IntoEnumIterator;
use tracing::debug;

use crate::errors::{DataError, DataResult};

const SPECIES_RON: &str = include_str!("../data/species.ron");
const TECHNIQUES_RON: &str = include_str!("../data/techniques.ron");
const ITEMS_RON: &str = include_str!("../data/items.ron");
const ENCOUNTERS_RON: &str = include_str!("../data/encounters.ron");

#[derive(Debug, Deserialize)]
struct EncounterFile {
    tables: HashMap<String, EncounterTable>,
    bosses: HashMap<String, BossParty>,
}

fn parse_table<T>(table: &'static str, text: &str) -> DataResult<T>
where
    T: for<'de> Deserialize<'de>,
{
    let parsed = ron::from_str(text).map_err(|e| DataError::Malformed {
        table,
        message: e.to_string(),
    })?;
    debug!(table, "parsed static data table");
    Ok(parsed)
}

static SPECIES_DATA: LazyLock<DataResult<HashMap<Species, SpeciesData>>> =
    LazyLock::new(|| parse_table("species", SPECIES_RON));

static TECHNIQUE_DATA: LazyLock<DataResult<HashMap<Technique, TechniqueData>>> =
    LazyLock::new(|| parse_table("technique", TECHNIQUES_RON));

static ITEM_DATA: LazyLock<DataResult<HashMap<Item, ItemData>>> =
    LazyLock::new(|| parse_table("item", ITEMS_RON));

static ENCOUNTER_DATA: LazyLock<DataResult<EncounterFile>> =
    LazyLock::new(|| parse_table("encounter", ENCOUNTERS_RON));

pub fn get_species_data(species: Species) -> DataResult<&'static SpeciesData> {
    match &*SPECIES_DATA {
        Ok(map) => map.get(&species).ok_or(DataError::SpeciesNotFound(species)),
        Err(e) => Err(e.clone()),
    }
}

pub fn get_technique_data(technique: Technique) -> DataResult<&'static TechniqueData> {
    match &*TECHNIQUE_DATA {
        Ok(map) => map
            .get(&technique)
            .ok_or(DataError::TechniqueNotFound(technique)),
        Err(e) => Err(e.clone()),
    }
}

pub fn get_item_data(item: Item) -> DataResult<&'static ItemData> {
    match &*ITEM_DATA {
        Ok(map) => map.get(&item).ok_or(DataError::ItemNotFound(item)),
        Err(e) => Err(e.clone()),
    }
}

pub fn get_encounter_table(name: &str) -> DataResult<&'static EncounterTable> {
    match &*ENCOUNTER_DATA {
        Ok(file) => file
            .tables
            .get(name)
            .ok_or_else(|| DataError::EncounterTableNotFound(name.to_string())),
        Err(e) => Err(e.clone()),
    }
}

pub fn get_boss_party(name: &str) -> DataResult<&'static BossParty> {
    match &*ENCOUNTER_DATA {
        Ok(file) => file
            .bosses
            .get(name)
            .ok_or_else(|| DataError::BossNotFound(name.to_string())),
        Err(e) => Err(e.clone()),
    }
}

/// Checks that every table parses and that every species, technique and
/// item identifier has an entry. Call once at startup; afterwards the
/// infallible accessors in [`StaticData`] are safe to use.
pub fn validate_tables() -> DataResult<()> {
    for species in Species::iter() {
        let data = get_species_data(species)?;
        for entry in &data.moveset {
            get_technique_data(entry.technique)?;
        }
    }
    for technique in Technique::iter() {
        get_technique_data(technique)?;
    }
    for item in Item::iter() {
        get_item_data(item)?;
    }
    match &*ENCOUNTER_DATA {
        Ok(file) => {
            for table in file.tables.values() {
                let total: u32 = table
                    .overworld
                    .iter()
                    .map(|entry| entry.chance as u32)
                    .sum::<u32>()
                    .max(table.fishing.iter().map(|entry| entry.chance as u32).sum());
                if total > 100 {
                    return Err(DataError::Malformed {
                        table: "encounter",
                        message: format!("chances in '{}' sum to {}", table.name, total),
                    });
                }
            }
            Ok(())
        }
        Err(e) => Err(e.clone()),
    }
}

/// Infallible access to static data for identifiers that are known to be in
/// the tables.
///
/// # Panics
///
/// Panics when the identifier is missing, which only happens when the
/// embedded tables are out of sync with the schema enums. [`validate_tables`]
/// reports that condition as an error up front.
pub trait StaticData {
    type Data: 'static;

    fn data(self) -> &'static Self::Data;
}

impl StaticData for Species {
    type Data = SpeciesData;

    fn data(self) -> &'static SpeciesData {
        match get_species_data(self) {
            Ok(data) => data,
            Err(e) => panic!("static data out of sync: {e}"),
        }
    }
}

impl StaticData for Technique {
    type Data = TechniqueData;

    fn data(self) -> &'static TechniqueData {
        match get_technique_data(self) {
            Ok(data) => data,
            Err(e) => panic!("static data out of sync: {e}"),
        }
    }
}

impl StaticData for Item {
    type Data = ItemData;

    fn data(self) -> &'static ItemData {
        match get_item_data(self) {
            Ok(data) => data,
            Err(e) => panic!("static data out of sync: {e}"),
        }
    }
}
