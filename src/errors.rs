use schema::{Item, Species, Technique};
use thiserror::Error;

/// Main error type for the Spectra Adventure engine.
#[derive(Debug, Error)]
pub enum SpectraError {
    /// Error related to static data lookup or parsing
    #[error(transparent)]
    Data(#[from] DataError),
    /// Error related to roster or inventory mutation
    #[error(transparent)]
    Roster(#[from] RosterError),
    /// A battle could not be set up from the given inputs
    #[error("invalid battle setup: {0}")]
    Setup(String),
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Config(#[from] ron::error::SpannedError),
    #[error("failed to encode event: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors related to the static species, technique, item and encounter tables.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataError {
    #[error("species {0:?} not found in the species table")]
    SpeciesNotFound(Species),
    #[error("technique {0:?} not found in the technique table")]
    TechniqueNotFound(Technique),
    #[error("item {0:?} not found in the item table")]
    ItemNotFound(Item),
    #[error("encounter table '{0}' not found")]
    EncounterTableNotFound(String),
    #[error("boss party '{0}' not found")]
    BossNotFound(String),
    #[error("malformed {table} table: {message}")]
    Malformed { table: &'static str, message: String },
}

/// Errors related to the player's party and inventory.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("the party is full")]
    PartyFull,
    #[error("the inventory is full")]
    InventoryFull,
    #[error("no item in inventory slot {0}")]
    NoSuchItem(usize),
}

pub type Result<T> = std::result::Result<T, SpectraError>;
pub type DataResult<T> = std::result::Result<T, DataError>;
