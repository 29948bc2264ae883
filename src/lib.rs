//! Spectra Adventure Battle Engine
//!
//! A frame-stepped, turn-based creature battle engine: three against three,
//! evade-ordered turns, ailments, stat boosts, capture and escape. Battle
//! logic never renders anything; it feeds lines to an output queue and
//! waits for each one to be read before moving on.

// --- MODULE DECLARATIONS ---
pub mod battle;
pub mod config;
pub mod data;
pub mod errors;
pub mod frontend;
pub mod input;
pub mod menu;
pub mod output;
pub mod player;
pub mod spectra;

// --- PUBLIC API RE-EXPORTS ---

// --- From the `schema` crate ---
pub use schema::{
    Ailment, EffectKind, ElementType, EncounterKind, Item, ItemFlags, Species, StatKind,
    TargetKind, TargetMask, Technique,
};

// --- From this crate's modules (`src/`) ---

// The battle session and what it reports.
pub use battle::encounter::Encounter;
pub use battle::rng::BattleRng;
pub use battle::session::{BattleSession, PlayerControl};
pub use battle::state::{BattleEvent, BattleOutcome, BattlePhase, BattleState, EventBus};

// Roster and collaborator interfaces.
pub use config::BattleConfig;
pub use input::{FrameInput, GameMode, InputAction, InputSource, ModeLog, ModeSwitch};
pub use output::{OutputQueue, OutputSink};
pub use player::Player;
pub use spectra::Spectra;

// Static data access.
pub use data::{get_item_data, get_species_data, get_technique_data, validate_tables, StaticData};

// Crate-specific error and result types.
pub use errors::{DataError, DataResult, Result, RosterError, SpectraError};
