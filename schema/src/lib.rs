// Spectra Adventure Schema - Shared type definitions
// This crate contains the plain data types that describe species, techniques,
// items and encounters. The main `spectra-adventure` crate loads its static
// tables into these types and builds the battle engine on top of them.

// Re-export the main types
pub use effects::*;
pub use element::*;
pub use encounters::*;
pub use items::*;
pub use species::*;
pub use status::*;
pub use targeting::*;
pub use techniques::*;

pub mod effects;
pub mod element;
pub mod encounters;
pub mod items;
pub mod species;
pub mod status;
pub mod targeting;
pub mod techniques;
