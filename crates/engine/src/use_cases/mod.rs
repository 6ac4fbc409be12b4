//! Use cases - User story orchestration.
//!
//! Each module contains use cases for a specific area:
//! - `item_spells`: lifecycle synchronization between items and their spells
//! - `spellbook`: render-time partitioning of a character's spells
//! - `editor`: the spells tab of an item sheet

pub mod editor;
pub mod item_spells;
pub mod spellbook;

pub use editor::ItemSpellsEditor;
pub use item_spells::ItemSpellsUseCases;
pub use spellbook::{PrepareSpellbook, SpellbookPipeline};
