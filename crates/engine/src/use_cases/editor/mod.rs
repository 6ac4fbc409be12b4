//! Spell override editor.
//!
//! The spells tab of an item sheet: which spells an item grants and how
//! each materialized copy deviates from its source.

mod error;
mod item_spells_editor;
mod registry;

pub use error::EditorError;
pub use item_spells_editor::{EditorSpell, ItemSpellsEditor, RemoveSpellOptions};
pub use registry::{OpenSurface, SurfaceRegistry};
