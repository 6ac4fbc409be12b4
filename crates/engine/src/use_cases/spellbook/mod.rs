//! Spellbook use cases.
//!
//! Render-time partitioning of a character's spells into the standard
//! sections and one section per item that grants spells.

mod grouping;
mod partition;
mod pipeline;
mod prepare;

pub use grouping::{SpellLevelGrouping, StandardGrouping};
pub use partition::{
    is_item_spell, item_sections, partition, sort_sections, spell_granting_items, unlinked_spells,
};
pub use pipeline::{ItemSpellbookHook, SpellbookContext, SpellbookHook, SpellbookPipeline};
pub use prepare::{PrepareSpellbook, SpellbookError};

#[cfg(test)]
pub use grouping::MockStandardGrouping;
