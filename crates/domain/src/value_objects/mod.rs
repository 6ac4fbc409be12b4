//! Value objects - immutable data with no identity

mod spellbook;
mod stat_context;

pub use spellbook::{
    SectionKey, SpellbookSection, ITEM_SECTION_ORDER_EARLY, ITEM_SECTION_ORDER_LATE,
    UNSET_COUNTER,
};
pub use stat_context::{RollDataMode, StatContext};
