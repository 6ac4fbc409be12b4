//! Item spells domain.
//!
//! Items that grant spells, the spell templates they carry, the instances
//! materialized from those templates, and the spellbook view model.

pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{
    AttunementState, Character, CharacterKind, ConsumeType, Consumption, FlagKey, InstanceRef,
    Item, ItemData, ItemFlag, ItemFlags, ItemSystem, ItemType, ItemUses, ParentRef,
    SpellOverrides, SpellTemplate, StatModifier,
};

pub use error::DomainError;

pub use ids::{CharacterId, ItemId, SurfaceId, UserId};

pub use value_objects::{
    RollDataMode, SectionKey, SpellbookSection, StatContext, ITEM_SECTION_ORDER_EARLY,
    ITEM_SECTION_ORDER_LATE, UNSET_COUNTER,
};
