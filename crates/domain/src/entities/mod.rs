//! Domain entities

mod character;
mod item;
mod spell_template;

pub use character::{Character, CharacterKind, StatModifier};
pub use item::{
    AttunementState, ConsumeType, Consumption, FlagKey, Item, ItemData, ItemFlag, ItemFlags,
    ItemSystem, ItemType, ItemUses,
};
pub use spell_template::{InstanceRef, ParentRef, SpellOverrides, SpellTemplate};
