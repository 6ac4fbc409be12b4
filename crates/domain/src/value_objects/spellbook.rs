//! Spellbook view model - ordered sections of a character's spells

use serde::{Deserialize, Serialize};

use crate::entities::Item;
use crate::ItemId;

/// Shown in place of a missing uses/slots value.
pub const UNSET_COUNTER: &str = "-";

/// Order bias of item sections when the module sorts them after spell levels.
pub const ITEM_SECTION_ORDER_LATE: i32 = 20;

/// Order bias of item sections when the module sorts them before spell levels.
pub const ITEM_SECTION_ORDER_EARLY: i32 = -5;

/// What a section groups by.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "prop", content = "key", rename_all = "camelCase")]
pub enum SectionKey {
    /// A section produced by the standard grouping (e.g. "spell3")
    Standard(String),
    /// A section synthesized for an item that grants spells
    Item(ItemId),
}

/// One section of a spellbook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellbookSection {
    pub order: i32,
    pub label: String,
    pub uses_slots: bool,
    pub can_create: bool,
    pub can_prepare: bool,
    pub spells: Vec<Item>,
    pub uses: String,
    pub slots: String,
    #[serde(rename = "override")]
    pub slot_override: u32,
    pub key: SectionKey,
}

impl SpellbookSection {
    /// Section for an item that grants spells.
    ///
    /// Spells in it are cast from the item's charges, never from slots,
    /// and cannot be created or prepared from the sheet.
    pub fn for_item(parent: &Item, order: i32, spells: Vec<Item>) -> Self {
        let uses = parent.system.uses.as_ref();
        Self {
            order,
            label: parent.name.clone(),
            uses_slots: false,
            can_create: false,
            can_prepare: false,
            spells,
            uses: uses
                .and_then(|u| u.value)
                .map_or_else(|| UNSET_COUNTER.to_string(), |v| v.to_string()),
            slots: uses
                .and_then(|u| u.max.clone())
                .unwrap_or_else(|| UNSET_COUNTER.to_string()),
            slot_override: 0,
            key: SectionKey::Item(parent.id),
        }
    }

    pub fn item_id(&self) -> Option<ItemId> {
        match &self.key {
            SectionKey::Item(id) => Some(*id),
            SectionKey::Standard(_) => None,
        }
    }

    pub fn contains(&self, spell: ItemId) -> bool {
        self.spells.iter().any(|s| s.id == spell)
    }
}
