//! Item entity - equipment, features and spells embedded on a character
//!
//! Items that grant spells ("parents") and the spells they materialize
//! ("instances") are the same document type; the relationship between them
//! lives entirely in [`ItemFlags`]:
//!
//! ```text
//! parent.flags.spell_templates  -> what to materialize (authored on the sheet)
//! parent.flags.item_spells      -> [{id, uuid}] of materialized instances
//! instance.flags.parent_item    -> back-reference to the parent (id or uuid)
//! ```

use serde::{Deserialize, Serialize};

use super::spell_template::{InstanceRef, ParentRef, SpellTemplate};
use crate::error::DomainError;
use crate::{CharacterId, ItemId};

/// Type of an item document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Weapon,
    Equipment,
    Consumable,
    Tool,
    Loot,
    Backpack,
    Feat,
    Spell,
    Class,
    Subclass,
    Background,
    Race,
}

impl ItemType {
    pub const ALL: [ItemType; 12] = [
        Self::Weapon,
        Self::Equipment,
        Self::Consumable,
        Self::Tool,
        Self::Loot,
        Self::Backpack,
        Self::Feat,
        Self::Spell,
        Self::Class,
        Self::Subclass,
        Self::Background,
        Self::Race,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Weapon => "weapon",
            Self::Equipment => "equipment",
            Self::Consumable => "consumable",
            Self::Tool => "tool",
            Self::Loot => "loot",
            Self::Backpack => "backpack",
            Self::Feat => "feat",
            Self::Spell => "spell",
            Self::Class => "class",
            Self::Subclass => "subclass",
            Self::Background => "background",
            Self::Race => "race",
        }
    }

    /// Title-cased name, as used in per-type setting keys ("Weapon").
    pub fn title_case(&self) -> String {
        let s = self.as_str();
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
            None => String::new(),
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ItemType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == needle)
            .ok_or_else(|| DomainError::parse(format!("Unknown item type: {}", s)))
    }
}

/// Attunement requirement/status of an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AttunementState {
    /// No attunement needed
    #[default]
    None,
    /// Attunement required, but the character is not attuned
    Required,
    /// Attunement required and satisfied
    Attuned,
}

/// Limited uses (charges) of an item or spell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUses {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<i64>,
    /// Formula for the maximum (e.g. "3" or "@prof")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<String>,
    /// Recovery period (e.g. "day", "lr", "sr")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub per: Option<String>,
}

impl ItemUses {
    /// Field-wise merge; `Some` values in `other` win.
    pub fn merge(&mut self, other: &ItemUses) {
        if other.value.is_some() {
            self.value = other.value;
        }
        if other.max.is_some() {
            self.max.clone_from(&other.max);
        }
        if other.per.is_some() {
            self.per.clone_from(&other.per);
        }
    }
}

/// What a use of an item consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConsumeType {
    Ammo,
    Attribute,
    HitDice,
    Material,
    /// Charges of another item (the target)
    Charges,
}

/// Resource consumption of an item or spell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Consumption {
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<ConsumeType>,
    /// Id of the consumed resource (an item id for `Charges`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u32>,
}

impl Consumption {
    pub fn merge(&mut self, other: &Consumption) {
        if other.kind.is_some() {
            self.kind = other.kind;
        }
        if other.target.is_some() {
            self.target.clone_from(&other.target);
        }
        if other.amount.is_some() {
            self.amount = other.amount;
        }
    }
}

/// Ruleset data of an item (the `system` subtree).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemSystem {
    #[serde(default)]
    pub attunement: AttunementState,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Spell level (0 = cantrip); only meaningful for spells
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Ability used for attack rolls ("none" disables the ability modifier)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    /// Attack bonus formula
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_bonus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<ItemUses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consume: Option<Consumption>,
}

fn default_quantity() -> u32 {
    1
}

/// Spell-relationship metadata stored on an item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ItemFlags {
    /// Spells this item grants, not yet materialized
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub spell_templates: Vec<SpellTemplate>,
    /// Materialized instances created from `spell_templates`
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub item_spells: Vec<InstanceRef>,
    /// Back-reference from an instance to its parent item
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_item: Option<ParentRef>,
}

/// Metadata keys of [`ItemFlags`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlagKey {
    SpellTemplates,
    ItemSpells,
    ParentItem,
}

impl FlagKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SpellTemplates => "spell-templates",
            Self::ItemSpells => "item-spells",
            Self::ParentItem => "parent-item",
        }
    }
}

impl std::fmt::Display for FlagKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single metadata write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "kebab-case")]
pub enum ItemFlag {
    SpellTemplates(Vec<SpellTemplate>),
    ItemSpells(Vec<InstanceRef>),
    ParentItem(ParentRef),
}

impl ItemFlag {
    pub fn key(&self) -> FlagKey {
        match self {
            Self::SpellTemplates(_) => FlagKey::SpellTemplates,
            Self::ItemSpells(_) => FlagKey::ItemSpells,
            Self::ParentItem(_) => FlagKey::ParentItem,
        }
    }
}

impl ItemFlags {
    pub fn set(&mut self, flag: ItemFlag) {
        match flag {
            ItemFlag::SpellTemplates(templates) => self.spell_templates = templates,
            ItemFlag::ItemSpells(refs) => self.item_spells = refs,
            ItemFlag::ParentItem(parent) => self.parent_item = Some(parent),
        }
    }

    pub fn unset(&mut self, key: FlagKey) {
        match key {
            FlagKey::SpellTemplates => self.spell_templates.clear(),
            FlagKey::ItemSpells => self.item_spells.clear(),
            FlagKey::ParentItem => self.parent_item = None,
        }
    }
}

/// Creation payload for an item; the store assigns identity and owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemData {
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub system: ItemSystem,
    #[serde(default)]
    pub flags: ItemFlags,
}

impl ItemData {
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self {
            name: name.into(),
            item_type,
            system: ItemSystem {
                quantity: 1,
                ..ItemSystem::default()
            },
            flags: ItemFlags::default(),
        }
    }
}

/// An item document, either in the world directory or embedded on a character.
///
/// Simple data struct: any combination of values is a valid item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: ItemId,
    /// Owning character; `None` for world-level items
    pub owner: Option<CharacterId>,
    pub name: String,
    #[serde(rename = "type")]
    pub item_type: ItemType,
    #[serde(default)]
    pub system: ItemSystem,
    #[serde(default)]
    pub flags: ItemFlags,
}

impl Item {
    pub fn new(name: impl Into<String>, item_type: ItemType) -> Self {
        Self::from_data(ItemId::new(), None, ItemData::new(name, item_type))
    }

    pub fn from_data(id: ItemId, owner: Option<CharacterId>, data: ItemData) -> Self {
        Self {
            id,
            owner,
            name: data.name,
            item_type: data.item_type,
            system: data.system,
            flags: data.flags,
        }
    }

    /// Copy of the document content, without identity.
    pub fn to_data(&self) -> ItemData {
        ItemData {
            name: self.name.clone(),
            item_type: self.item_type,
            system: self.system.clone(),
            flags: self.flags.clone(),
        }
    }

    pub fn with_owner(mut self, owner: CharacterId) -> Self {
        self.owner = Some(owner);
        self
    }

    pub fn with_system(mut self, system: ItemSystem) -> Self {
        self.system = system;
        self
    }

    pub fn with_flags(mut self, flags: ItemFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Durable cross-reference to this document.
    ///
    /// `Actor.<character>.Item.<item>` for embedded items, `Item.<item>` otherwise.
    pub fn uuid(&self) -> String {
        match self.owner {
            Some(owner) => format!("Actor.{}.Item.{}", owner, self.id),
            None => format!("Item.{}", self.id),
        }
    }

    pub fn is_owned(&self) -> bool {
        self.owner.is_some()
    }

    pub fn is_spell(&self) -> bool {
        self.item_type == ItemType::Spell
    }

    /// Whether the item requires attunement the character has not given it.
    pub fn is_unattuned(&self) -> bool {
        self.system.attunement == AttunementState::Required
    }

    pub fn parent_ref(&self) -> Option<&ParentRef> {
        self.flags.parent_item.as_ref()
    }

    /// Whether this item's back-reference points at `parent`.
    pub fn is_linked_to(&self, parent: &Item) -> bool {
        self.parent_ref().is_some_and(|r| r.matches(parent))
    }

    pub fn instance_ref(&self) -> InstanceRef {
        InstanceRef {
            id: self.id,
            uuid: self.uuid(),
        }
    }
}
