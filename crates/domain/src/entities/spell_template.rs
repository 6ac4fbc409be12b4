//! Spell templates, overrides and the references tying parents to instances.

use serde::{Deserialize, Serialize};

use super::item::{Consumption, Item, ItemSystem, ItemUses};
use crate::ItemId;

/// A spell an item grants, stored on the item until it is materialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellTemplate {
    /// Durable reference of the source spell (compendium or world item)
    #[serde(rename = "uuid")]
    pub source_uuid: String,
    /// Fields the materialized instance deviates with
    #[serde(default, rename = "changes")]
    pub overrides: SpellOverrides,
}

impl SpellTemplate {
    pub fn new(source_uuid: impl Into<String>) -> Self {
        Self {
            source_uuid: source_uuid.into(),
            overrides: SpellOverrides::default(),
        }
    }

    pub fn with_overrides(mut self, overrides: SpellOverrides) -> Self {
        self.overrides = overrides;
        self
    }
}

/// Sparse set of `system` fields a materialized spell deviates with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpellOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ability: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attack_bonus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uses: Option<ItemUses>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub consume: Option<Consumption>,
}

impl SpellOverrides {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Merge these overrides into a spell's `system` subtree.
    pub fn apply_to(&self, system: &mut ItemSystem) {
        if self.ability.is_some() {
            system.ability.clone_from(&self.ability);
        }
        if self.attack_bonus.is_some() {
            system.attack_bonus.clone_from(&self.attack_bonus);
        }
        if let Some(uses) = &self.uses {
            system.uses.get_or_insert_with(ItemUses::default).merge(uses);
        }
        if let Some(consume) = &self.consume {
            system
                .consume
                .get_or_insert_with(Consumption::default)
                .merge(consume);
        }
    }
}

/// Forward reference from a parent item to one materialized instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InstanceRef {
    pub id: ItemId,
    pub uuid: String,
}

/// Back-reference from an instance to its parent item.
///
/// Current instances store the parent's id; instances created under the
/// older scheme store the parent's uuid. Both forms stay valid, so matching
/// always goes through [`ParentRef::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParentRef(String);

impl ParentRef {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Reference written for newly created instances (the parent's id).
    pub fn for_item(parent: &Item) -> Self {
        Self(parent.id.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this reference resolves to `item`, by id or by uuid.
    pub fn matches(&self, item: &Item) -> bool {
        self.0 == item.id.to_string() || self.0 == item.uuid()
    }
}

impl std::fmt::Display for ParentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
