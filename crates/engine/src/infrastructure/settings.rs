//! Module settings.
//!
//! Typed schema over the host's key/value settings. Lookups never fail:
//! keys outside the schema answer `false`.

use std::collections::BTreeMap;

use anyhow::Context;
use itemspells_domain::{ItemType, ITEM_SECTION_ORDER_EARLY, ITEM_SECTION_ORDER_LATE};
use serde::{Deserialize, Serialize};

use crate::infrastructure::in_memory::MapSettingsReader;
use crate::infrastructure::ports::{SettingValue, SettingsReader};

/// Setting key selecting where item sections sort relative to spell levels.
pub const SORT_ORDER_KEY: &str = "sortOrder";

/// Prefix of the per-type eligibility keys ("includeItemTypeWeapon").
pub const INCLUDE_ITEM_TYPE_PREFIX: &str = "includeItemType";

const SORT_ORDER_ENV: &str = "IWS_SORT_ORDER";
const INCLUDE_ITEM_TYPES_ENV: &str = "IWS_INCLUDE_ITEM_TYPES";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleSettings {
    /// `true` sorts item sections after spell levels, `false` before them
    #[serde(default)]
    pub sort_order: bool,
    #[serde(default = "default_item_types")]
    pub include_item_types: BTreeMap<ItemType, bool>,
}

fn default_item_types() -> BTreeMap<ItemType, bool> {
    ItemType::ALL
        .into_iter()
        .map(|t| (t, default_included(t)))
        .collect()
}

fn default_included(item_type: ItemType) -> bool {
    matches!(
        item_type,
        ItemType::Weapon
            | ItemType::Equipment
            | ItemType::Consumable
            | ItemType::Tool
            | ItemType::Loot
            | ItemType::Feat
            | ItemType::Backpack
    )
}

impl Default for ModuleSettings {
    fn default() -> Self {
        Self {
            sort_order: false,
            include_item_types: default_item_types(),
        }
    }
}

impl ModuleSettings {
    /// Setting key for one item type's eligibility toggle.
    pub fn include_key(item_type: ItemType) -> String {
        format!("{}{}", INCLUDE_ITEM_TYPE_PREFIX, item_type.title_case())
    }

    /// Whether `key` is part of the settings schema.
    pub fn has(&self, key: &str) -> bool {
        key == SORT_ORDER_KEY || Self::item_type_for_key(key).is_some()
    }

    /// Boolean value of a key; unknown keys are `false`.
    pub fn get_bool(&self, key: &str) -> bool {
        if key == SORT_ORDER_KEY {
            return self.sort_order;
        }
        Self::item_type_for_key(key).is_some_and(|t| self.grants_spells(t))
    }

    /// Whether items of this type may grant spells.
    pub fn grants_spells(&self, item_type: ItemType) -> bool {
        self.include_item_types
            .get(&item_type)
            .copied()
            .unwrap_or(false)
    }

    /// Order bias for synthesized item sections.
    pub fn section_order(&self) -> i32 {
        if self.sort_order {
            ITEM_SECTION_ORDER_LATE
        } else {
            ITEM_SECTION_ORDER_EARLY
        }
    }

    pub fn with_sort_order(mut self, sort_order: bool) -> Self {
        self.sort_order = sort_order;
        self
    }

    pub fn with_item_type(mut self, item_type: ItemType, included: bool) -> Self {
        self.include_item_types.insert(item_type, included);
        self
    }

    /// Build settings from the host's key/value reader, keeping defaults for absent keys.
    pub fn from_reader(reader: &dyn SettingsReader) -> Self {
        let mut settings = Self::default();
        if let Some(value) = reader.get(SORT_ORDER_KEY) {
            settings.sort_order = value.as_bool();
        }
        for item_type in ItemType::ALL {
            if let Some(value) = reader.get(&Self::include_key(item_type)) {
                settings.include_item_types.insert(item_type, value.as_bool());
            }
        }
        settings
    }

    /// Load settings from environment variables.
    ///
    /// - `IWS_SORT_ORDER`: `true`/`false`
    /// - `IWS_INCLUDE_ITEM_TYPES`: comma-separated list of enabled types;
    ///   when set, every type not listed is disabled
    pub fn from_env() -> anyhow::Result<Self> {
        let reader = env_reader(
            std::env::var(SORT_ORDER_ENV).ok().as_deref(),
            std::env::var(INCLUDE_ITEM_TYPES_ENV).ok().as_deref(),
        )?;
        Ok(Self::from_reader(&reader))
    }

    fn item_type_for_key(key: &str) -> Option<ItemType> {
        let suffix = key.strip_prefix(INCLUDE_ITEM_TYPE_PREFIX)?;
        ItemType::ALL.into_iter().find(|t| t.title_case() == suffix)
    }
}

/// Translate the raw environment values into setting keys.
fn env_reader(
    sort_order: Option<&str>,
    item_types: Option<&str>,
) -> anyhow::Result<MapSettingsReader> {
    let mut reader = MapSettingsReader::new();

    if let Some(raw) = sort_order {
        let value = raw
            .trim()
            .parse::<bool>()
            .with_context(|| format!("{} must be true or false, got '{}'", SORT_ORDER_ENV, raw))?;
        reader = reader.with(SORT_ORDER_KEY, SettingValue::Bool(value));
    }

    if let Some(raw) = item_types {
        let types =
            parse_type_list(raw).with_context(|| format!("Invalid {}", INCLUDE_ITEM_TYPES_ENV))?;
        for (item_type, included) in types {
            reader = reader.with(
                ModuleSettings::include_key(item_type),
                SettingValue::Bool(included),
            );
        }
    }

    Ok(reader)
}

fn parse_type_list(raw: &str) -> anyhow::Result<BTreeMap<ItemType, bool>> {
    let mut types: BTreeMap<ItemType, bool> =
        ItemType::ALL.into_iter().map(|t| (t, false)).collect();
    for part in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let item_type: ItemType = part.parse()?;
        types.insert(item_type, true);
    }
    Ok(types)
}
