//! Character entity - the owner of items and the source of roll data

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::item::Item;
use crate::value_objects::{RollDataMode, StatContext};
use crate::CharacterId;

/// Kind of actor that owns items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterKind {
    Character,
    Npc,
    /// A party or other grouping of actors
    Group,
    Vehicle,
}

impl CharacterKind {
    /// Whether this kind is an individual creature that can cast spells.
    pub fn is_individual(&self) -> bool {
        matches!(self, Self::Character | Self::Npc)
    }
}

impl std::fmt::Display for CharacterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Character => write!(f, "character"),
            Self::Npc => write!(f, "npc"),
            Self::Group => write!(f, "group"),
            Self::Vehicle => write!(f, "vehicle"),
        }
    }
}

/// A temporary or conditional modifier to an ability score
/// (from spells, conditions, situational effects).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatModifier {
    /// Ability key the modifier applies to (e.g. "str")
    pub stat: String,
    /// Source of the modifier (e.g. "Bless", "Exhausted")
    pub source: String,
    pub value: i32,
    pub active: bool,
}

impl StatModifier {
    pub fn new(stat: impl Into<String>, source: impl Into<String>, value: i32) -> Self {
        Self {
            stat: stat.into(),
            source: source.into(),
            value,
            active: true,
        }
    }
}

/// A character or NPC that owns items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: CharacterId,
    pub name: String,
    pub kind: CharacterKind,
    pub level: u8,
    /// Base ability scores keyed by ability ("str", "dex", ...)
    #[serde(default)]
    pub abilities: BTreeMap<String, i32>,
    #[serde(default)]
    pub modifiers: Vec<StatModifier>,
}

impl Character {
    pub fn new(name: impl Into<String>, kind: CharacterKind) -> Self {
        Self {
            id: CharacterId::new(),
            name: name.into(),
            kind,
            level: 1,
            abilities: BTreeMap::new(),
            modifiers: Vec::new(),
        }
    }

    pub fn with_id(mut self, id: CharacterId) -> Self {
        self.id = id;
        self
    }

    pub fn with_level(mut self, level: u8) -> Self {
        self.level = level;
        self
    }

    pub fn with_ability(mut self, key: impl Into<String>, score: i32) -> Self {
        self.abilities.insert(key.into(), score);
        self
    }

    pub fn with_modifier(mut self, modifier: StatModifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    /// Proficiency bonus for the character's level.
    pub fn proficiency_bonus(&self) -> i32 {
        ((self.level.max(1) as i32 - 1) / 4) + 2
    }

    /// Floor((score - 10) / 2)
    pub fn ability_modifier(score: i32) -> i32 {
        (score - 10).div_euclid(2)
    }

    /// Score of one ability, including active modifiers unless `mode` is deterministic.
    pub fn ability_score(&self, key: &str, mode: RollDataMode) -> Option<i32> {
        let base = *self.abilities.get(key)?;
        let bonus: i32 = match mode {
            RollDataMode::Deterministic => 0,
            RollDataMode::Full => self
                .modifiers
                .iter()
                .filter(|m| m.active && m.stat == key)
                .map(|m| m.value)
                .sum(),
        };
        Some(base + bonus)
    }

    /// Build the stat context formulas are evaluated against.
    ///
    /// Paths: `prof`, `details.level`, `abilities.<key>.value`,
    /// `abilities.<key>.mod`, and for the given item `item.quantity`
    /// and `item.uses.value`.
    pub fn roll_data(&self, item: Option<&Item>, mode: RollDataMode) -> StatContext {
        let mut ctx = StatContext::new();
        ctx.insert("prof", self.proficiency_bonus());
        ctx.insert("details.level", self.level);

        for key in self.abilities.keys() {
            if let Some(score) = self.ability_score(key, mode) {
                ctx.insert(format!("abilities.{}.value", key), score);
                ctx.insert(
                    format!("abilities.{}.mod", key),
                    Self::ability_modifier(score),
                );
            }
        }

        if let Some(item) = item {
            ctx.insert("item.quantity", item.system.quantity);
            if let Some(value) = item.system.uses.as_ref().and_then(|u| u.value) {
                ctx.insert("item.uses.value", value as f64);
            }
        }

        ctx
    }
}
