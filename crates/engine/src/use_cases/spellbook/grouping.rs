//! Standard spellbook grouping: one section per spell level.

use std::collections::BTreeMap;

use itemspells_domain::{Item, SectionKey, SpellbookSection, UNSET_COUNTER};

/// Groups spells into the host's standard sections.
#[cfg_attr(test, mockall::automock)]
pub trait StandardGrouping: Send + Sync {
    fn group(&self, spells: &[Item]) -> Vec<SpellbookSection>;
}

/// Default grouping: cantrips, then 1st through 9th level.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpellLevelGrouping;

impl SpellLevelGrouping {
    pub fn new() -> Self {
        Self
    }

    pub fn label(level: u8) -> String {
        let suffix = match level {
            1 => "st",
            2 => "nd",
            3 => "rd",
            _ => "th",
        };
        match level {
            0 => "Cantrips".to_string(),
            n => format!("{}{} Level", n, suffix),
        }
    }
}

impl StandardGrouping for SpellLevelGrouping {
    fn group(&self, spells: &[Item]) -> Vec<SpellbookSection> {
        let mut by_level: BTreeMap<u8, Vec<Item>> = BTreeMap::new();
        for spell in spells {
            by_level
                .entry(spell.system.level.unwrap_or(0))
                .or_default()
                .push(spell.clone());
        }

        by_level
            .into_iter()
            .map(|(level, spells)| SpellbookSection {
                order: i32::from(level),
                label: Self::label(level),
                uses_slots: level > 0,
                can_create: true,
                can_prepare: level > 0,
                spells,
                uses: UNSET_COUNTER.to_string(),
                slots: UNSET_COUNTER.to_string(),
                slot_override: 0,
                key: SectionKey::Standard(format!("spell{}", level)),
            })
            .collect()
    }
}
