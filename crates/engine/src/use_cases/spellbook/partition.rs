//! Spellbook partitioning.
//!
//! Spells granted by an item move out of the standard sections into one
//! section per granting item. Links are always derived from the live
//! back-references on the spells; the item's own reference list only
//! decides whether an item with no live spells still gets a section.

use std::cmp::Ordering;

use itemspells_domain::{Item, SpellbookSection};

use super::grouping::StandardGrouping;
use crate::infrastructure::settings::ModuleSettings;

/// Items on the character that may grant spells.
///
/// Same rule as the lifecycle guard: the item's type is enabled in settings.
pub fn spell_granting_items<'a>(
    items: &'a [Item],
    settings: &'a ModuleSettings,
) -> impl Iterator<Item = &'a Item> + 'a {
    items
        .iter()
        .filter(move |item| settings.grants_spells(item.item_type))
}

/// Whether a spell points back at one of the character's spell granting items.
pub fn is_item_spell(spell: &Item, items: &[Item], settings: &ModuleSettings) -> bool {
    spell.parent_ref().is_some()
        && spell_granting_items(items, settings).any(|parent| spell.is_linked_to(parent))
}

/// Spells that belong in the standard sections.
pub fn unlinked_spells(spells: &[Item], items: &[Item], settings: &ModuleSettings) -> Vec<Item> {
    spells
        .iter()
        .filter(|spell| !is_item_spell(spell, items, settings))
        .cloned()
        .collect()
}

/// One section per spell granting item, in item order.
///
/// Items that require attunement the character has not given contribute
/// nothing: their spells are hidden until attunement.
pub fn item_sections(
    spells: &[Item],
    items: &[Item],
    settings: &ModuleSettings,
) -> Vec<SpellbookSection> {
    let order = settings.section_order();
    spell_granting_items(items, settings)
        .filter(|parent| !parent.is_unattuned())
        .filter_map(|parent| {
            let linked: Vec<Item> = spells
                .iter()
                .filter(|spell| spell.is_linked_to(parent))
                .cloned()
                .collect();
            if linked.is_empty() && parent.flags.item_spells.is_empty() {
                return None;
            }
            Some(SpellbookSection::for_item(parent, order, linked))
        })
        .collect()
}

/// Sort by order, then label. The sort is stable.
pub fn sort_sections(sections: &mut [SpellbookSection]) {
    sections.sort_by(|a, b| match a.order.cmp(&b.order) {
        Ordering::Equal => a.label.cmp(&b.label),
        other => other,
    });
}

/// Split a character's spells between the standard grouping and per-item sections.
pub fn partition(
    spells: &[Item],
    items: &[Item],
    grouping: &dyn StandardGrouping,
    settings: &ModuleSettings,
) -> Vec<SpellbookSection> {
    let mut sections = grouping.group(&unlinked_spells(spells, items, settings));
    sections.extend(item_sections(spells, items, settings));
    sort_sections(&mut sections);
    sections
}
