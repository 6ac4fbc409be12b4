//! Spellbook preparation pipeline.
//!
//! The standard grouping runs between two extension points: hooks may
//! filter the spells before grouping and rework the sections after it.

use std::sync::Arc;

use itemspells_domain::{Item, SpellbookSection};

use super::grouping::StandardGrouping;
use super::partition::{item_sections, sort_sections, unlinked_spells};
use crate::infrastructure::settings::ModuleSettings;

/// What a hook can see of the character being rendered.
#[derive(Debug, Clone, Copy)]
pub struct SpellbookContext<'a> {
    /// Every spell on the character, before any hook filtered it
    pub spells: &'a [Item],
    /// Every item on the character, spells included
    pub items: &'a [Item],
}

/// Extension point around the standard grouping.
pub trait SpellbookHook: Send + Sync {
    fn before_grouping(&self, _ctx: &SpellbookContext<'_>, spells: Vec<Item>) -> Vec<Item> {
        spells
    }

    fn after_grouping(
        &self,
        _ctx: &SpellbookContext<'_>,
        sections: Vec<SpellbookSection>,
    ) -> Vec<SpellbookSection> {
        sections
    }
}

/// Moves item spells out of the standard sections into per-item sections.
pub struct ItemSpellbookHook {
    settings: Arc<ModuleSettings>,
}

impl ItemSpellbookHook {
    pub fn new(settings: Arc<ModuleSettings>) -> Self {
        Self { settings }
    }
}

impl SpellbookHook for ItemSpellbookHook {
    fn before_grouping(&self, ctx: &SpellbookContext<'_>, spells: Vec<Item>) -> Vec<Item> {
        unlinked_spells(&spells, ctx.items, &self.settings)
    }

    fn after_grouping(
        &self,
        ctx: &SpellbookContext<'_>,
        mut sections: Vec<SpellbookSection>,
    ) -> Vec<SpellbookSection> {
        sections.extend(item_sections(ctx.spells, ctx.items, &self.settings));
        sort_sections(&mut sections);
        sections
    }
}

/// Standard grouping plus hooks, run in registration order.
pub struct SpellbookPipeline {
    grouping: Arc<dyn StandardGrouping>,
    hooks: Vec<Arc<dyn SpellbookHook>>,
}

impl SpellbookPipeline {
    pub fn new(grouping: Arc<dyn StandardGrouping>) -> Self {
        Self {
            grouping,
            hooks: Vec::new(),
        }
    }

    pub fn with_hook(mut self, hook: Arc<dyn SpellbookHook>) -> Self {
        self.hooks.push(hook);
        self
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    pub fn prepare(&self, spells: &[Item], items: &[Item]) -> Vec<SpellbookSection> {
        let ctx = SpellbookContext { spells, items };

        let grouped_spells = self
            .hooks
            .iter()
            .fold(spells.to_vec(), |acc, hook| hook.before_grouping(&ctx, acc));

        let sections = self.grouping.group(&grouped_spells);

        self.hooks
            .iter()
            .fold(sections, |acc, hook| hook.after_grouping(&ctx, acc))
    }
}
