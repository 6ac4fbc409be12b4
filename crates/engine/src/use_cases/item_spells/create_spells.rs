//! Materialize item spells use case.
//!
//! When an item that grants spells lands on a character, create one spell
//! per template on that character and record the created instances on the item.

use std::sync::Arc;

use futures_util::future::join_all;
use itemspells_domain::{Item, ItemData, ItemFlag, RollDataMode, SpellTemplate, StatContext, UserId};
use tracing::instrument;

use super::error::{CreateOutcome, DroppedTemplate, ItemSpellsError, SkipReason};
use super::guard::{Eligibility, EventGuard};
use super::overrides::{instance_data, resolve_overrides};
use crate::infrastructure::ports::{FormulaEvaluator, ItemRepo, SpellSource};

/// Materialize item spells use case.
///
/// Orchestrates: eligibility guards, template resolution, batch creation,
/// instance reference write-back.
pub struct MaterializeItemSpells {
    item_repo: Arc<dyn ItemRepo>,
    spell_source: Arc<dyn SpellSource>,
    evaluator: Arc<dyn FormulaEvaluator>,
    guard: Arc<EventGuard>,
}

impl MaterializeItemSpells {
    pub fn new(
        item_repo: Arc<dyn ItemRepo>,
        spell_source: Arc<dyn SpellSource>,
        evaluator: Arc<dyn FormulaEvaluator>,
        guard: Arc<EventGuard>,
    ) -> Self {
        Self {
            item_repo,
            spell_source,
            evaluator,
            guard,
        }
    }

    /// Handle the creation of `item` by `acting_user`.
    ///
    /// # Returns
    /// * `Ok(CreateOutcome::Materialized)` - instances created (possibly none) and recorded
    /// * `Ok(CreateOutcome::Skipped)` - the event is not ours to handle
    /// * `Err(ItemSpellsError)` - a store call failed; nothing is retried
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn execute(
        &self,
        item: &Item,
        acting_user: &UserId,
    ) -> Result<CreateOutcome, ItemSpellsError> {
        let character = match self.guard.check(item, acting_user, true).await? {
            Eligibility::Eligible(character) => character,
            Eligibility::Skip(reason) => {
                tracing::debug!(reason = %reason, "Item creation ignored");
                return Ok(CreateOutcome::Skipped(reason));
            }
        };

        // Read fresh: another handler may have touched the item since the event fired
        let Some(parent) = self.item_repo.get(item.id).await? else {
            return Ok(CreateOutcome::Skipped(SkipReason::ItemMissing));
        };

        if parent.flags.spell_templates.is_empty() {
            return Ok(CreateOutcome::Skipped(SkipReason::NoTemplates));
        }

        let ctx = character.roll_data(Some(&parent), RollDataMode::Deterministic);
        let results = join_all(
            parent
                .flags
                .spell_templates
                .iter()
                .map(|template| self.prepare(&parent, template, &ctx)),
        )
        .await;

        let mut data = Vec::with_capacity(results.len());
        let mut dropped = Vec::new();
        for result in results {
            match result {
                Ok(d) => data.push(d),
                Err(d) => {
                    tracing::warn!(
                        source = %d.source_uuid,
                        reason = %d.reason,
                        "Spell template dropped"
                    );
                    dropped.push(d);
                }
            }
        }

        let created = if data.is_empty() {
            Vec::new()
        } else {
            self.item_repo.create_embedded(character.id, data).await?
        };

        let refs = created.iter().map(Item::instance_ref).collect();
        let parent = self
            .item_repo
            .set_flag(parent.id, ItemFlag::ItemSpells(refs))
            .await?;

        tracing::info!(
            item_id = %parent.id,
            character_id = %character.id,
            created = created.len(),
            dropped = dropped.len(),
            "Item spells materialized"
        );

        Ok(CreateOutcome::Materialized {
            parent,
            created,
            dropped,
        })
    }

    async fn prepare(
        &self,
        parent: &Item,
        template: &SpellTemplate,
        ctx: &StatContext,
    ) -> Result<ItemData, DroppedTemplate> {
        let dropped = |reason: String| DroppedTemplate {
            source_uuid: template.source_uuid.clone(),
            reason,
        };

        let source = match self.spell_source.from_uuid(&template.source_uuid).await {
            Ok(Some(source)) => source,
            Ok(None) => return Err(dropped("source spell not found".to_string())),
            Err(e) => return Err(dropped(e.to_string())),
        };

        let overrides = resolve_overrides(parent, template, ctx, self.evaluator.as_ref());
        Ok(instance_data(parent, &source, &overrides))
    }
}
