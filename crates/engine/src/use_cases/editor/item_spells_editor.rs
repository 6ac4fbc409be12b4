//! Item spells editor.
//!
//! Backs the spells tab of an item sheet. World items carry spell
//! templates that are edited here; owned items carry materialized
//! instances that can only be unlinked or deleted.

use std::sync::Arc;

use itemspells_domain::{
    FlagKey, Item, ItemFlag, ItemId, SpellOverrides, SpellTemplate, SurfaceId,
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::EditorError;
use super::registry::{OpenSurface, SurfaceRegistry};
use crate::infrastructure::ports::{ItemRepo, SpellSource};
use crate::infrastructure::settings::ModuleSettings;

/// Options for removing a spell from an item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoveSpellOptions {
    /// Owned items only: delete the instance instead of just unlinking it
    #[serde(default)]
    pub also_delete_embedded: bool,
}

/// A row of the spells tab.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSpell {
    /// Template uuid for world items, instance id for owned items
    pub key: String,
    pub spell: Item,
    pub overrides: SpellOverrides,
}

pub struct ItemSpellsEditor {
    item_repo: Arc<dyn ItemRepo>,
    spell_source: Arc<dyn SpellSource>,
    registry: Arc<SurfaceRegistry>,
    settings: Arc<ModuleSettings>,
}

impl ItemSpellsEditor {
    pub fn new(
        item_repo: Arc<dyn ItemRepo>,
        spell_source: Arc<dyn SpellSource>,
        registry: Arc<SurfaceRegistry>,
        settings: Arc<ModuleSettings>,
    ) -> Self {
        Self {
            item_repo,
            spell_source,
            registry,
            settings,
        }
    }

    pub fn registry(&self) -> &SurfaceRegistry {
        &self.registry
    }

    /// Open (or re-render) the spells tab of an item sheet.
    pub async fn open(
        &self,
        surface_id: SurfaceId,
        item_id: ItemId,
    ) -> Result<OpenSurface, EditorError> {
        let item = self.load(item_id).await?;
        if !self.settings.grants_spells(item.item_type) {
            return Err(EditorError::ItemTypeDisabled(item.item_type));
        }
        Ok(self.registry.open(surface_id, item_id))
    }

    pub fn close(&self, surface_id: SurfaceId) -> bool {
        self.registry.close(surface_id).is_some()
    }

    /// Spells shown on the surface's item.
    pub async fn list_spells(&self, surface_id: SurfaceId) -> Result<Vec<EditorSpell>, EditorError> {
        let item = self.surface_item(surface_id).await?;

        let mut rows = Vec::new();
        if item.is_owned() {
            for instance in &item.flags.item_spells {
                match self.item_repo.get(instance.id).await? {
                    Some(spell) => rows.push(EditorSpell {
                        key: spell.id.to_string(),
                        spell,
                        overrides: SpellOverrides::default(),
                    }),
                    None => tracing::debug!(spell_id = %instance.id, "Linked spell no longer exists"),
                }
            }
        } else {
            for template in &item.flags.spell_templates {
                match self.spell_source.from_uuid(&template.source_uuid).await? {
                    Some(spell) => rows.push(EditorSpell {
                        key: template.source_uuid.clone(),
                        spell,
                        overrides: template.overrides.clone(),
                    }),
                    None => tracing::warn!(source = %template.source_uuid, "Template source not found"),
                }
            }
        }

        Ok(rows)
    }

    /// Add a spell (dropped onto the sheet) as a template of a world item.
    ///
    /// Adding a spell the item already grants leaves the item unchanged.
    #[instrument(skip(self))]
    pub async fn add_spell(
        &self,
        surface_id: SurfaceId,
        spell_uuid: &str,
    ) -> Result<Item, EditorError> {
        let item = self.surface_item(surface_id).await?;
        if item.is_owned() {
            return Err(EditorError::OwnedItem);
        }

        let source = self
            .spell_source
            .from_uuid(spell_uuid)
            .await?
            .ok_or_else(|| EditorError::SourceNotFound(spell_uuid.to_string()))?;
        if !source.is_spell() {
            return Err(EditorError::NotASpell(spell_uuid.to_string()));
        }

        if item
            .flags
            .spell_templates
            .iter()
            .any(|t| t.source_uuid == spell_uuid)
        {
            return Ok(item);
        }

        let mut templates = item.flags.spell_templates.clone();
        templates.push(SpellTemplate::new(spell_uuid));

        let updated = self
            .item_repo
            .set_flag(item.id, ItemFlag::SpellTemplates(templates))
            .await?;
        self.registry.request_spells_tab_for_item(item.id);

        tracing::info!(item_id = %item.id, spell = %source.name, "Spell added to item");
        Ok(updated)
    }

    /// Replace the overrides of one template.
    #[instrument(skip(self, overrides))]
    pub async fn update_overrides(
        &self,
        surface_id: SurfaceId,
        spell_uuid: &str,
        overrides: SpellOverrides,
    ) -> Result<Item, EditorError> {
        let item = self.surface_item(surface_id).await?;
        if item.is_owned() {
            return Err(EditorError::OwnedItem);
        }

        let mut templates = item.flags.spell_templates.clone();
        let template = templates
            .iter_mut()
            .find(|t| t.source_uuid == spell_uuid)
            .ok_or_else(|| EditorError::TemplateNotFound(spell_uuid.to_string()))?;
        template.overrides = overrides;

        let updated = self
            .item_repo
            .set_flag(item.id, ItemFlag::SpellTemplates(templates))
            .await?;
        self.registry.request_spells_tab_for_item(item.id);

        tracing::info!(item_id = %item.id, spell = %spell_uuid, "Spell overrides updated");
        Ok(updated)
    }

    /// Remove a spell from the surface's item.
    ///
    /// World items drop the template keyed by `key` (a source uuid). Owned
    /// items drop the instance keyed by `key` (an item id) from their
    /// reference list, then delete the instance or clear its back-reference.
    #[instrument(skip(self))]
    pub async fn remove_spell(
        &self,
        surface_id: SurfaceId,
        key: &str,
        options: RemoveSpellOptions,
    ) -> Result<Item, EditorError> {
        let item = self.surface_item(surface_id).await?;

        let Some(owner) = item.owner else {
            let mut templates = item.flags.spell_templates.clone();
            let before = templates.len();
            templates.retain(|t| t.source_uuid != key);
            if templates.len() == before {
                return Err(EditorError::TemplateNotFound(key.to_string()));
            }

            let updated = self
                .item_repo
                .set_flag(item.id, ItemFlag::SpellTemplates(templates))
                .await?;
            self.registry.request_spells_tab_for_item(item.id);
            tracing::info!(item_id = %item.id, spell = %key, "Spell template removed");
            return Ok(updated);
        };

        let spell_id: ItemId = key.parse()?;
        let mut refs = item.flags.item_spells.clone();
        let before = refs.len();
        refs.retain(|r| r.id != spell_id);
        if refs.len() == before {
            return Err(EditorError::SpellNotLinked(key.to_string()));
        }

        let updated = self
            .item_repo
            .set_flag(item.id, ItemFlag::ItemSpells(refs))
            .await?;
        self.registry.request_spells_tab_for_item(item.id);

        if options.also_delete_embedded {
            self.item_repo.delete_embedded(owner, vec![spell_id]).await?;
            tracing::info!(item_id = %item.id, spell_id = %spell_id, "Linked spell deleted");
        } else {
            match self.item_repo.unset_flag(spell_id, FlagKey::ParentItem).await {
                Ok(_) => {}
                Err(e) if e.is_not_found() => {
                    tracing::debug!(spell_id = %spell_id, "Linked spell already gone")
                }
                Err(e) => return Err(e.into()),
            }
            tracing::info!(item_id = %item.id, spell_id = %spell_id, "Spell unlinked from item");
        }

        Ok(updated)
    }

    async fn surface_item(&self, surface_id: SurfaceId) -> Result<Item, EditorError> {
        let surface = self
            .registry
            .get(surface_id)
            .ok_or(EditorError::SurfaceNotOpen(surface_id))?;
        self.load(surface.item_id).await
    }

    async fn load(&self, item_id: ItemId) -> Result<Item, EditorError> {
        self.item_repo
            .get(item_id)
            .await?
            .ok_or(EditorError::ItemNotFound(item_id))
    }
}
