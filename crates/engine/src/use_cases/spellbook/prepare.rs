//! Prepare spellbook use case.

use std::sync::Arc;

use itemspells_domain::{CharacterId, Item, SpellbookSection};
use tracing::instrument;

use super::pipeline::SpellbookPipeline;
use crate::infrastructure::ports::{CharacterRepo, ItemRepo, RepoError};

#[derive(Debug, thiserror::Error)]
pub enum SpellbookError {
    #[error("Character not found")]
    CharacterNotFound,
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Builds the spellbook view of one character from its current items.
pub struct PrepareSpellbook {
    character_repo: Arc<dyn CharacterRepo>,
    item_repo: Arc<dyn ItemRepo>,
    pipeline: Arc<SpellbookPipeline>,
}

impl PrepareSpellbook {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        item_repo: Arc<dyn ItemRepo>,
        pipeline: Arc<SpellbookPipeline>,
    ) -> Self {
        Self {
            character_repo,
            item_repo,
            pipeline,
        }
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self,
        character_id: CharacterId,
    ) -> Result<Vec<SpellbookSection>, SpellbookError> {
        if self.character_repo.get(character_id).await?.is_none() {
            return Err(SpellbookError::CharacterNotFound);
        }

        let items = self.item_repo.list_for_character(character_id).await?;
        let spells: Vec<Item> = items.iter().filter(|i| i.is_spell()).cloned().collect();

        let sections = self.pipeline.prepare(&spells, &items);
        tracing::debug!(
            character_id = %character_id,
            spells = spells.len(),
            sections = sections.len(),
            "Spellbook prepared"
        );
        Ok(sections)
    }
}
