//! Eligibility checks shared by the create and delete handlers.

use std::sync::Arc;

use itemspells_domain::{Character, Item, UserId};

use super::error::SkipReason;
use crate::infrastructure::ports::{CharacterRepo, RepoError};
use crate::infrastructure::settings::ModuleSettings;

pub(crate) enum Eligibility {
    Eligible(Character),
    Skip(SkipReason),
}

/// Decides whether this client should act on an item lifecycle event.
pub struct EventGuard {
    character_repo: Arc<dyn CharacterRepo>,
    settings: Arc<ModuleSettings>,
    current_user: UserId,
}

impl EventGuard {
    pub fn new(
        character_repo: Arc<dyn CharacterRepo>,
        settings: Arc<ModuleSettings>,
        current_user: UserId,
    ) -> Self {
        Self {
            character_repo,
            settings,
            current_user,
        }
    }

    /// User and owner checks; `check_item_type` adds the per-type setting.
    pub(crate) async fn check(
        &self,
        item: &Item,
        acting_user: &UserId,
        check_item_type: bool,
    ) -> Result<Eligibility, RepoError> {
        if acting_user != &self.current_user {
            return Ok(Eligibility::Skip(SkipReason::ForeignUser));
        }

        let Some(owner) = item.owner else {
            return Ok(Eligibility::Skip(SkipReason::Unowned));
        };

        let Some(character) = self.character_repo.get(owner).await? else {
            return Ok(Eligibility::Skip(SkipReason::CharacterMissing));
        };

        if !character.kind.is_individual() {
            return Ok(Eligibility::Skip(SkipReason::ExcludedCharacterKind(
                character.kind,
            )));
        }

        if check_item_type && !self.settings.grants_spells(item.item_type) {
            return Ok(Eligibility::Skip(SkipReason::ItemTypeDisabled(
                item.item_type,
            )));
        }

        Ok(Eligibility::Eligible(character))
    }
}
