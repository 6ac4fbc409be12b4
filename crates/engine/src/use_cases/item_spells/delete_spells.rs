//! Cascade item spells use case.
//!
//! When an item that granted spells is removed from a character, offer to
//! remove the spells it created as well.

use std::sync::Arc;

use itemspells_domain::{Item, ItemId, UserId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::error::{DeleteOutcome, ItemSpellsError, SkipReason};
use super::guard::{Eligibility, EventGuard};
use crate::infrastructure::ports::{ConfirmPort, ConfirmPrompt, ItemRepo};

pub const CONFIRM_TITLE: &str = "Items with Spells";
pub const CONFIRM_CONTENT: &str = "Also delete the spells granted by this item?";

/// Options passed along with a deletion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteOptions {
    /// Pre-supplied answer; skips the confirmation prompt when set
    #[serde(default)]
    pub also_delete_child_spells: Option<bool>,
}

impl DeleteOptions {
    pub fn also_delete(decision: bool) -> Self {
        Self {
            also_delete_child_spells: Some(decision),
        }
    }
}

/// Cascade item spells use case.
pub struct CascadeItemSpells {
    item_repo: Arc<dyn ItemRepo>,
    confirm: Arc<dyn ConfirmPort>,
    guard: Arc<EventGuard>,
}

impl CascadeItemSpells {
    pub fn new(
        item_repo: Arc<dyn ItemRepo>,
        confirm: Arc<dyn ConfirmPort>,
        guard: Arc<EventGuard>,
    ) -> Self {
        Self {
            item_repo,
            confirm,
            guard,
        }
    }

    /// Handle the deletion of `item` (the item as it was before removal).
    #[instrument(skip(self, item), fields(item_id = %item.id))]
    pub async fn execute(
        &self,
        item: &Item,
        options: DeleteOptions,
        acting_user: &UserId,
    ) -> Result<DeleteOutcome, ItemSpellsError> {
        let character = match self.guard.check(item, acting_user, false).await? {
            Eligibility::Eligible(character) => character,
            Eligibility::Skip(reason) => {
                tracing::debug!(reason = %reason, "Item deletion ignored");
                return Ok(DeleteOutcome::Skipped(reason));
            }
        };

        if item.flags.item_spells.is_empty() {
            return Ok(DeleteOutcome::Skipped(SkipReason::NoInstances));
        }

        // The reference list is a hint only: scan live items for back-references
        let linked: Vec<ItemId> = self
            .item_repo
            .list_for_character(character.id)
            .await?
            .into_iter()
            .filter(|i| i.is_linked_to(item))
            .map(|i| i.id)
            .collect();

        if linked.is_empty() {
            return Ok(DeleteOutcome::Skipped(SkipReason::NoLinkedSpells));
        }

        let also_delete = match options.also_delete_child_spells {
            Some(decision) => decision,
            None => {
                self.confirm
                    .confirm(&ConfirmPrompt::new(CONFIRM_TITLE, CONFIRM_CONTENT))
                    .await
            }
        };

        if !also_delete {
            tracing::info!(
                item_id = %item.id,
                orphaned = linked.len(),
                "Granted spells kept after item deletion"
            );
            return Ok(DeleteOutcome::Declined { orphaned: linked });
        }

        let deleted = self
            .item_repo
            .delete_embedded(character.id, linked)
            .await?;

        tracing::info!(
            item_id = %item.id,
            character_id = %character.id,
            deleted = deleted.len(),
            "Granted spells deleted with their item"
        );

        Ok(DeleteOutcome::Deleted(deleted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::{
        MockCharacterRepo, MockConfirmPort, MockItemRepo, RepoError,
    };
    use crate::infrastructure::settings::ModuleSettings;
    use itemspells_domain::{Character, CharacterKind, ItemType, ParentRef};

    fn user() -> UserId {
        UserId::new("gm").unwrap()
    }

    fn guard_for(character: Character) -> Arc<EventGuard> {
        let mut characters = MockCharacterRepo::new();
        characters
            .expect_get()
            .returning(move |_| Ok(Some(character.clone())));
        Arc::new(EventGuard::new(
            Arc::new(characters),
            Arc::new(ModuleSettings::default()),
            user(),
        ))
    }

    struct Fixture {
        character: Character,
        wand: Item,
        by_id: Item,
        by_uuid: Item,
        unrelated: Item,
    }

    fn fixture() -> Fixture {
        let character = Character::new("Ayla", CharacterKind::Character);
        let mut wand = Item::new("Wand", ItemType::Equipment).with_owner(character.id);

        let mut by_id = Item::new("Fireball", ItemType::Spell).with_owner(character.id);
        by_id.flags.parent_item = Some(ParentRef::for_item(&wand));

        // Created under the older scheme: back-reference holds the uuid
        let mut by_uuid = Item::new("Lightning Bolt", ItemType::Spell).with_owner(character.id);
        by_uuid.flags.parent_item = Some(ParentRef::new(wand.uuid()));

        let unrelated = Item::new("Magic Missile", ItemType::Spell).with_owner(character.id);

        wand.flags.item_spells = vec![by_id.instance_ref()];

        Fixture {
            character,
            wand,
            by_id,
            by_uuid,
            unrelated,
        }
    }

    fn items_listing(f: &Fixture) -> MockItemRepo {
        let listing = vec![f.by_id.clone(), f.by_uuid.clone(), f.unrelated.clone()];
        let mut items = MockItemRepo::new();
        items
            .expect_list_for_character()
            .returning(move |_| Ok(listing.clone()));
        items
    }

    #[tokio::test]
    async fn presupplied_decision_deletes_without_prompting() {
        let f = fixture();
        let expected = vec![f.by_id.id, f.by_uuid.id];
        let owner = f.character.id;

        let mut items = items_listing(&f);
        let want = expected.clone();
        items
            .expect_delete_embedded()
            .withf(move |c, ids| *c == owner && *ids == want)
            .returning(|_, ids| Ok(ids));

        let mut confirm = MockConfirmPort::new();
        confirm.expect_confirm().never();

        let use_case = CascadeItemSpells::new(
            Arc::new(items),
            Arc::new(confirm),
            guard_for(f.character.clone()),
        );

        let outcome = use_case
            .execute(&f.wand, DeleteOptions::also_delete(true), &user())
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Deleted(expected));
    }

    #[tokio::test]
    async fn prompt_decides_when_no_option_given() {
        let f = fixture();
        let mut items = items_listing(&f);
        items.expect_delete_embedded().returning(|_, ids| Ok(ids));

        let mut confirm = MockConfirmPort::new();
        confirm
            .expect_confirm()
            .withf(|p| p.title == CONFIRM_TITLE)
            .times(1)
            .returning(|_| true);

        let use_case = CascadeItemSpells::new(
            Arc::new(items),
            Arc::new(confirm),
            guard_for(f.character.clone()),
        );

        let outcome = use_case
            .execute(&f.wand, DeleteOptions::default(), &user())
            .await
            .unwrap();
        assert!(matches!(outcome, DeleteOutcome::Deleted(ids) if ids.len() == 2));
    }

    #[tokio::test]
    async fn declining_leaves_spells_orphaned() {
        let f = fixture();
        let mut items = items_listing(&f);
        items.expect_delete_embedded().never();

        let mut confirm = MockConfirmPort::new();
        confirm.expect_confirm().returning(|_| false);

        let use_case = CascadeItemSpells::new(
            Arc::new(items),
            Arc::new(confirm),
            guard_for(f.character.clone()),
        );

        let outcome = use_case
            .execute(&f.wand, DeleteOptions::default(), &user())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome::Declined {
                orphaned: vec![f.by_id.id, f.by_uuid.id]
            }
        );
    }

    #[tokio::test]
    async fn presupplied_decline_keeps_spells_without_prompting() {
        let f = fixture();
        let mut items = items_listing(&f);
        items.expect_delete_embedded().never();

        let mut confirm = MockConfirmPort::new();
        confirm.expect_confirm().never();

        let use_case = CascadeItemSpells::new(
            Arc::new(items),
            Arc::new(confirm),
            guard_for(f.character.clone()),
        );

        let outcome = use_case
            .execute(&f.wand, DeleteOptions::also_delete(false), &user())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome::Declined {
                orphaned: vec![f.by_id.id, f.by_uuid.id]
            }
        );
    }

    #[tokio::test]
    async fn item_without_instances_is_ignored() {
        let f = fixture();
        let mut wand = f.wand.clone();
        wand.flags.item_spells.clear();

        let mut items = MockItemRepo::new();
        items.expect_list_for_character().never();

        let use_case = CascadeItemSpells::new(
            Arc::new(items),
            Arc::new(MockConfirmPort::new()),
            guard_for(f.character.clone()),
        );

        let outcome = use_case
            .execute(&wand, DeleteOptions::default(), &user())
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Skipped(SkipReason::NoInstances));
    }

    #[tokio::test]
    async fn stale_refs_without_live_links_are_ignored() {
        let f = fixture();
        let unrelated = f.unrelated.clone();

        let mut items = MockItemRepo::new();
        items
            .expect_list_for_character()
            .returning(move |_| Ok(vec![unrelated.clone()]));

        let mut confirm = MockConfirmPort::new();
        confirm.expect_confirm().never();

        let use_case = CascadeItemSpells::new(
            Arc::new(items),
            Arc::new(confirm),
            guard_for(f.character.clone()),
        );

        let outcome = use_case
            .execute(&f.wand, DeleteOptions::default(), &user())
            .await
            .unwrap();
        assert_eq!(outcome, DeleteOutcome::Skipped(SkipReason::NoLinkedSpells));
    }

    #[tokio::test]
    async fn vehicle_owner_is_excluded() {
        let f = fixture();
        let vehicle = Character::new("Airship", CharacterKind::Vehicle).with_id(f.character.id);

        let use_case = CascadeItemSpells::new(
            Arc::new(MockItemRepo::new()),
            Arc::new(MockConfirmPort::new()),
            guard_for(vehicle),
        );

        let outcome = use_case
            .execute(&f.wand, DeleteOptions::also_delete(true), &user())
            .await
            .unwrap();
        assert_eq!(
            outcome,
            DeleteOutcome::Skipped(SkipReason::ExcludedCharacterKind(CharacterKind::Vehicle))
        );
    }

    #[tokio::test]
    async fn delete_failure_propagates() {
        let f = fixture();
        let mut items = items_listing(&f);
        items
            .expect_delete_embedded()
            .returning(|_, _| Err(RepoError::database("delete_embedded", "locked")));

        let use_case = CascadeItemSpells::new(
            Arc::new(items),
            Arc::new(MockConfirmPort::new()),
            guard_for(f.character.clone()),
        );

        let result = use_case
            .execute(&f.wand, DeleteOptions::also_delete(true), &user())
            .await;
        assert!(matches!(result, Err(ItemSpellsError::Repo(_))));
    }
}
