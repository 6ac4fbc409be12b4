//! Helpers for constructing the full application stack over in-memory adapters.

use std::sync::Arc;

use itemspells_domain::{
    Character, CharacterId, CharacterKind, Item, ItemId, ItemType, ItemUses, SpellOverrides,
    SpellTemplate, SpellbookSection, UserId,
};

use crate::app::{App, Ports};
use crate::infrastructure::formula::DeterministicEvaluator;
use crate::infrastructure::in_memory::{InMemoryCompendium, InMemoryItemStore, StaticConfirm};
use crate::infrastructure::ports::ItemRepo;
use crate::infrastructure::settings::ModuleSettings;
use crate::use_cases::item_spells::{
    CreateOutcome, DeleteOptions, DeleteOutcome, ItemLifecycleEvent, LifecycleOutcome,
};

pub const GM: &str = "gamemaster";

/// A fully wired App plus direct handles on its adapters.
pub struct E2ETestContext {
    pub app: App,
    pub store: Arc<InMemoryItemStore>,
    pub compendium: Arc<InMemoryCompendium>,
    pub confirm: Arc<StaticConfirm>,
    pub user: UserId,
    pub character_id: CharacterId,
    pub fireball_uuid: String,
    pub shield_uuid: String,
}

impl E2ETestContext {
    pub async fn setup() -> Self {
        Self::setup_with(ModuleSettings::default(), true).await
    }

    /// `confirm_answer` is what the user answers to every prompt.
    pub async fn setup_with(settings: ModuleSettings, confirm_answer: bool) -> Self {
        let store = Arc::new(InMemoryItemStore::new());
        let compendium = Arc::new(InMemoryCompendium::new());
        let confirm = Arc::new(StaticConfirm::new(confirm_answer));
        let user = UserId::new(GM).unwrap();

        let app = App::new(
            Ports {
                character_repo: store.clone(),
                item_repo: store.clone(),
                spell_source: compendium.clone(),
                confirm: confirm.clone(),
                evaluator: Arc::new(DeterministicEvaluator::new()),
            },
            settings,
            user.clone(),
        );

        let character = Character::new("Ayla", CharacterKind::Character)
            .with_level(5)
            .with_ability("int", 16);
        let character_id = character.id;
        store.insert_character(character).await;

        let fireball_uuid = compendium.insert("dnd5e.spells", spell("Fireball", 3)).await;
        let shield_uuid = compendium.insert("dnd5e.spells", spell("Shield", 1)).await;

        Self {
            app,
            store,
            compendium,
            confirm,
            user,
            character_id,
            fireball_uuid,
            shield_uuid,
        }
    }

    /// World item granting Fireball with three charges.
    pub fn wand(&self) -> Item {
        let mut wand = Item::new("Wand", ItemType::Equipment);
        wand.flags.spell_templates = vec![SpellTemplate::new(self.fireball_uuid.clone())
            .with_overrides(SpellOverrides {
                uses: Some(ItemUses {
                    value: None,
                    max: Some("3".into()),
                    per: None,
                }),
                ..SpellOverrides::default()
            })];
        wand
    }

    /// Put a copy of a world item on the character, as the host would.
    pub async fn give(&self, item: &Item) -> Item {
        let owned = Item::from_data(ItemId::new(), Some(self.character_id), item.to_data());
        self.store.insert_item(owned).await
    }

    /// Put a copy on the character and deliver the creation event.
    pub async fn give_and_notify(&self, item: &Item) -> (Item, CreateOutcome) {
        let owned = self.give(item).await;
        let outcome = self.notify_created(&owned).await;
        let owned = self.item(owned.id).await.unwrap_or(owned);
        (owned, outcome)
    }

    pub async fn notify_created(&self, item: &Item) -> CreateOutcome {
        let outcome = self
            .app
            .use_cases
            .item_spells
            .handle(ItemLifecycleEvent::Created {
                item: item.clone(),
                user: self.user.clone(),
            })
            .await
            .unwrap();
        match outcome {
            LifecycleOutcome::Created(outcome) => outcome,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    /// Remove an item from the store and deliver the deletion event.
    pub async fn delete(&self, item_id: ItemId, options: DeleteOptions) -> DeleteOutcome {
        let item = self.store.remove_item(item_id).await.unwrap();
        let outcome = self
            .app
            .use_cases
            .item_spells
            .handle(ItemLifecycleEvent::Deleted {
                item,
                options,
                user: self.user.clone(),
            })
            .await
            .unwrap();
        match outcome {
            LifecycleOutcome::Deleted(outcome) => outcome,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    pub async fn item(&self, id: ItemId) -> Option<Item> {
        ItemRepo::get(self.store.as_ref(), id).await.unwrap()
    }

    pub async fn character_items(&self) -> Vec<Item> {
        self.store.list_for_character(self.character_id).await.unwrap()
    }

    pub async fn spellbook(&self) -> Vec<SpellbookSection> {
        self.app
            .use_cases
            .spellbook
            .execute(self.character_id)
            .await
            .unwrap()
    }

    /// Add a spell the character knows on their own.
    pub async fn learn(&self, name: &str, level: u8) -> Item {
        let owned = spell(name, level).with_owner(self.character_id);
        self.store.insert_item(owned).await
    }
}

pub fn spell(name: &str, level: u8) -> Item {
    let mut item = Item::new(name, ItemType::Spell);
    item.system.level = Some(level);
    item
}

pub fn labels(sections: &[SpellbookSection]) -> Vec<&str> {
    sections.iter().map(|s| s.label.as_str()).collect()
}

pub fn names(section: &SpellbookSection) -> Vec<&str> {
    section.spells.iter().map(|s| s.name.as_str()).collect()
}
