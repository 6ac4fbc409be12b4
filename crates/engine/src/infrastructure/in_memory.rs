//! In-memory adapters.
//!
//! Back the ports with plain maps so the engine can run without a host:
//! used by the demo binary and the scenario tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use itemspells_domain::{Character, CharacterId, FlagKey, Item, ItemData, ItemFlag, ItemId};

use crate::infrastructure::ports::{
    CharacterRepo, ConfirmPort, ConfirmPrompt, ItemRepo, RepoError, SettingValue, SettingsReader,
    SpellSource,
};

// =============================================================================
// Document store
// =============================================================================

#[derive(Default)]
struct ItemTable {
    items: HashMap<ItemId, Item>,
    /// Insertion order, so listings are stable
    order: Vec<ItemId>,
}

impl ItemTable {
    fn insert(&mut self, item: Item) {
        if !self.items.contains_key(&item.id) {
            self.order.push(item.id);
        }
        self.items.insert(item.id, item);
    }

    fn remove(&mut self, id: ItemId) -> Option<Item> {
        let removed = self.items.remove(&id)?;
        self.order.retain(|i| *i != id);
        Some(removed)
    }

    fn iter(&self) -> impl Iterator<Item = &Item> {
        self.order.iter().filter_map(|id| self.items.get(id))
    }
}

/// Characters and items (world-level and embedded) held in memory.
#[derive(Default)]
pub struct InMemoryItemStore {
    characters: RwLock<HashMap<CharacterId, Character>>,
    items: RwLock<ItemTable>,
}

impl InMemoryItemStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_character(&self, character: Character) {
        self.characters
            .write()
            .await
            .insert(character.id, character);
    }

    /// Insert or replace an item as-is (world-level when it has no owner).
    pub async fn insert_item(&self, item: Item) -> Item {
        self.items.write().await.insert(item.clone());
        item
    }

    pub async fn remove_item(&self, id: ItemId) -> Option<Item> {
        self.items.write().await.remove(id)
    }

    pub async fn all_items(&self) -> Vec<Item> {
        self.items.read().await.iter().cloned().collect()
    }
}

#[async_trait]
impl CharacterRepo for InMemoryItemStore {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError> {
        Ok(self.characters.read().await.get(&id).cloned())
    }
}

#[async_trait]
impl ItemRepo for InMemoryItemStore {
    async fn get(&self, id: ItemId) -> Result<Option<Item>, RepoError> {
        Ok(self.items.read().await.items.get(&id).cloned())
    }

    async fn list_for_character(&self, character_id: CharacterId) -> Result<Vec<Item>, RepoError> {
        Ok(self
            .items
            .read()
            .await
            .iter()
            .filter(|i| i.owner == Some(character_id))
            .cloned()
            .collect())
    }

    async fn create_embedded(
        &self,
        character_id: CharacterId,
        data: Vec<ItemData>,
    ) -> Result<Vec<Item>, RepoError> {
        if !self.characters.read().await.contains_key(&character_id) {
            return Err(RepoError::not_found("Character", character_id));
        }

        let mut table = self.items.write().await;
        let created: Vec<Item> = data
            .into_iter()
            .map(|d| Item::from_data(ItemId::new(), Some(character_id), d))
            .collect();
        for item in &created {
            table.insert(item.clone());
        }
        Ok(created)
    }

    async fn delete_embedded(
        &self,
        character_id: CharacterId,
        ids: Vec<ItemId>,
    ) -> Result<Vec<ItemId>, RepoError> {
        let mut table = self.items.write().await;
        let mut deleted = Vec::with_capacity(ids.len());
        for id in ids {
            let owned_here = table
                .items
                .get(&id)
                .is_some_and(|i| i.owner == Some(character_id));
            if owned_here && table.remove(id).is_some() {
                deleted.push(id);
            }
        }
        Ok(deleted)
    }

    async fn set_flag(&self, id: ItemId, flag: ItemFlag) -> Result<Item, RepoError> {
        let mut table = self.items.write().await;
        let item = table
            .items
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Item", id))?;
        item.flags.set(flag);
        Ok(item.clone())
    }

    async fn unset_flag(&self, id: ItemId, key: FlagKey) -> Result<Item, RepoError> {
        let mut table = self.items.write().await;
        let item = table
            .items
            .get_mut(&id)
            .ok_or_else(|| RepoError::not_found("Item", id))?;
        item.flags.unset(key);
        Ok(item.clone())
    }
}

// =============================================================================
// Compendium
// =============================================================================

/// Source spells keyed by durable reference.
#[derive(Default)]
pub struct InMemoryCompendium {
    entries: RwLock<HashMap<String, Item>>,
}

impl InMemoryCompendium {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an entry to a pack; returns its durable reference
    /// (`Compendium.<pack>.Item.<id>`).
    pub async fn insert(&self, pack: &str, item: Item) -> String {
        let uuid = format!("Compendium.{}.Item.{}", pack, item.id);
        self.entries.write().await.insert(uuid.clone(), item);
        uuid
    }
}

#[async_trait]
impl SpellSource for InMemoryCompendium {
    async fn from_uuid(&self, uuid: &str) -> Result<Option<Item>, RepoError> {
        Ok(self.entries.read().await.get(uuid).cloned())
    }
}

// =============================================================================
// Confirmation
// =============================================================================

/// Answers every prompt the same way and counts how often it was asked.
pub struct StaticConfirm {
    answer: bool,
    asked: AtomicUsize,
}

impl StaticConfirm {
    pub fn new(answer: bool) -> Self {
        Self {
            answer,
            asked: AtomicUsize::new(0),
        }
    }

    pub fn times_asked(&self) -> usize {
        self.asked.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ConfirmPort for StaticConfirm {
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        tracing::debug!(title = %prompt.title, answer = self.answer, "Confirmation prompt answered");
        self.answer
    }
}

// =============================================================================
// Settings
// =============================================================================

/// Key/value settings held in a map.
#[derive(Debug, Clone, Default)]
pub struct MapSettingsReader {
    values: HashMap<String, SettingValue>,
}

impl MapSettingsReader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: SettingValue) -> Self {
        self.values.insert(key.into(), value);
        self
    }
}

impl SettingsReader for MapSettingsReader {
    fn get(&self, key: &str) -> Option<SettingValue> {
        self.values.get(key).cloned()
    }
}
