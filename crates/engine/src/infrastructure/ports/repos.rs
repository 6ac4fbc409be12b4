//! Document store port traits.

use async_trait::async_trait;
use itemspells_domain::{Character, CharacterId, FlagKey, Item, ItemData, ItemFlag, ItemId};

use super::error::RepoError;

// =============================================================================
// Characters
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CharacterRepo: Send + Sync {
    async fn get(&self, id: CharacterId) -> Result<Option<Character>, RepoError>;
}

// =============================================================================
// Items (world items and items embedded on characters)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ItemRepo: Send + Sync {
    async fn get(&self, id: ItemId) -> Result<Option<Item>, RepoError>;

    /// Every item currently embedded on a character.
    async fn list_for_character(&self, character_id: CharacterId) -> Result<Vec<Item>, RepoError>;

    /// Create items on a character in one call; returns them in input order.
    async fn create_embedded(
        &self,
        character_id: CharacterId,
        data: Vec<ItemData>,
    ) -> Result<Vec<Item>, RepoError>;

    /// Delete items from a character in one call; returns the ids removed.
    async fn delete_embedded(
        &self,
        character_id: CharacterId,
        ids: Vec<ItemId>,
    ) -> Result<Vec<ItemId>, RepoError>;

    /// Write one metadata key; returns the updated item.
    async fn set_flag(&self, id: ItemId, flag: ItemFlag) -> Result<Item, RepoError>;

    /// Remove one metadata key; returns the updated item.
    async fn unset_flag(&self, id: ItemId, key: FlagKey) -> Result<Item, RepoError>;
}

// =============================================================================
// Source spells (compendium / world directory)
// =============================================================================

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpellSource: Send + Sync {
    /// Resolve a durable reference to the document it points at.
    async fn from_uuid(&self, uuid: &str) -> Result<Option<Item>, RepoError>;
}
