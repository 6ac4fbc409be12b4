//! Item spell synchronization errors and outcomes.

use itemspells_domain::{CharacterKind, Item, ItemId, ItemType};

use crate::infrastructure::ports::RepoError;

/// Errors that can occur while materializing or cascading item spells.
///
/// Only store failures are errors; guard failures and declined prompts are
/// normal outcomes ([`SkipReason`], [`DeleteOutcome::Declined`]).
#[derive(Debug, thiserror::Error)]
pub enum ItemSpellsError {
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}

/// Why a lifecycle event was ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The event was caused by another user; that user's client handles it
    ForeignUser,
    /// The item is not embedded on a character
    Unowned,
    /// The owning character no longer exists
    CharacterMissing,
    /// Groups and vehicles do not cast spells
    ExcludedCharacterKind(CharacterKind),
    /// Items of this type are not enabled in settings
    ItemTypeDisabled(ItemType),
    /// The created item was removed before it could be processed
    ItemMissing,
    NoTemplates,
    NoInstances,
    /// No live item on the character points back at the deleted item
    NoLinkedSpells,
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ForeignUser => write!(f, "event caused by another user"),
            Self::Unowned => write!(f, "item is not owned by a character"),
            Self::CharacterMissing => write!(f, "owning character not found"),
            Self::ExcludedCharacterKind(kind) => write!(f, "character kind '{}' is excluded", kind),
            Self::ItemTypeDisabled(t) => write!(f, "item type '{}' is not enabled", t),
            Self::ItemMissing => write!(f, "item no longer exists"),
            Self::NoTemplates => write!(f, "item has no spell templates"),
            Self::NoInstances => write!(f, "item has no materialized spells"),
            Self::NoLinkedSpells => write!(f, "no spells linked to the item"),
        }
    }
}

/// A template that could not be materialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DroppedTemplate {
    pub source_uuid: String,
    pub reason: String,
}

/// Result of handling an item creation.
#[derive(Debug, Clone, PartialEq)]
pub enum CreateOutcome {
    Materialized {
        /// The parent item with its instance references written
        parent: Item,
        created: Vec<Item>,
        dropped: Vec<DroppedTemplate>,
    },
    Skipped(SkipReason),
}

/// Result of handling an item deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Vec<ItemId>),
    /// The user chose to keep the spells; they are left orphaned
    Declined { orphaned: Vec<ItemId> },
    Skipped(SkipReason),
}
