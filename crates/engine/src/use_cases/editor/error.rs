//! Override editor errors.

use itemspells_domain::{DomainError, ItemId, ItemType, SurfaceId};

use crate::infrastructure::ports::RepoError;

#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("No editor open for surface {0}")]
    SurfaceNotOpen(SurfaceId),
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),
    #[error("Items of type '{0}' cannot grant spells")]
    ItemTypeDisabled(ItemType),
    /// Templates are authored on world items only; owned items carry instances
    #[error("Spell templates cannot be edited on an owned item")]
    OwnedItem,
    #[error("Source spell not found: {0}")]
    SourceNotFound(String),
    #[error("Not a spell: {0}")]
    NotASpell(String),
    #[error("No spell template for {0}")]
    TemplateNotFound(String),
    #[error("Spell {0} is not linked to this item")]
    SpellNotLinked(String),
    #[error("Invalid spell key: {0}")]
    InvalidKey(#[from] DomainError),
    #[error("Repository error: {0}")]
    Repo(#[from] RepoError),
}
