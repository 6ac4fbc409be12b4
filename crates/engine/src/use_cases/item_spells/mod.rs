//! Item spell use cases.
//!
//! Keeps spells granted by items in step with the items themselves:
//! creating an item on a character materializes its spells, deleting it
//! offers to delete them again.

use std::sync::Arc;

use itemspells_domain::{Item, UserId};

mod create_spells;
mod delete_spells;
mod error;
mod guard;
pub mod overrides;

pub use create_spells::MaterializeItemSpells;
pub use delete_spells::{CascadeItemSpells, DeleteOptions, CONFIRM_CONTENT, CONFIRM_TITLE};
pub use error::{CreateOutcome, DeleteOutcome, DroppedTemplate, ItemSpellsError, SkipReason};
pub use guard::EventGuard;
pub use overrides::{instance_data, resolve_overrides};

/// An item lifecycle notification from the host.
#[derive(Debug, Clone)]
pub enum ItemLifecycleEvent {
    Created {
        item: Item,
        user: UserId,
    },
    /// `item` is the state of the item just before it was removed
    Deleted {
        item: Item,
        options: DeleteOptions,
        user: UserId,
    },
}

/// What handling a lifecycle event did.
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleOutcome {
    Created(CreateOutcome),
    Deleted(DeleteOutcome),
}

/// Container for item spell use cases.
pub struct ItemSpellsUseCases {
    pub materialize: Arc<MaterializeItemSpells>,
    pub cascade: Arc<CascadeItemSpells>,
}

impl ItemSpellsUseCases {
    pub fn new(materialize: Arc<MaterializeItemSpells>, cascade: Arc<CascadeItemSpells>) -> Self {
        Self {
            materialize,
            cascade,
        }
    }

    /// Route a lifecycle event to its handler.
    pub async fn handle(
        &self,
        event: ItemLifecycleEvent,
    ) -> Result<LifecycleOutcome, ItemSpellsError> {
        match event {
            ItemLifecycleEvent::Created { item, user } => self
                .materialize
                .execute(&item, &user)
                .await
                .map(LifecycleOutcome::Created),
            ItemLifecycleEvent::Deleted {
                item,
                options,
                user,
            } => self
                .cascade
                .execute(&item, options, &user)
                .await
                .map(LifecycleOutcome::Deleted),
        }
    }
}
