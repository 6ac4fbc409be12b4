//! Open editor surfaces.
//!
//! One record per open item sheet, added on open and removed on close.

use dashmap::DashMap;
use itemspells_domain::{ItemId, SurfaceId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSurface {
    pub surface_id: SurfaceId,
    pub item_id: ItemId,
    /// Set by a mutation so the next render shows the spells tab again
    pub reopen_spells_tab: bool,
}

#[derive(Default)]
pub struct SurfaceRegistry {
    surfaces: DashMap<SurfaceId, OpenSurface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a surface, or re-render an open one.
    ///
    /// Re-rendering returns the record with any pending spells-tab request
    /// and clears that request.
    pub fn open(&self, surface_id: SurfaceId, item_id: ItemId) -> OpenSurface {
        if let Some(mut existing) = self.surfaces.get_mut(&surface_id) {
            let reopen_spells_tab = existing.reopen_spells_tab;
            existing.item_id = item_id;
            existing.reopen_spells_tab = false;
            return OpenSurface {
                surface_id,
                item_id,
                reopen_spells_tab,
            };
        }

        let surface = OpenSurface {
            surface_id,
            item_id,
            reopen_spells_tab: false,
        };
        self.surfaces.insert(surface_id, surface.clone());
        surface
    }

    pub fn close(&self, surface_id: SurfaceId) -> Option<OpenSurface> {
        self.surfaces.remove(&surface_id).map(|(_, s)| s)
    }

    pub fn get(&self, surface_id: SurfaceId) -> Option<OpenSurface> {
        self.surfaces.get(&surface_id).map(|s| s.clone())
    }

    /// Ask the surface to show the spells tab on its next render.
    pub fn request_spells_tab(&self, surface_id: SurfaceId) -> bool {
        match self.surfaces.get_mut(&surface_id) {
            Some(mut surface) => {
                surface.reopen_spells_tab = true;
                true
            }
            None => false,
        }
    }

    /// Ask every surface showing `item_id` to show the spells tab; returns how many.
    pub fn request_spells_tab_for_item(&self, item_id: ItemId) -> usize {
        self.surfaces_for_item(item_id)
            .into_iter()
            .filter(|surface_id| self.request_spells_tab(*surface_id))
            .count()
    }

    /// Surfaces currently showing an item.
    pub fn surfaces_for_item(&self, item_id: ItemId) -> Vec<SurfaceId> {
        self.surfaces
            .iter()
            .filter(|entry| entry.item_id == item_id)
            .map(|entry| *entry.key())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
