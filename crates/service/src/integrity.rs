//! Cross-store reference checks.
//!
//! A Resource embeds the Location and Category it points at, so those two may
//! only be removed once nothing references them. The gate below makes each
//! "check then write" sequence atomic against the opposite sequence:
//! reference writers share it, guarded deletes take it exclusively.

use std::sync::Arc;

use models::{Category, Location, Resource};
use parking_lot::RwLock;
use tracing::warn;

use crate::errors::ServiceError;
use crate::storage::entity_store::EntityStore;

pub struct IntegrityCoordinator {
    locations: Arc<EntityStore<Location>>,
    categories: Arc<EntityStore<Category>>,
    resources: Arc<EntityStore<Resource>>,
    gate: RwLock<()>,
}

impl IntegrityCoordinator {
    pub fn new(
        locations: Arc<EntityStore<Location>>,
        categories: Arc<EntityStore<Category>>,
        resources: Arc<EntityStore<Resource>>,
    ) -> Self {
        Self { locations, categories, resources, gate: RwLock::new(()) }
    }

    /// Resolve both foreign keys, location first, and return the current records.
    pub fn ensure_references(&self, location_id: u64, category_id: u64) -> Result<(Location, Category), ServiceError> {
        let location = self
            .locations
            .find(location_id)
            .ok_or(ServiceError::InvalidReference { field: "locationId", value: location_id })?;
        let category = self
            .categories
            .find(category_id)
            .ok_or(ServiceError::InvalidReference { field: "categoryId", value: category_id })?;
        Ok((location, category))
    }

    /// Run `write` with resolved references while no guarded delete can run.
    pub fn with_references<R, F>(&self, location_id: u64, category_id: u64, write: F) -> Result<R, ServiceError>
    where
        F: FnOnce(Location, Category) -> Result<R, ServiceError>,
    {
        let _shared = self.gate.read();
        let (location, category) = self.ensure_references(location_id, category_id)?;
        write(location, category)
    }

    pub fn count_by_location(&self, location_id: u64) -> usize {
        self.resources.count_where(|r| r.location.id == location_id)
    }

    pub fn count_by_category(&self, category_id: u64) -> usize {
        self.resources.count_where(|r| r.category.id == category_id)
    }

    pub fn delete_location(&self, id: u64) -> Result<Location, ServiceError> {
        self.guarded_delete(&self.locations, id, |id| self.count_by_location(id))
    }

    pub fn delete_category(&self, id: u64) -> Result<Category, ServiceError> {
        self.guarded_delete(&self.categories, id, |id| self.count_by_category(id))
    }

    fn guarded_delete<T, C>(&self, store: &EntityStore<T>, id: u64, count: C) -> Result<T, ServiceError>
    where
        T: Clone,
        C: Fn(u64) -> usize,
    {
        let _exclusive = self.gate.write();
        if !store.exists(id) {
            return Err(ServiceError::not_found(store.kind(), id));
        }
        let blocking = count(id);
        if blocking > 0 {
            warn!(entity = store.kind(), id, blocking, "delete blocked by referencing resources");
            return Err(ServiceError::in_use(store.kind(), id, blocking));
        }
        store.remove(id)
    }
}
