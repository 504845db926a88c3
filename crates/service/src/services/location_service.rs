use std::sync::Arc;

use models::{Location, LocationInput};
use once_cell::sync::Lazy;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::filter::{contains_ignore_case, Filters};
use crate::integrity::IntegrityCoordinator;
use crate::pagination::{page_and_sort, FieldTable, Page};
use crate::services::ListQuery;
use crate::storage::entity_store::EntityStore;

static LOCATION_FIELDS: Lazy<FieldTable<Location>> = Lazy::new(|| {
    FieldTable::<Location>::new()
        .with("id", |l| l.id.into())
        .with("building", |l| l.building.as_str().into())
        .with("room", |l| l.room.as_str().into())
});

#[derive(Clone)]
pub struct LocationService {
    store: Arc<EntityStore<Location>>,
    integrity: Arc<IntegrityCoordinator>,
}

impl LocationService {
    pub fn new(store: Arc<EntityStore<Location>>, integrity: Arc<IntegrityCoordinator>) -> Self {
        Self { store, integrity }
    }

    #[instrument(skip(self, input))]
    pub fn create(&self, input: LocationInput) -> Result<Location, ServiceError> {
        let fields = input.validate()?;
        let created = self.store.create(|id| Location::from_fields(id, fields));
        info!(id = created.id, building = %created.building, "location created");
        Ok(created)
    }

    /// `q` matches building or room.
    pub fn find_all(&self, query: &ListQuery) -> Result<Page<Location>, ServiceError> {
        let filters = Filters::new().and_active(query.q.as_deref(), |l: &Location, q| {
            contains_ignore_case(&l.building, q) || contains_ignore_case(&l.room, q)
        });
        let items = filters.apply(self.store.list());
        Ok(page_and_sort(items, query.page, &query.sort_keys_or("building"), &LOCATION_FIELDS))
    }

    pub fn find_by_id(&self, id: u64) -> Result<Location, ServiceError> {
        self.store.get(id)
    }

    #[instrument(skip(self, input))]
    pub fn update(&self, id: u64, input: LocationInput) -> Result<Location, ServiceError> {
        let fields = input.validate()?;
        let updated = self.store.replace(id, Location::from_fields(id, fields))?;
        info!(id, "location updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: u64) -> Result<(), ServiceError> {
        self.integrity.delete_location(id)?;
        info!(id, "location deleted");
        Ok(())
    }

    pub fn exists(&self, id: u64) -> bool { self.store.exists(id) }
}
