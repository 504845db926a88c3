use std::sync::Arc;

use models::{Resource, ResourceInput};
use once_cell::sync::Lazy;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::filter::{contains_ignore_case, eq_ignore_case, Filters};
use crate::integrity::IntegrityCoordinator;
use crate::pagination::{page_and_sort, FieldTable, Page};
use crate::services::ListQuery;
use crate::storage::entity_store::EntityStore;

// Dotted names reach into the embedded snapshots.
static RESOURCE_FIELDS: Lazy<FieldTable<Resource>> = Lazy::new(|| {
    FieldTable::<Resource>::new()
        .with("id", |r| r.id.into())
        .with("name", |r| r.name.as_str().into())
        .with("description", |r| r.description.as_str().into())
        .with("locationId", |r| r.location.id.into())
        .with("categoryId", |r| r.category.id.into())
        .with("location.building", |r| r.location.building.as_str().into())
        .with("location.room", |r| r.location.room.as_str().into())
        .with("category.name", |r| r.category.name.as_str().into())
});

#[derive(Clone)]
pub struct ResourceService {
    store: Arc<EntityStore<Resource>>,
    integrity: Arc<IntegrityCoordinator>,
}

impl ResourceService {
    pub fn new(store: Arc<EntityStore<Resource>>, integrity: Arc<IntegrityCoordinator>) -> Self {
        Self { store, integrity }
    }

    /// Embeds the referenced location and category as they are right now.
    #[instrument(skip(self, input))]
    pub fn create(&self, input: ResourceInput) -> Result<Resource, ServiceError> {
        let fields = input.validate()?;
        let (location_id, category_id) = (fields.location_id, fields.category_id);
        let created = self.integrity.with_references(location_id, category_id, |location, category| {
            Ok(self.store.create(|id| Resource::from_fields(id, fields, location, category)))
        })?;
        info!(id = created.id, location_id, category_id, "resource created");
        Ok(created)
    }

    /// `q` matches the name; `category` matches the embedded category name exactly, ignoring case.
    pub fn find_all(&self, query: &ListQuery) -> Result<Page<Resource>, ServiceError> {
        let filters = Filters::new()
            .and_active(query.category.as_deref(), |r: &Resource, c| eq_ignore_case(&r.category.name, c))
            .and_active(query.q.as_deref(), |r: &Resource, q| contains_ignore_case(&r.name, q));
        let items = filters.apply(self.store.list());
        Ok(page_and_sort(items, query.page, &query.sort_keys_or("name"), &RESOURCE_FIELDS))
    }

    pub fn find_by_id(&self, id: u64) -> Result<Resource, ServiceError> {
        self.store.get(id)
    }

    /// Replaces every field and re-takes both snapshots.
    #[instrument(skip(self, input))]
    pub fn update(&self, id: u64, input: ResourceInput) -> Result<Resource, ServiceError> {
        let fields = input.validate()?;
        if !self.store.exists(id) {
            return Err(ServiceError::not_found(self.store.kind(), id));
        }
        let (location_id, category_id) = (fields.location_id, fields.category_id);
        let updated = self.integrity.with_references(location_id, category_id, |location, category| {
            self.store.replace(id, Resource::from_fields(id, fields, location, category))
        })?;
        info!(id, location_id, category_id, "resource updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: u64) -> Result<(), ServiceError> {
        self.store.remove(id)?;
        info!(id, "resource deleted");
        Ok(())
    }

    pub fn count_by_location(&self, location_id: u64) -> usize {
        self.integrity.count_by_location(location_id)
    }

    pub fn count_by_category(&self, category_id: u64) -> usize {
        self.integrity.count_by_category(category_id)
    }
}
