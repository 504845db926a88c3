use std::sync::Arc;

use models::{Category, CategoryInput};
use once_cell::sync::Lazy;
use tracing::{info, instrument};

use crate::errors::ServiceError;
use crate::filter::{contains_ignore_case, Filters};
use crate::integrity::IntegrityCoordinator;
use crate::pagination::{page_and_sort, FieldTable, Page};
use crate::services::ListQuery;
use crate::storage::entity_store::EntityStore;

static CATEGORY_FIELDS: Lazy<FieldTable<Category>> = Lazy::new(|| {
    FieldTable::<Category>::new()
        .with("id", |c| c.id.into())
        .with("name", |c| c.name.as_str().into())
        .with("description", |c| c.description.as_str().into())
});

#[derive(Clone)]
pub struct CategoryService {
    store: Arc<EntityStore<Category>>,
    integrity: Arc<IntegrityCoordinator>,
}

impl CategoryService {
    pub fn new(store: Arc<EntityStore<Category>>, integrity: Arc<IntegrityCoordinator>) -> Self {
        Self { store, integrity }
    }

    #[instrument(skip(self, input))]
    pub fn create(&self, input: CategoryInput) -> Result<Category, ServiceError> {
        let fields = input.validate()?;
        let created = self.store.create(|id| Category::from_fields(id, fields));
        info!(id = created.id, name = %created.name, "category created");
        Ok(created)
    }

    pub fn find_all(&self, query: &ListQuery) -> Result<Page<Category>, ServiceError> {
        let filters = Filters::new()
            .and_active(query.q.as_deref(), |c: &Category, q| contains_ignore_case(&c.name, q));
        let items = filters.apply(self.store.list());
        Ok(page_and_sort(items, query.page, &query.sort_keys_or("name"), &CATEGORY_FIELDS))
    }

    pub fn find_by_id(&self, id: u64) -> Result<Category, ServiceError> {
        self.store.get(id)
    }

    /// Existing resources keep the category snapshot they were written with.
    #[instrument(skip(self, input))]
    pub fn update(&self, id: u64, input: CategoryInput) -> Result<Category, ServiceError> {
        let fields = input.validate()?;
        let updated = self.store.replace(id, Category::from_fields(id, fields))?;
        info!(id, "category updated");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub fn delete(&self, id: u64) -> Result<(), ServiceError> {
        self.integrity.delete_category(id)?;
        info!(id, "category deleted");
        Ok(())
    }

    pub fn exists(&self, id: u64) -> bool { self.store.exists(id) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::pagination::PageRequest;
    use models::{LocationInput, ResourceInput};

    #[test]
    fn listing_sorts_by_name_by_default_and_pages() -> Result<(), ServiceError> {
        let catalog = Catalog::new();
        for name in ["tools", "Books", "maps", "Art"] {
            catalog.categories.create(CategoryInput::new(name, "d"))?;
        }
        let page = catalog.categories.find_all(&ListQuery::new(PageRequest::new(1, 3)?))?;
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.content[0].name, "tools");
        assert_eq!((page.total_elements, page.total_pages), (4, 2));

        let by_id_desc = catalog.categories.find_all(&ListQuery::new(PageRequest::new(0, 2)?).sorted_by("-id"))?;
        let ids: Vec<u64> = by_id_desc.content.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![4, 3]);
        Ok(())
    }

    #[test]
    fn delete_conflict_then_success() -> Result<(), ServiceError> {
        let catalog = Catalog::new();
        let loc = catalog.locations.create(LocationInput::new("Library", "101"))?;
        let cat = catalog.categories.create(CategoryInput::new("Books", "Printed"))?;
        let res = catalog.resources.create(ResourceInput::new("Atlas", "World atlas", loc.id, cat.id))?;

        let err = catalog.categories.delete(cat.id).unwrap_err();
        assert_eq!(err.to_string(), format!("Category {} is in use by 1 resources", cat.id));
        assert!(matches!(err, ServiceError::Conflict(_)));

        catalog.resources.delete(res.id)?;
        catalog.categories.delete(cat.id)?;
        assert!(!catalog.categories.exists(cat.id));
        Ok(())
    }

    #[test]
    fn update_leaves_resource_snapshots_untouched() -> Result<(), ServiceError> {
        let catalog = Catalog::new();
        let loc = catalog.locations.create(LocationInput::new("Library", "101"))?;
        let cat = catalog.categories.create(CategoryInput::new("Books", "Printed"))?;
        let res = catalog.resources.create(ResourceInput::new("Atlas", "World atlas", loc.id, cat.id))?;

        catalog.categories.update(cat.id, CategoryInput::new("Media", "Anything"))?;

        let stored = catalog.resources.find_by_id(res.id)?;
        assert_eq!(stored.category.name, "Books");
        assert_eq!(stored.category.description, "Printed");
        assert_eq!(catalog.categories.find_by_id(cat.id)?.name, "Media");
        Ok(())
    }
}
