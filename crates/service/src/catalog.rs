use std::sync::Arc;

use models::{Category, Location, Resource};

use crate::integrity::IntegrityCoordinator;
use crate::services::{
    category_service::CategoryService, location_service::LocationService,
    resource_service::ResourceService,
};
use crate::storage::entity_store::EntityStore;

/// Shared context holding every facade.
///
/// Stores are built first, then the coordinator over them, then the facades,
/// each receiving the handles it needs.
#[derive(Clone)]
pub struct Catalog {
    pub locations: LocationService,
    pub categories: CategoryService,
    pub resources: ResourceService,
}

impl Catalog {
    pub fn new() -> Self {
        let locations = Arc::new(EntityStore::<Location>::new("Location"));
        let categories = Arc::new(EntityStore::<Category>::new("Category"));
        let resources = Arc::new(EntityStore::<Resource>::new("Resource"));
        let integrity = Arc::new(IntegrityCoordinator::new(
            Arc::clone(&locations),
            Arc::clone(&categories),
            Arc::clone(&resources),
        ));

        Self {
            locations: LocationService::new(locations, Arc::clone(&integrity)),
            categories: CategoryService::new(categories, Arc::clone(&integrity)),
            resources: ResourceService::new(resources, integrity),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self { Self::new() }
}
