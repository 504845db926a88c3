use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::errors::ModelError;
use crate::location::Location;
use crate::validation::FieldErrors;

/// A catalogued item. `location` and `category` are copies of the referenced
/// records as they were when the resource was last written.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Resource {
    pub id: u64,
    pub name: String,
    pub description: String,
    pub location: Location,
    pub category: Category,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResourceInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub location_id: Option<u64>,
    #[serde(default)]
    pub category_id: Option<u64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceFields {
    pub name: String,
    pub description: String,
    pub location_id: u64,
    pub category_id: u64,
}

impl ResourceInput {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        location_id: u64,
        category_id: u64,
    ) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            location_id: Some(location_id),
            category_id: Some(category_id),
        }
    }

    pub fn validate(self) -> Result<ResourceFields, ModelError> {
        let mut errs = FieldErrors::new();
        let name = errs.text("name", self.name, 100, "Name is required", "Name must be under 100 characters");
        let description = errs.text(
            "description",
            self.description,
            255,
            "Description is required",
            "Description must be under 255 characters",
        );
        let location_id = errs.id("locationId", self.location_id, "locationId is required");
        let category_id = errs.id("categoryId", self.category_id, "categoryId is required");
        match (name, description, location_id, category_id) {
            (Some(name), Some(description), Some(location_id), Some(category_id)) if errs.is_empty() => {
                Ok(ResourceFields { name, description, location_id, category_id })
            }
            _ => Err(ModelError::Validation(errs)),
        }
    }
}

impl Resource {
    pub fn from_fields(id: u64, fields: ResourceFields, location: Location, category: Category) -> Self {
        Self { id, name: fields.name, description: fields.description, location, category }
    }
}
