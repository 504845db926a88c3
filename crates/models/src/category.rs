use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::FieldErrors;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: u64,
    pub name: String,
    pub description: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: String,
    pub description: String,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self { name: Some(name.into()), description: Some(description.into()) }
    }

    pub fn validate(self) -> Result<CategoryFields, ModelError> {
        let mut errs = FieldErrors::new();
        let name = errs.text(
            "name",
            self.name,
            100,
            "Category name is required",
            "Category name must be under 100 characters",
        );
        let description = errs.text(
            "description",
            self.description,
            255,
            "Description is required",
            "Description must be under 255 characters",
        );
        match (name, description) {
            (Some(name), Some(description)) if errs.is_empty() => Ok(CategoryFields { name, description }),
            _ => Err(ModelError::Validation(errs)),
        }
    }
}

impl Category {
    pub fn from_fields(id: u64, fields: CategoryFields) -> Self {
        Self { id, name: fields.name, description: fields.description }
    }
}
