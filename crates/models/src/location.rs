use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validation::FieldErrors;

/// A place where resources are kept.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: u64,
    pub building: String,
    pub room: String,
}

/// Request body for both create and update.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LocationInput {
    #[serde(default)]
    pub building: Option<String>,
    #[serde(default)]
    pub room: Option<String>,
}

/// Checked field set, ready to be stored under an id.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LocationFields {
    pub building: String,
    pub room: String,
}

impl LocationInput {
    pub fn new(building: impl Into<String>, room: impl Into<String>) -> Self {
        Self { building: Some(building.into()), room: Some(room.into()) }
    }

    pub fn validate(self) -> Result<LocationFields, ModelError> {
        let mut errs = FieldErrors::new();
        let building = errs.text(
            "building",
            self.building,
            100,
            "Building name is required",
            "Building name must be under 100 characters",
        );
        let room = errs.text("room", self.room, 50, "Room is required", "Room must be under 50 characters");
        match (building, room) {
            (Some(building), Some(room)) if errs.is_empty() => Ok(LocationFields { building, room }),
            _ => Err(ModelError::Validation(errs)),
        }
    }
}

impl Location {
    pub fn from_fields(id: u64, fields: LocationFields) -> Self {
        Self { id, building: fields.building, room: fields.room }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_input_yields_fields() {
        let fields = LocationInput::new("Library", "101").validate().unwrap();
        let loc = Location::from_fields(3, fields);
        assert_eq!(loc, Location { id: 3, building: "Library".into(), room: "101".into() });
    }

    #[test]
    fn every_bad_field_is_reported() {
        let input = LocationInput { building: Some(" ".into()), room: Some("x".repeat(51)) };
        let err = input.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "building: Building name is required, room: Room must be under 50 characters"
        );
    }

    #[test]
    fn missing_json_fields_deserialize_as_none() {
        let input: LocationInput = serde_json::from_str(r#"{"building":"Hall"}"#).unwrap();
        assert_eq!(input.room, None);
        assert!(input.validate().is_err());
    }
}
