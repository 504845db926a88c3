//! Entity records and request inputs for the catalog.
//! - Records are immutable values; updates replace them wholesale.
//! - Inputs carry their own validation and yield checked field sets.

pub mod errors;
pub mod validation;
pub mod location;
pub mod category;
pub mod resource;

pub use category::{Category, CategoryFields, CategoryInput};
pub use location::{Location, LocationFields, LocationInput};
pub use resource::{Resource, ResourceFields, ResourceInput};
