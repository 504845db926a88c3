//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from storage.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod catalog;
pub mod errors;
pub mod filter;
pub mod integrity;
pub mod pagination;
pub mod services;
pub mod storage;

pub use catalog::Catalog;
pub use errors::ServiceError;
pub use services::ListQuery;
