//! Storage abstractions for service layer
//!
//! In-memory keyed collections, one per entity type. Contents live as long
//! as the process does.

pub mod entity_store;
