//! Per-entity facades composing the store, the coordinator and the paging engine.

pub mod category_service;
pub mod location_service;
pub mod resource_service;

use crate::pagination::{PageRequest, SortKey};

/// Listing parameters shared by every facade.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub page: PageRequest,
    /// Empty means the entity's default ordering.
    pub sort: Vec<SortKey>,
    /// Free-text, case-insensitive substring filter.
    pub q: Option<String>,
    /// Category name filter; only resources honour it.
    pub category: Option<String>,
}

impl ListQuery {
    pub fn new(page: PageRequest) -> Self {
        Self { page, ..Self::default() }
    }

    pub fn sorted_by(mut self, raw: &str) -> Self {
        self.sort = SortKey::parse_list(raw);
        self
    }

    pub fn matching(mut self, q: impl Into<String>) -> Self {
        self.q = Some(q.into());
        self
    }

    pub fn in_category(mut self, name: impl Into<String>) -> Self {
        self.category = Some(name.into());
        self
    }

    /// Requested keys, or `fallback` when none were given.
    pub(crate) fn sort_keys_or(&self, fallback: &str) -> Vec<SortKey> {
        if self.sort.is_empty() {
            vec![SortKey::asc(fallback)]
        } else {
            self.sort.clone()
        }
    }
}
