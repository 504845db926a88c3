use serde::Deserialize;
use service::{pagination::PageRequest, Catalog, ListQuery, ServiceError};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Catalog,
    pub default_page_size: u32,
}

impl AppState {
    pub fn new(catalog: Catalog, default_page_size: u32) -> Self {
        Self { catalog, default_page_size }
    }
}

impl Default for AppState {
    fn default() -> Self { Self::new(Catalog::new(), 10) }
}

/// Query string of every list endpoint: `?page&size&sort&q&category`.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub sort: Option<String>,
    pub q: Option<String>,
    pub category: Option<String>,
}

impl ListParams {
    pub fn into_query(self, default_size: u32) -> Result<ListQuery, ServiceError> {
        let page = PageRequest::new(self.page.unwrap_or(0), self.size.unwrap_or(i64::from(default_size)))?;
        let mut query = ListQuery::new(page);
        if let Some(sort) = self.sort.as_deref() {
            query = query.sorted_by(sort);
        }
        query.q = self.q;
        query.category = self.category;
        Ok(query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::pagination::SortKey;

    #[test]
    fn defaults_apply_when_params_are_missing() {
        let q = ListParams::default().into_query(10).unwrap();
        assert_eq!((q.page.page, q.page.size), (0, 10));
        assert!(q.sort.is_empty());
    }

    #[test]
    fn sort_param_is_split_on_commas() {
        let params = ListParams { sort: Some("-name,id".into()), ..Default::default() };
        let q = params.into_query(5).unwrap();
        assert_eq!(q.sort, vec![SortKey::desc("name"), SortKey::asc("id")]);
        assert_eq!(q.page.size, 5);
    }

    #[test]
    fn zero_size_is_a_bad_request() {
        let params = ListParams { size: Some(0), ..Default::default() };
        assert!(matches!(params.into_query(10), Err(ServiceError::BadRequest(_))));
    }
}
