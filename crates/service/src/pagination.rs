//! Paging and sorting for in-memory listings
//!
//! Sort keys are resolved by name through a per-type [`FieldTable`] built once,
//! then applied as a stable multi-key sort before the sequence is sliced into
//! a [`Page`] envelope.

use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use crate::errors::ServiceError;

/// Validated page coordinates. `page` is zero-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
}

impl PageRequest {
    pub fn new(page: i64, size: i64) -> Result<Self, ServiceError> {
        if size <= 0 {
            return Err(ServiceError::BadRequest(format!("size must be greater than 0, got {size}")));
        }
        if page < 0 {
            return Err(ServiceError::BadRequest(format!("page must not be negative, got {page}")));
        }
        let page = usize::try_from(page).map_err(|_| ServiceError::BadRequest("page out of range".into()))?;
        let size = usize::try_from(size).map_err(|_| ServiceError::BadRequest("size out of range".into()))?;
        Ok(Self { page, size })
    }

    /// Index range `[from, to)` of this page within `total` elements.
    pub fn bounds(&self, total: usize) -> (usize, usize) {
        let from = self.page.saturating_mul(self.size).min(total);
        let to = from.saturating_add(self.size).min(total);
        (from, to)
    }
}

impl Default for PageRequest {
    fn default() -> Self { Self { page: 0, size: 10 } }
}

/// Paging response envelope.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    pub page: usize,
    pub size: usize,
    pub total_elements: usize,
    pub total_pages: usize,
}

/// A comparable projection of one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SortValue {
    Null,
    Int(i64),
    Text(String),
}

impl SortValue {
    /// Order between two non-null values. Text ignores case; ints sort before text.
    fn cmp_present(&self, other: &SortValue) -> Ordering {
        match (self, other) {
            (SortValue::Int(a), SortValue::Int(b)) => a.cmp(b),
            (SortValue::Text(a), SortValue::Text(b)) => cmp_ignore_case(a, b),
            (SortValue::Int(_), SortValue::Text(_)) => Ordering::Less,
            (SortValue::Text(_), SortValue::Int(_)) => Ordering::Greater,
            _ => Ordering::Equal,
        }
    }
}

impl From<u64> for SortValue {
    fn from(v: u64) -> Self { SortValue::Int(i64::try_from(v).unwrap_or(i64::MAX)) }
}

impl From<i64> for SortValue {
    fn from(v: i64) -> Self { SortValue::Int(v) }
}

impl From<&str> for SortValue {
    fn from(v: &str) -> Self { SortValue::Text(v.to_string()) }
}

impl<V: Into<SortValue>> From<Option<V>> for SortValue {
    fn from(v: Option<V>) -> Self { v.map_or(SortValue::Null, Into::into) }
}

fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars().flat_map(char::to_lowercase).cmp(b.chars().flat_map(char::to_lowercase))
}

/// Nulls go last whatever the direction; only present values are reversed.
fn compare_key(a: &SortValue, b: &SortValue, descending: bool) -> Ordering {
    match (a, b) {
        (SortValue::Null, SortValue::Null) => Ordering::Equal,
        (SortValue::Null, _) => Ordering::Greater,
        (_, SortValue::Null) => Ordering::Less,
        _ => {
            let ord = a.cmp_present(b);
            if descending { ord.reverse() } else { ord }
        }
    }
}

pub type Extractor<T> = fn(&T) -> SortValue;

/// Field name to extractor dispatch table for one record type.
pub struct FieldTable<T> {
    fields: HashMap<&'static str, Extractor<T>>,
}

impl<T> FieldTable<T> {
    pub fn new() -> Self { Self { fields: HashMap::new() } }

    pub fn with(mut self, name: &'static str, extract: Extractor<T>) -> Self {
        self.fields.insert(name, extract);
        self
    }

    pub fn get(&self, name: &str) -> Option<Extractor<T>> {
        self.fields.get(name).copied()
    }
}

impl<T> Default for FieldTable<T> {
    fn default() -> Self { Self::new() }
}

/// One sort directive; `-name` on the wire means descending by `name`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub descending: bool,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self { Self { field: field.into(), descending: false } }

    pub fn desc(field: impl Into<String>) -> Self { Self { field: field.into(), descending: true } }

    /// `None` for blank input or a lone `-`.
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let (descending, field) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest.trim()),
            None => (false, raw),
        };
        if field.is_empty() {
            return None;
        }
        Some(Self { field: field.to_string(), descending })
    }

    /// Comma-separated list, e.g. `-name,id`.
    pub fn parse_list(raw: &str) -> Vec<Self> {
        raw.split(',').filter_map(SortKey::parse).collect()
    }
}

/// Stable multi-key sort. Keys missing from `table` are skipped.
pub fn sort_by_keys<T>(items: Vec<T>, keys: &[SortKey], table: &FieldTable<T>) -> Vec<T> {
    let resolved: Vec<(Extractor<T>, bool)> = keys
        .iter()
        .filter_map(|k| table.get(&k.field).map(|f| (f, k.descending)))
        .collect();
    if resolved.is_empty() {
        return items;
    }

    let mut decorated: Vec<(Vec<SortValue>, T)> = items
        .into_iter()
        .map(|item| (resolved.iter().map(|(f, _)| f(&item)).collect(), item))
        .collect();
    decorated.sort_by(|(a, _), (b, _)| {
        resolved
            .iter()
            .zip(a.iter().zip(b.iter()))
            .map(|((_, desc), (va, vb))| compare_key(va, vb, *desc))
            .find(|o| *o != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    });
    decorated.into_iter().map(|(_, item)| item).collect()
}

/// Slice an already ordered sequence into an envelope.
pub fn paginate<T>(items: Vec<T>, req: PageRequest) -> Page<T> {
    let total = items.len();
    let (from, to) = req.bounds(total);
    let content = items.into_iter().skip(from).take(to - from).collect();
    Page {
        content,
        page: req.page,
        size: req.size,
        total_elements: total,
        total_pages: total.div_ceil(req.size),
    }
}

pub fn page_and_sort<T>(items: Vec<T>, req: PageRequest, keys: &[SortKey], table: &FieldTable<T>) -> Page<T> {
    paginate(sort_by_keys(items, keys, table), req)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Row {
        tag: u32,
        name: &'static str,
        rank: Option<u64>,
    }

    fn row(tag: u32, name: &'static str, rank: Option<u64>) -> Row { Row { tag, name, rank } }

    fn table() -> FieldTable<Row> {
        FieldTable::<Row>::new()
            .with("name", |r| r.name.into())
            .with("rank", |r| r.rank.into())
    }

    fn tags(rows: &[Row]) -> Vec<u32> { rows.iter().map(|r| r.tag).collect() }

    #[test]
    fn zero_or_negative_size_and_negative_page_are_rejected() {
        assert!(matches!(PageRequest::new(0, 0), Err(ServiceError::BadRequest(_))));
        assert!(matches!(PageRequest::new(0, -3), Err(ServiceError::BadRequest(_))));
        assert!(matches!(PageRequest::new(-1, 10), Err(ServiceError::BadRequest(_))));
        assert_eq!(PageRequest::new(2, 5).unwrap(), PageRequest { page: 2, size: 5 });
    }

    #[test]
    fn content_length_matches_formula_for_all_pages() {
        let items: Vec<u32> = (0..23).collect();
        for size in 1..=25usize {
            for page in 0..30usize {
                let req = PageRequest { page, size };
                let p = paginate(items.clone(), req);
                let expected = size.min(23usize.saturating_sub(page * size));
                assert_eq!(p.content.len(), expected, "page={page} size={size}");
                assert_eq!(p.total_pages, (23 + size - 1) / size);
                assert_eq!(p.total_elements, 23);
            }
        }
    }

    #[test]
    fn page_past_the_end_is_empty_not_an_error() {
        let p = paginate(vec![1, 2, 3], PageRequest { page: 5, size: 2 });
        assert!(p.content.is_empty());
        assert_eq!(p.page, 5);
        assert_eq!(p.total_pages, 2);
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let p = paginate(Vec::<u8>::new(), PageRequest::default());
        assert_eq!((p.total_elements, p.total_pages), (0, 0));
    }

    #[test]
    fn huge_page_index_does_not_overflow() {
        let p = paginate(vec![1, 2, 3], PageRequest { page: usize::MAX, size: usize::MAX });
        assert!(p.content.is_empty());
        assert_eq!(p.total_pages, 1);
    }

    #[test]
    fn text_sort_ignores_case() {
        let rows = vec![row(1, "banana", None), row(2, "Apple", None), row(3, "cherry", None)];
        let sorted = sort_by_keys(rows, &[SortKey::asc("name")], &table());
        assert_eq!(tags(&sorted), vec![2, 1, 3]);
    }

    #[test]
    fn sort_is_stable_for_equal_keys() {
        let rows = vec![
            row(1, "b", None),
            row(2, "A", None),
            row(3, "a", None),
            row(4, "B", None),
            row(5, "a", None),
        ];
        let sorted = sort_by_keys(rows.clone(), &[SortKey::asc("name")], &table());
        assert_eq!(tags(&sorted), vec![2, 3, 5, 1, 4]);
        let sorted = sort_by_keys(rows, &[SortKey::desc("name")], &table());
        assert_eq!(tags(&sorted), vec![1, 4, 2, 3, 5]);
    }

    #[test]
    fn later_keys_break_ties() {
        let rows = vec![row(1, "x", Some(2)), row(2, "y", Some(1)), row(3, "x", Some(1))];
        let keys = SortKey::parse_list("name,-rank");
        let sorted = sort_by_keys(rows, &keys, &table());
        assert_eq!(tags(&sorted), vec![1, 3, 2]);
    }

    #[test]
    fn nulls_sort_last_in_both_directions() {
        let rows = vec![row(1, "a", None), row(2, "b", Some(5)), row(3, "c", Some(9))];
        let asc = sort_by_keys(rows.clone(), &[SortKey::asc("rank")], &table());
        assert_eq!(tags(&asc), vec![2, 3, 1]);
        let desc = sort_by_keys(rows, &[SortKey::desc("rank")], &table());
        assert_eq!(tags(&desc), vec![3, 2, 1]);
    }

    #[test]
    fn unknown_keys_are_no_ops() {
        let rows = vec![row(1, "b", None), row(2, "a", None)];
        let sorted = sort_by_keys(rows.clone(), &[SortKey::asc("nope")], &table());
        assert_eq!(tags(&sorted), vec![1, 2]);
        let sorted = sort_by_keys(rows, &SortKey::parse_list("nope,name"), &table());
        assert_eq!(tags(&sorted), vec![2, 1]);
    }

    #[test]
    fn parse_list_handles_prefixes_and_blanks() {
        assert_eq!(
            SortKey::parse_list(" -name , ,id,-"),
            vec![SortKey::desc("name"), SortKey::asc("id")]
        );
        assert!(SortKey::parse_list("").is_empty());
    }

    #[test]
    fn page_and_sort_sorts_before_slicing() {
        let rows = vec![row(1, "d", None), row(2, "c", None), row(3, "b", None), row(4, "a", None)];
        let p = page_and_sort(rows, PageRequest { page: 1, size: 2 }, &[SortKey::asc("name")], &table());
        assert_eq!(tags(&p.content), vec![2, 1]);
        assert_eq!(p.total_pages, 2);
    }

    #[test]
    fn envelope_serializes_camel_case() {
        let p = paginate(vec![1], PageRequest::default());
        let v = serde_json::to_value(&p).unwrap();
        assert_eq!(v["totalElements"], 1);
        assert_eq!(v["totalPages"], 1);
        assert_eq!(v["content"][0], 1);
    }
}
