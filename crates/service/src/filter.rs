//! Predicate combinator applied to listings before sorting and paging.

/// Conjunction of predicates over `T`. An empty set matches everything.
pub struct Filters<'a, T> {
    predicates: Vec<Box<dyn Fn(&T) -> bool + 'a>>,
}

impl<'a, T> Filters<'a, T> {
    pub fn new() -> Self { Self { predicates: Vec::new() } }

    pub fn and<P>(mut self, pred: P) -> Self
    where
        P: Fn(&T) -> bool + 'a,
    {
        self.predicates.push(Box::new(pred));
        self
    }

    /// Add a predicate parameterised by `value` only when the value is active
    /// (present and not blank).
    pub fn and_active<P>(self, value: Option<&'a str>, pred: P) -> Self
    where
        P: Fn(&T, &str) -> bool + 'a,
    {
        match active(value) {
            Some(v) => self.and(move |item| pred(item, v)),
            None => self,
        }
    }

    pub fn is_empty(&self) -> bool { self.predicates.is_empty() }

    pub fn matches(&self, item: &T) -> bool {
        self.predicates.iter().all(|p| p(item))
    }

    pub fn apply(&self, items: Vec<T>) -> Vec<T> {
        if self.is_empty() {
            return items;
        }
        items.into_iter().filter(|item| self.matches(item)).collect()
    }
}

impl<T> Default for Filters<'_, T> {
    fn default() -> Self { Self::new() }
}

/// Trimmed value, or `None` when missing or blank.
pub fn active(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

pub fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
