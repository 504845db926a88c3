use std::sync::atomic::{AtomicU64, Ordering};

use dashmap::DashMap;

use crate::errors::ServiceError;

/// Generic keyed collection with monotonic id generation.
///
/// Ids start at 1 and are never handed out twice, even after a delete.
/// Each insert/replace/remove is atomic with respect to the others; compound
/// sequences that span stores are serialized by
/// [`IntegrityCoordinator`](crate::integrity::IntegrityCoordinator).
pub struct EntityStore<T> {
    kind: &'static str,
    entries: DashMap<u64, T>,
    next_id: AtomicU64,
}

impl<T: Clone> EntityStore<T> {
    /// `kind` names the entity in error messages, e.g. `Location`.
    pub fn new(kind: &'static str) -> Self {
        Self { kind, entries: DashMap::new(), next_id: AtomicU64::new(0) }
    }

    pub fn kind(&self) -> &'static str { self.kind }

    fn allocate_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Assign a fresh id, build the record with it and store it.
    pub fn create<F>(&self, build: F) -> T
    where
        F: FnOnce(u64) -> T,
    {
        let id = self.allocate_id();
        let value = build(id);
        self.entries.insert(id, value.clone());
        value
    }

    pub fn find(&self, id: u64) -> Option<T> {
        self.entries.get(&id).map(|e| e.value().clone())
    }

    pub fn get(&self, id: u64) -> Result<T, ServiceError> {
        self.find(id).ok_or_else(|| ServiceError::not_found(self.kind, id))
    }

    /// All records in ascending id order.
    pub fn list(&self) -> Vec<T> {
        let mut items: Vec<(u64, T)> =
            self.entries.iter().map(|e| (*e.key(), e.value().clone())).collect();
        items.sort_unstable_by_key(|(id, _)| *id);
        items.into_iter().map(|(_, v)| v).collect()
    }

    /// Swap the record stored under `id`. Never inserts.
    pub fn replace(&self, id: u64, value: T) -> Result<T, ServiceError> {
        match self.entries.get_mut(&id) {
            Some(mut slot) => {
                *slot = value.clone();
                Ok(value)
            }
            None => Err(ServiceError::not_found(self.kind, id)),
        }
    }

    pub fn remove(&self, id: u64) -> Result<T, ServiceError> {
        self.entries
            .remove(&id)
            .map(|(_, v)| v)
            .ok_or_else(|| ServiceError::not_found(self.kind, id))
    }

    pub fn exists(&self, id: u64) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn count_where<P>(&self, pred: P) -> usize
    where
        P: Fn(&T) -> bool,
    {
        self.entries.iter().filter(|e| pred(e.value())).count()
    }

    pub fn len(&self) -> usize { self.entries.len() }

    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: u64,
        label: &'static str,
    }

    #[test]
    fn ids_start_above_zero_and_are_never_reused() {
        let store = EntityStore::new("Item");
        let a = store.create(|id| Item { id, label: "a" });
        let b = store.create(|id| Item { id, label: "b" });
        assert_eq!((a.id, b.id), (1, 2));

        store.remove(b.id).unwrap();
        let c = store.create(|id| Item { id, label: "c" });
        assert_eq!(c.id, 3);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn missing_ids_report_not_found() {
        let store: EntityStore<Item> = EntityStore::new("Item");
        assert!(matches!(store.get(9), Err(ServiceError::NotFound(m)) if m == "Item 9 not found"));
        assert!(store.replace(9, Item { id: 9, label: "x" }).is_err());
        assert!(store.remove(9).is_err());
        assert!(!store.exists(9));
        // replace must not have inserted anything
        assert!(store.is_empty());
    }

    #[test]
    fn replace_swaps_whole_record() {
        let store = EntityStore::new("Item");
        let a = store.create(|id| Item { id, label: "old" });
        store.replace(a.id, Item { id: a.id, label: "new" }).unwrap();
        assert_eq!(store.get(a.id).unwrap().label, "new");
    }

    #[test]
    fn list_is_in_id_order_and_count_where_filters() {
        let store = EntityStore::new("Item");
        for label in ["x", "y", "x", "z"] {
            store.create(|id| Item { id, label });
        }
        let ids: Vec<u64> = store.list().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 4]);
        assert_eq!(store.count_where(|i| i.label == "x"), 2);
    }

    #[test]
    fn concurrent_creates_get_distinct_ids() {
        let store = EntityStore::new("Item");
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for _ in 0..100 {
                        store.create(|id| Item { id, label: "t" });
                    }
                });
            }
        });
        assert_eq!(store.len(), 800);
        let ids: Vec<u64> = store.list().iter().map(|i| i.id).collect();
        assert_eq!(ids, (1..=800).collect::<Vec<_>>());
    }
}
