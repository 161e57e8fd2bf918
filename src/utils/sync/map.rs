//! Concurrent map with per-key mutual exclusion

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parking_lot::Mutex;
use std::hash::Hash;
use std::sync::Arc;

/// One value behind its own lock
type Slot<V> = Arc<Mutex<V>>;

/// Concurrent map where every key owns a slot guarded by its own mutex
///
/// The index (a sharded `DashMap`) is held only long enough to find or
/// create a slot; reads and writes of the value itself lock just that slot.
/// Writers to different keys therefore never wait on each other, while
/// `keys()` and `len()` walk every shard of the index.
#[derive(Debug)]
pub struct ConcurrentMap<K, V>
where
    K: Eq + Hash,
{
    slots: DashMap<K, Slot<V>>,
}

impl<K, V> ConcurrentMap<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Create an empty map
    pub fn new() -> Self {
        Self {
            slots: DashMap::new(),
        }
    }

    fn slot(&self, key: &K) -> Option<Slot<V>> {
        self.slots.get(key).map(|slot| Arc::clone(slot.value()))
    }

    /// Clone of the value stored under `key`
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.slot(key).map(|slot| slot.lock().clone())
    }

    /// Store `value` under `key`, replacing any previous value
    pub fn set(&self, key: K, value: V) {
        if let Some(slot) = self.slot(&key) {
            *slot.lock() = value;
            return;
        }

        match self.slots.entry(key) {
            Entry::Occupied(entry) => {
                let slot = Arc::clone(entry.get());
                drop(entry);
                *slot.lock() = value;
            }
            Entry::Vacant(entry) => {
                entry.insert(Arc::new(Mutex::new(value)));
            }
        }
    }

    /// Read-modify-write one key atomically
    ///
    /// The slot is created with `init` when absent. `f` runs while holding
    /// only this key's lock, so concurrent updates of the same key are
    /// serialized and updates of other keys proceed independently.
    pub fn update<R>(&self, key: K, init: impl FnOnce() -> V, f: impl FnOnce(&mut V) -> R) -> R {
        let slot = match self.slot(&key) {
            Some(slot) => slot,
            None => Arc::clone(
                self.slots
                    .entry(key)
                    .or_insert_with(|| Arc::new(Mutex::new(init())))
                    .value(),
            ),
        };

        let mut value = slot.lock();
        f(&mut value)
    }

    /// Remove `key`, returning whether it was present
    pub fn delete(&self, key: &K) -> bool {
        self.slots.remove(key).is_some()
    }

    /// Whether `key` is present
    pub fn has(&self, key: &K) -> bool {
        self.slots.contains_key(key)
    }

    /// All keys currently present
    pub fn keys(&self) -> Vec<K> {
        self.slots.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the map is empty
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Consistent per-key copies of every entry
    pub fn snapshot(&self) -> Vec<(K, V)>
    where
        V: Clone,
    {
        let slots: Vec<(K, Slot<V>)> = self
            .slots
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();

        slots
            .into_iter()
            .map(|(key, slot)| {
                let value = slot.lock().clone();
                (key, value)
            })
            .collect()
    }
}

impl<K, V> Default for ConcurrentMap<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
