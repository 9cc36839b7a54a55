//! Sparse id-keyed storage shared by every entity collection.

use std::collections::BTreeMap;

use lane_defence_core::{DefenderId, EnemyId, ProjectileId};

/// Identifier type that can be minted from a registry counter.
pub(crate) trait RegistryKey: Copy + Ord {
    /// Wraps the raw counter value.
    fn from_counter(value: u32) -> Self;
}

impl RegistryKey for DefenderId {
    fn from_counter(value: u32) -> Self {
        DefenderId::new(value)
    }
}

impl RegistryKey for EnemyId {
    fn from_counter(value: u32) -> Self {
        EnemyId::new(value)
    }
}

impl RegistryKey for ProjectileId {
    fn from_counter(value: u32) -> Self {
        ProjectileId::new(value)
    }
}

/// Registry that stores entities and manages identifier allocation.
///
/// Removal deletes the key and leaves a gap. The counter only ever moves
/// forward, so an identifier is never handed out twice within a session.
#[derive(Debug)]
pub(crate) struct Registry<K, T> {
    entries: BTreeMap<K, T>,
    next_id: u32,
}

impl<K: RegistryKey, T> Registry<K, T> {
    /// Creates an empty registry with a reset identifier counter.
    pub(crate) fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            next_id: 0,
        }
    }

    /// Allocates the next identifier and stores the entity built for it.
    pub(crate) fn insert_with(&mut self, build: impl FnOnce(K) -> T) -> K {
        let id = K::from_counter(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        let _ = self.entries.insert(id, build(id));
        id
    }

    pub(crate) fn remove(&mut self, id: K) -> Option<T> {
        self.entries.remove(&id)
    }

    pub(crate) fn get(&self, id: K) -> Option<&T> {
        self.entries.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: K) -> Option<&mut T> {
        self.entries.get_mut(&id)
    }

    /// Captures the live identifiers so callers can mutate the registry mid-pass.
    pub(crate) fn ids(&self) -> Vec<K> {
        self.entries.keys().copied().collect()
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }

    pub(crate) fn values_mut(&mut self) -> impl Iterator<Item = &mut T> {
        self.entries.values_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    /// Number of identifiers handed out so far, removed entries included.
    pub(crate) fn issued(&self) -> u32 {
        self.next_id
    }
}
