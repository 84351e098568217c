//! Per-execution memo of assembled entity objects.
//!
//! The same entity is often reached many times through one query (every
//! character of every film resolves `homeworld`). The cache keys the
//! projected object by `(entity, selection)`, so each pair is assembled once
//! per execution. The repository is immutable, so entries never go stale;
//! the cache is simply dropped when the execution ends.

use std::collections::HashMap;

use holocron_foundation::{EntityId, Value};

/// Cache of projected objects for one execution.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    /// `(entity, selection id) -> projected object`
    entries: HashMap<(EntityId, usize), Value>,
    hits: u64,
    misses: u64,
}

impl ResolutionCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached object, counting the lookup as a hit or miss.
    pub fn get(&mut self, entity: EntityId, selection: usize) -> Option<Value> {
        match self.entries.get(&(entity, selection)) {
            Some(value) => {
                self.hits += 1;
                Some(value.clone())
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Stores an assembled object.
    pub fn insert(&mut self, entity: EntityId, selection: usize, value: Value) {
        self.entries.insert((entity, selection), value);
    }

    /// Number of lookups answered from the cache.
    #[must_use]
    pub const fn hits(&self) -> u64 {
        self.hits
    }

    /// Number of lookups that missed.
    #[must_use]
    pub const fn misses(&self) -> u64 {
        self.misses
    }

    /// Number of cached objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing is cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
