use crate::domain::{BuildError, BuildResult};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct Registered<T> {
    /// 1-based insertion position within the owning registry.
    pub order: usize,
    pub record: T,
}

/// Keyed record store that remembers insertion order.
///
/// Lookups go through a hash map; [`Registry::ordered`] sorts by the stored
/// order so callers never depend on map iteration order.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    name: &'static str,
    entries: HashMap<String, Registered<T>>,
    inserted: usize,
}

impl<T> Registry<T> {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            entries: HashMap::new(),
            inserted: 0,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key).map(|entry| &entry.record)
    }

    pub fn order_of(&self, key: &str) -> Option<usize> {
        self.entries.get(key).map(|entry| entry.order)
    }

    /// Fails if `key` is taken.
    pub fn ensure_vacant(&self, key: &str) -> BuildResult<()> {
        if self.entries.contains_key(key) {
            return Err(BuildError::DuplicateKey {
                registry: self.name,
                key: key.to_string(),
            });
        }
        Ok(())
    }

    pub fn insert(&mut self, key: impl Into<String>, record: T) -> BuildResult<&T> {
        let key = key.into();
        self.ensure_vacant(&key)?;
        self.inserted += 1;
        let entry = self.entries.entry(key).or_insert(Registered {
            order: self.inserted,
            record,
        });
        Ok(&entry.record)
    }

    /// Entries sorted by insertion order.
    pub fn ordered(&self) -> Vec<(&str, &T)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.order, key.as_str(), &entry.record))
            .collect();
        entries.sort_by_key(|(order, _, _)| *order);
        entries
            .into_iter()
            .map(|(_, key, record)| (key, record))
            .collect()
    }

    pub fn records(&self) -> impl Iterator<Item = &T> {
        self.entries.values().map(|entry| &entry.record)
    }
}
