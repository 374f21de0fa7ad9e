// crates/manual-world/src/registry.rs
// ============================================================================
// Module: Entity Registry
// Description: Insertion-ordered, name-indexed storage for world entities.
// Purpose: Back the logic engine's lookup interface with stable ordering.
// Dependencies: manual-logic
// ============================================================================

//! ## Overview
//! A [`Registry`] keeps entities in registration order, which is the order
//! they appear in generated documents, and indexes them by name for the
//! validator and expander. Entries are never replaced or removed.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;

use manual_logic::Lookup;

// ============================================================================
// SECTION: Named
// ============================================================================

/// Entity addressed by a unique name.
pub trait Named {
    /// The entity's name.
    fn name(&self) -> &str;
}

// ============================================================================
// SECTION: Registry
// ============================================================================

/// Name-indexed entity table in registration order.
///
/// # Invariants
/// - `index[name] == i` iff `entries[i].name() == name`.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    /// Entities in registration order.
    entries: Vec<T>,
    /// Position of each entity by name.
    index: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Named> Registry<T> {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered entities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entity registered under `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&T> {
        self.index.get(name).and_then(|position| self.entries.get(*position))
    }

    /// Returns `true` when `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Iterates entities in registration order.
    #[must_use]
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.entries.iter()
    }

    /// Stores `entry` unless its name is taken; returns the stored entity.
    pub(crate) fn insert(&mut self, entry: T) -> &T {
        let position = match self.index.get(entry.name()) {
            Some(position) => *position,
            None => {
                let position = self.entries.len();
                self.index.insert(entry.name().to_string(), position);
                self.entries.push(entry);
                position
            }
        };
        &self.entries[position]
    }
}

impl<'a, T> IntoIterator for &'a Registry<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl<T: Named> Lookup for Registry<T> {
    type Entry = T;

    fn lookup(&self, name: &str) -> Option<&T> {
        self.get(name)
    }

    fn entries(&self) -> impl Iterator<Item = &T> {
        self.iter()
    }
}
