// crates/manual-logic/src/catalog.rs
// ============================================================================
// Module: Entity Catalog Interfaces
// Description: Read-only lookup tables consumed by validation and expansion.
// Purpose: Decouple the logic engine from how worlds store their entities.
// Dependencies: crate::logic
// ============================================================================

//! ## Overview
//! The engine never owns entities. It resolves names through a [`Lookup`]
//! table and reads only the few fields it needs through the entry traits
//! below. Standard maps keyed by `String` implement [`Lookup`] directly, so
//! tests and small tools can pass a `BTreeMap` without any adapter.
//!
//! Region graphs may be cyclic; regions refer to each other by name and are
//! resolved through the table at traversal time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::collections::HashMap;
use std::hash::BuildHasher;

use crate::logic::Logic;

// ============================================================================
// SECTION: Lookup
// ============================================================================

/// Name-keyed table of entities.
pub trait Lookup {
    /// Entity stored in the table.
    type Entry;

    /// Returns the entity registered under `name`.
    fn lookup(&self, name: &str) -> Option<&Self::Entry>;

    /// Iterates every entity in the table's own order.
    fn entries(&self) -> impl Iterator<Item = &Self::Entry>;

    /// Returns `true` when `name` is registered.
    fn contains(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }
}

impl<V> Lookup for BTreeMap<String, V> {
    type Entry = V;

    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }

    fn entries(&self) -> impl Iterator<Item = &V> {
        self.values()
    }
}

impl<V, S: BuildHasher> Lookup for HashMap<String, V, S> {
    type Entry = V;

    fn lookup(&self, name: &str) -> Option<&V> {
        self.get(name)
    }

    fn entries(&self) -> impl Iterator<Item = &V> {
        self.values()
    }
}

// ============================================================================
// SECTION: Entry Views
// ============================================================================

/// Fields of an item the validator reads.
pub trait ItemEntry {
    /// Category names the item belongs to.
    fn categories(&self) -> &[String];
}

/// Fields of a location the validator and expander read.
pub trait LocationEntry {
    /// The location's own requirement.
    fn logic(&self) -> Option<&Logic>;

    /// Name of the region the location belongs to.
    fn region(&self) -> Option<&str>;

    /// Category names the location belongs to.
    fn categories(&self) -> &[String];
}

/// Region graph node read by the reachability expander.
///
/// # Invariants
/// - `exit_toward(n)` and `entrance_from(n)` only describe edges listed in
///   [`connects_to`](Self::connects_to); other names yield `None`.
pub trait RegionEntry {
    /// Region name.
    fn name(&self) -> &str;

    /// Requirement to stand in the region at all.
    fn logic(&self) -> Option<&Logic>;

    /// Names of regions reachable directly from this one.
    fn connects_to(&self) -> &[String];

    /// Returns `true` for regions the player may start in.
    fn is_starting(&self) -> bool;

    /// Guard on leaving this region toward `target`.
    fn exit_toward(&self, target: &str) -> Option<&Logic>;

    /// Guard on entering this region from `source`.
    fn entrance_from(&self, source: &str) -> Option<&Logic>;
}
