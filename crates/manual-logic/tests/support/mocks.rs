// crates/manual-logic/tests/support/mocks.rs
// ============================================================================
// Module: Mock Entities
// Description: Minimal entity tables and diagnostics sinks for logic tests.
// ============================================================================
//! ## Overview
//! Mock item, location, and region entries implementing the catalog views,
//! plus a diagnostics sink that records every expansion event.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    dead_code,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::cell::RefCell;
use std::collections::BTreeMap;

use manual_logic::ExpansionDiagnostics;
use manual_logic::ItemEntry;
use manual_logic::LocationEntry;
use manual_logic::Logic;
use manual_logic::RegionEntry;

// ========================================================================
// Mock Entries
// ========================================================================

/// Name-keyed table used for every entity kind in tests.
pub type Table<T> = BTreeMap<String, T>;

/// Category entry; the engine only checks presence.
#[derive(Debug, Clone, Default)]
pub struct MockCategory;

/// Item entry with its category list.
#[derive(Debug, Clone, Default)]
pub struct MockItem {
    /// Category names the item belongs to.
    pub categories: Vec<String>,
}

impl MockItem {
    /// Creates an item in the given categories.
    pub fn in_categories(categories: &[&str]) -> Self {
        Self {
            categories: categories.iter().map(ToString::to_string).collect(),
        }
    }
}

impl ItemEntry for MockItem {
    fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// Location entry.
#[derive(Debug, Clone, Default)]
pub struct MockLocation {
    /// Own requirement.
    pub logic: Option<Logic>,
    /// Owning region.
    pub region: Option<String>,
    /// Category names.
    pub categories: Vec<String>,
}

impl MockLocation {
    /// Creates a location in `region` with an optional requirement.
    pub fn in_region(region: &str, logic: Option<Logic>) -> Self {
        Self {
            logic,
            region: Some(region.to_string()),
            categories: Vec::new(),
        }
    }
}

impl LocationEntry for MockLocation {
    fn logic(&self) -> Option<&Logic> {
        self.logic.as_ref()
    }

    fn region(&self) -> Option<&str> {
        self.region.as_deref()
    }

    fn categories(&self) -> &[String] {
        &self.categories
    }
}

/// Region graph node with builder-style helpers.
#[derive(Debug, Clone, Default)]
pub struct MockRegion {
    /// Region name.
    pub name: String,
    /// Own requirement.
    pub logic: Option<Logic>,
    /// Outgoing connections.
    pub connects_to: Vec<String>,
    /// Starting flag.
    pub starting: bool,
    /// Exit guards keyed by target.
    pub exits: Vec<(String, Logic)>,
    /// Entrance guards keyed by source.
    pub entrances: Vec<(String, Logic)>,
}

impl MockRegion {
    /// Creates a non-starting region without requirements.
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    /// Marks the region as a starting region.
    #[must_use]
    pub fn starting(mut self) -> Self {
        self.starting = true;
        self
    }

    /// Sets the region's own requirement.
    #[must_use]
    pub fn requires(mut self, logic: Logic) -> Self {
        self.logic = Some(logic);
        self
    }

    /// Adds an unguarded connection.
    #[must_use]
    pub fn connect(mut self, target: &str) -> Self {
        self.connects_to.push(target.to_string());
        self
    }

    /// Adds a connection guarded on the exit side.
    #[must_use]
    pub fn exit(mut self, target: &str, guard: Logic) -> Self {
        self.connects_to.push(target.to_string());
        self.exits.push((target.to_string(), guard));
        self
    }

    /// Adds a guard on entering from `source`.
    #[must_use]
    pub fn entrance(mut self, source: &str, guard: Logic) -> Self {
        self.entrances.push((source.to_string(), guard));
        self
    }
}

impl RegionEntry for MockRegion {
    fn name(&self) -> &str {
        &self.name
    }

    fn logic(&self) -> Option<&Logic> {
        self.logic.as_ref()
    }

    fn connects_to(&self) -> &[String] {
        &self.connects_to
    }

    fn is_starting(&self) -> bool {
        self.starting
    }

    fn exit_toward(&self, target: &str) -> Option<&Logic> {
        self.exits.iter().find(|(name, _)| name == target).map(|(_, logic)| logic)
    }

    fn entrance_from(&self, source: &str) -> Option<&Logic> {
        self.entrances.iter().find(|(name, _)| name == source).map(|(_, logic)| logic)
    }
}

// ========================================================================
// Table Builders
// ========================================================================

/// Builds a category table from names.
pub fn categories(names: &[&str]) -> Table<MockCategory> {
    names.iter().map(|name| ((*name).to_string(), MockCategory)).collect()
}

/// Builds an item table from `(name, categories)` pairs.
pub fn items(entries: &[(&str, &[&str])]) -> Table<MockItem> {
    entries
        .iter()
        .map(|(name, categories)| ((*name).to_string(), MockItem::in_categories(categories)))
        .collect()
}

/// Builds a region table keyed by each region's name.
pub fn regions(entries: Vec<MockRegion>) -> Table<MockRegion> {
    entries.into_iter().map(|region| (region.name.clone(), region)).collect()
}

/// Builds a location table from `(name, location)` pairs.
pub fn locations(entries: Vec<(&str, MockLocation)>) -> Table<MockLocation> {
    entries.into_iter().map(|(name, location)| (name.to_string(), location)).collect()
}

// ========================================================================
// Diagnostics
// ========================================================================

/// Event captured by [`RecordingDiagnostics`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// A region was expanded from `paths` starting regions.
    Expanded {
        /// Region name.
        region: String,
        /// Number of starting regions with a path.
        paths: usize,
    },
    /// No starting region reaches the region.
    Unreachable(String),
}

/// Diagnostics sink that records events in order.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    /// Recorded events.
    events: RefCell<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    /// Returns a copy of the recorded events.
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events.borrow().clone()
    }
}

impl ExpansionDiagnostics for RecordingDiagnostics {
    fn region_expanded(&self, region: &str, paths: usize) {
        self.events.borrow_mut().push(DiagnosticEvent::Expanded {
            region: region.to_string(),
            paths,
        });
    }

    fn unreachable_region(&self, region: &str) {
        self.events.borrow_mut().push(DiagnosticEvent::Unreachable(region.to_string()));
    }
}
