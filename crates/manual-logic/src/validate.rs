// crates/manual-logic/src/validate.rs
// ============================================================================
// Module: Reference Validation
// Description: Strict-mode check that every referenced entity is registered.
// Purpose: Reject requirements naming unknown items, categories, regions, or
//          locations at authoring time.
// Dependencies: crate::{catalog, error, logic}
// ============================================================================

//! ## Overview
//! Validation walks the whole tree once per check family and reports the first
//! violation. Item and category references are checked before regions, and
//! regions before locations, so a tree with several problems always reports the
//! same one. Within a family, the left subtree is visited before the right.
//!
//! Builtins without an entity reference (`ItemValue`, yaml settings, custom
//! functions) are never rejected. With `strict` off nothing is checked.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::catalog::ItemEntry;
use crate::catalog::LocationEntry;
use crate::catalog::Lookup;
use crate::error::EntityKind;
use crate::error::UnresolvedReference;
use crate::logic::Logic;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Checks every entity reference in `logic` against the lookup tables.
///
/// # Errors
/// Returns [`UnresolvedReference`] for the first name missing from its table
/// when `strict` is set.
pub fn validate<C, I, L, R>(
    logic: &Logic,
    categories: &C,
    items: &I,
    locations: &L,
    regions: &R,
    strict: bool,
) -> Result<(), UnresolvedReference>
where
    C: Lookup,
    I: Lookup,
    I::Entry: ItemEntry,
    L: Lookup,
    L::Entry: LocationEntry,
    R: Lookup,
{
    if !strict {
        return Ok(());
    }

    let failure = logic
        .find_leaf(&mut |leaf| unresolved_item_or_category(leaf, categories, items))
        .or_else(|| logic.find_leaf(&mut |leaf| unresolved_region(leaf, regions)))
        .or_else(|| logic.find_leaf(&mut |leaf| unresolved_location(leaf, categories, locations)));

    failure.map_or(Ok(()), Err)
}

impl Logic {
    /// Checks this requirement's references; see [`validate`].
    ///
    /// # Errors
    /// Returns [`UnresolvedReference`] for the first unregistered name.
    pub fn validate<C, I, L, R>(
        &self,
        categories: &C,
        items: &I,
        locations: &L,
        regions: &R,
        strict: bool,
    ) -> Result<(), UnresolvedReference>
    where
        C: Lookup,
        I: Lookup,
        I::Entry: ItemEntry,
        L: Lookup,
        L::Entry: LocationEntry,
        R: Lookup,
    {
        validate(self, categories, items, locations, regions, strict)
    }
}

// ============================================================================
// SECTION: Checks
// ============================================================================

/// Item leaves must resolve, and so must every category of the resolved item.
fn unresolved_item_or_category<C, I>(
    leaf: &Logic,
    categories: &C,
    items: &I,
) -> Option<UnresolvedReference>
where
    C: Lookup,
    I: Lookup,
    I::Entry: ItemEntry,
{
    match leaf {
        Logic::Item(name) | Logic::ItemCount(name, _) | Logic::ItemPercent(name, _) => {
            let Some(item) = items.lookup(name) else {
                return Some(UnresolvedReference::new(EntityKind::Item, name.as_str()));
            };
            first_missing_category(item.categories(), categories)
        }
        Logic::Category(name) | Logic::CategoryCount(name, _) | Logic::CategoryPercent(name, _) => {
            (!categories.contains(name))
                .then(|| UnresolvedReference::new(EntityKind::Category, name.as_str()))
        }
        _ => None,
    }
}

/// Region leaves must resolve.
fn unresolved_region<R: Lookup>(leaf: &Logic, regions: &R) -> Option<UnresolvedReference> {
    match leaf {
        Logic::Region(name) if !regions.contains(name) => {
            Some(UnresolvedReference::new(EntityKind::Region, name.as_str()))
        }
        _ => None,
    }
}

/// Location leaves must resolve, and so must every category of the location.
fn unresolved_location<C, L>(
    leaf: &Logic,
    categories: &C,
    locations: &L,
) -> Option<UnresolvedReference>
where
    C: Lookup,
    L: Lookup,
    L::Entry: LocationEntry,
{
    let Logic::Location(name) = leaf else {
        return None;
    };
    match locations.lookup(name) {
        None => Some(UnresolvedReference::new(EntityKind::Location, name.as_str())),
        Some(location) => first_missing_category(location.categories(), categories),
    }
}

/// Returns the first listed category missing from the table.
fn first_missing_category<C: Lookup>(
    listed: &[String],
    categories: &C,
) -> Option<UnresolvedReference> {
    listed
        .iter()
        .find(|name| !categories.contains(name))
        .map(|name| UnresolvedReference::new(EntityKind::Category, name.as_str()))
}
