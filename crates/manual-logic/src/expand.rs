// crates/manual-logic/src/expand.rs
// ============================================================================
// Module: Reachability Expansion
// Description: Inline "can reach region/location" leaves as concrete logic.
// Purpose: Rewrite reachability leaves into the boolean condition that makes
//          them true, computed over the region connection graph.
// Dependencies: crate::{catalog, combine, diagnostics, logic}
// ============================================================================

//! ## Overview
//! [`expand`] returns `None` when nothing in the tree was rewritten, meaning
//! "keep the original node". A region that expands to no requirement also
//! yields `None`; the leaf then stays as a plain reachability check.
//!
//! Region reachability is the OR over every starting region `S` of a
//! depth-first search from `S` toward the target:
//! - the target contributes its own requirement;
//! - each step `C -> N` contributes `C`'s exit guard toward `N` and `N`'s
//!   entrance guard from `C`;
//! - a region already explored from the same starting region is a dead end,
//!   and the other starting regions are marked visited up front.
//!
//! Intermediate regions' own requirements are not part of a path. A starting
//! target expands to its own requirement without a search.
//!
//! The [`Expander`] memoizes region results for its own lifetime; results
//! never outlive it.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::collections::HashSet;

use crate::catalog::LocationEntry;
use crate::catalog::Lookup;
use crate::catalog::RegionEntry;
use crate::combine::Junction;
use crate::combine::and;
use crate::combine::combine;
use crate::combine::or;
use crate::diagnostics::ExpansionDiagnostics;
use crate::diagnostics::TracingDiagnostics;
use crate::logic::Logic;

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Expands every reachability leaf in `logic`, logging through `tracing`.
#[must_use]
pub fn expand<L, R>(logic: &Logic, locations: &L, regions: &R) -> Option<Logic>
where
    L: Lookup,
    L::Entry: LocationEntry,
    R: Lookup,
    R::Entry: RegionEntry,
{
    expand_with(logic, locations, regions, &TracingDiagnostics)
}

/// Expands every reachability leaf in `logic`, reporting to `diagnostics`.
#[must_use]
pub fn expand_with<L, R, D>(
    logic: &Logic,
    locations: &L,
    regions: &R,
    diagnostics: &D,
) -> Option<Logic>
where
    L: Lookup,
    L::Entry: LocationEntry,
    R: Lookup,
    R::Entry: RegionEntry,
    D: ExpansionDiagnostics + ?Sized,
{
    Expander::new(locations, regions, diagnostics).expand(logic)
}

impl Logic {
    /// Expands this requirement's reachability leaves; see [`expand`].
    #[must_use]
    pub fn expand<L, R>(&self, locations: &L, regions: &R) -> Option<Self>
    where
        L: Lookup,
        L::Entry: LocationEntry,
        R: Lookup,
        R::Entry: RegionEntry,
    {
        expand(self, locations, regions)
    }
}

// ============================================================================
// SECTION: Reachability
// ============================================================================

/// Result of searching for a region.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reach {
    /// No search from any starting region found the target.
    Unreachable,
    /// The target is reachable under the requirement; `None` is unconditional.
    ///
    /// Alternatives are joined with OR, except that an unconditional path
    /// absorbs the others instead of acting as an identity element.
    Reached(Option<Logic>),
}

impl Reach {
    /// Returns the requirement, collapsing an unreachable target to none.
    #[must_use]
    pub fn into_logic(self) -> Option<Logic> {
        match self {
            Self::Unreachable => None,
            Self::Reached(logic) => logic,
        }
    }

    /// Adds an alternative path.
    ///
    /// An unconditional alternative absorbs the whole disjunction: once any
    /// path needs nothing, the result is `Reached(None)` whatever the other
    /// paths require.
    fn or(self, path: Option<Logic>) -> Self {
        match self {
            Self::Unreachable => Self::Reached(path),
            Self::Reached(None) => Self::Reached(None),
            Self::Reached(Some(current)) => match path {
                None => Self::Reached(None),
                Some(path) => Self::Reached(or(Some(current), Some(path))),
            },
        }
    }
}

// ============================================================================
// SECTION: Expander
// ============================================================================

/// Reachability expander over a pair of lookup tables.
pub struct Expander<'a, L, R, D: ?Sized> {
    /// Location table.
    locations: &'a L,
    /// Region table.
    regions: &'a R,
    /// Event sink.
    diagnostics: &'a D,
    /// Region results computed so far.
    memo: HashMap<String, Reach>,
}

impl<'a, L, R, D> Expander<'a, L, R, D>
where
    L: Lookup,
    L::Entry: LocationEntry,
    R: Lookup,
    R::Entry: RegionEntry,
    D: ExpansionDiagnostics + ?Sized,
{
    /// Creates an expander with an empty memo.
    #[must_use]
    pub fn new(locations: &'a L, regions: &'a R, diagnostics: &'a D) -> Self {
        Self {
            locations,
            regions,
            diagnostics,
            memo: HashMap::new(),
        }
    }

    /// Rewrites the reachability leaves of `logic`; `None` keeps it unchanged.
    pub fn expand(&mut self, logic: &Logic) -> Option<Logic> {
        match logic {
            Logic::And(left, right) => self.expand_binary(Junction::And, left, right),
            Logic::Or(left, right) => self.expand_binary(Junction::Or, left, right),
            Logic::OptOne(inner) => self.expand(inner).map(Logic::opt_one),
            Logic::OptAll(inner) => self.expand(inner).map(Logic::opt_all),
            Logic::Region(name) => {
                if !self.regions.contains(name) {
                    return None;
                }
                self.region(name).into_logic()
            }
            Logic::Location(name) => {
                let locations = self.locations;
                let location = locations.lookup(name)?;
                let reach = match location.region() {
                    Some(region) if self.regions.contains(region) => {
                        self.region(region).into_logic()
                    }
                    _ => None,
                };
                and(location.logic().cloned(), reach)
            }
            _ => None,
        }
    }

    /// Expands both children, keeping the original side that did not change.
    fn expand_binary(&mut self, junction: Junction, left: &Logic, right: &Logic) -> Option<Logic> {
        let (left, right) = match (self.expand(left), self.expand(right)) {
            (None, None) => return None,
            (Some(left), None) => (left, right.clone()),
            (None, Some(right)) => (left.clone(), right),
            (Some(left), Some(right)) => (left, right),
        };
        Some(combine(junction, left, right).into_logic())
    }

    /// Returns the reachability of the named region, computing it once.
    pub fn region(&mut self, name: &str) -> Reach {
        if let Some(reach) = self.memo.get(name) {
            return reach.clone();
        }
        let reach = self.search_from_starts(name);
        self.memo.insert(name.to_string(), reach.clone());
        reach
    }

    /// Runs one search per starting region and joins the results.
    fn search_from_starts(&self, target: &str) -> Reach {
        let Some(region) = self.regions.lookup(target) else {
            return Reach::Unreachable;
        };
        if region.is_starting() {
            self.diagnostics.region_expanded(target, 1);
            return Reach::Reached(region.logic().cloned());
        }

        let starts: Vec<&str> = self
            .regions
            .entries()
            .filter(|candidate| candidate.is_starting() && candidate.name() != target)
            .map(RegionEntry::name)
            .collect();

        let mut reach = Reach::Unreachable;
        let mut paths = 0_usize;
        for &start in &starts {
            let mut visited: HashSet<&str> =
                starts.iter().copied().filter(|other| *other != start).collect();
            if let Reach::Reached(path) = self.search(start, target, &mut visited) {
                paths += 1;
                reach = reach.or(path);
            }
        }

        if paths == 0 {
            self.diagnostics.unreachable_region(target);
        } else {
            self.diagnostics.region_expanded(target, paths);
        }
        reach
    }

    /// Depth-first search from `current` toward `target`.
    ///
    /// `visited` lives for the whole search from one starting region, so each
    /// region is explored at most once. The target is never marked, letting
    /// every neighbor that reaches it contribute an alternative.
    fn search<'r>(
        &'r self,
        current: &'r str,
        target: &str,
        visited: &mut HashSet<&'r str>,
    ) -> Reach {
        let Some(region) = self.regions.lookup(current) else {
            return Reach::Unreachable;
        };
        if region.name() == target {
            return Reach::Reached(region.logic().cloned());
        }
        if !visited.insert(current) {
            return Reach::Unreachable;
        }

        let mut found = Reach::Unreachable;
        for next in region.connects_to() {
            let Reach::Reached(inner) = self.search(next, target, visited) else {
                continue;
            };
            let exit = region.exit_toward(next).cloned();
            let entrance = self
                .regions
                .lookup(next)
                .and_then(|neighbor| neighbor.entrance_from(current))
                .cloned();
            found = found.or(and(and(inner, exit), entrance));
        }
        found
    }
}
