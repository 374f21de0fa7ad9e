// crates/manual-logic/src/error.rs
// ============================================================================
// Module: Logic Error Definitions
// Description: Reference failures reported by strict validation.
// Purpose: Name the entity kind and the unresolved name for authoring errors.
// Dependencies: serde::{Deserialize, Serialize}, thiserror
// ============================================================================

//! ## Overview
//! Validation is the only fallible operation of the engine. Combination,
//! rendering, expansion, and yaml collection are total over well-formed trees.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Entity Kind
// ============================================================================

/// Registry an entity name is resolved against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    /// Category table.
    Category,
    /// Item table.
    Item,
    /// Location table.
    Location,
    /// Region table.
    Region,
}

impl EntityKind {
    /// Returns the display label of the registry.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Category => "Category",
            Self::Item => "Item",
            Self::Location => "Location",
            Self::Region => "Region",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Unresolved Reference
// ============================================================================

/// A requirement names an entity that is not (yet) registered.
///
/// # Invariants
/// - `name` is the exact name as written in the requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Error)]
#[error("\"{name}\" is referenced before it is defined in {kind}!")]
pub struct UnresolvedReference {
    /// Registry the name was looked up in.
    pub kind: EntityKind,
    /// The unresolved name.
    pub name: String,
}

impl UnresolvedReference {
    /// Creates a new unresolved-reference error.
    #[must_use]
    pub fn new(kind: EntityKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
        }
    }
}
