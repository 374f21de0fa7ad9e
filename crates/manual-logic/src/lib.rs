// crates/manual-logic/src/lib.rs
// ============================================================================
// Module: Manual Logic Root
// Description: Public API surface of the requirement logic engine.
// Purpose: Wire together the logic node, combinators, rendering, parsing,
//          validation, reachability expansion, and yaml collection.
// Dependencies: crate::{catalog, combine, diagnostics, dsl, error, expand,
//              logic, render, serde_support, validate, yaml}
// ============================================================================

//! ## Overview
//! `manual-logic` models the requirement expressions of a Manual randomizer
//! world. A [`Logic`] tree is built bottom-up with simplifying `AND`/`OR`
//! combinators, rendered to the text embedded in world documents, checked
//! against entity tables with [`validate`], and rewritten with [`expand`] so
//! that "can reach" leaves become concrete item and category requirements.
//!
//! Entity storage is not part of this crate; callers pass lookup tables
//! implementing [`Lookup`].
//!
//! ```
//! use manual_logic::Logic;
//! use manual_logic::and;
//!
//! let sword = Logic::item("Sword");
//! let either = Logic::item("Sword") | Logic::item("Bow");
//! assert_eq!(and(Some(either), Some(sword.clone())), Some(sword));
//! ```

// ============================================================================
// SECTION: Core Modules
// ============================================================================

pub mod catalog;
pub mod combine;
pub mod diagnostics;
pub mod dsl;
pub mod error;
pub mod expand;
pub mod logic;
mod render;
mod serde_support;
pub mod validate;
pub mod yaml;


// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use catalog::ItemEntry;
pub use catalog::LocationEntry;
pub use catalog::Lookup;
pub use catalog::RegionEntry;
pub use combine::and;
pub use combine::or;
pub use diagnostics::ExpansionDiagnostics;
pub use diagnostics::NoopDiagnostics;
pub use diagnostics::TracingDiagnostics;
pub use dsl::ParseError;
pub use dsl::parse_logic;
pub use error::EntityKind;
pub use error::UnresolvedReference;
pub use expand::Expander;
pub use expand::Reach;
pub use expand::expand;
pub use expand::expand_with;
pub use logic::Builtin;
pub use logic::Comparator;
pub use logic::Kind;
pub use logic::Logic;
pub use validate::validate;
pub use yaml::YamlReference;
pub use yaml::YamlReferences;
