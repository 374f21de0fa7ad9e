// crates/manual-world/src/lib.rs
// ============================================================================
// Module: Manual World Root
// Description: Entity registry and document generation for Manual worlds.
// Purpose: Register a world's categories, items, locations, and regions and
//          emit the JSON documents the randomizer client loads.
// Dependencies: crate::{documents, entities, error, names, output, registry,
//              world}
// ============================================================================

//! ## Overview
//! `manual-world` is the authoring surface on top of `manual-logic`. A
//! [`World`] owns one [`Registry`] per entity kind, checks references as
//! entities are registered, and renders everything into [`Documents`].
//!
//! ```
//! use manual_config::ManualConfig;
//! use manual_logic::Logic;
//! use manual_world::Item;
//! use manual_world::Location;
//! use manual_world::Region;
//! use manual_world::World;
//!
//! let mut world = World::new(ManualConfig::default());
//! world.item(Item::new("Sword")).unwrap();
//! world.region(Region::new("Village").starting()).unwrap();
//! world
//!     .location(Location::new("Chest").in_region("Village").requires(Logic::item("Sword")))
//!     .unwrap();
//! assert!(world.check().is_ok());
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod documents;
pub mod entities;
pub mod error;
pub mod names;
mod output;
pub mod registry;
pub mod world;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use documents::Documents;
pub use entities::Category;
pub use entities::Game;
pub use entities::Item;
pub use entities::Location;
pub use entities::Passage;
pub use entities::Priority;
pub use entities::Region;
pub use entities::StartingItemBlock;
pub use error::WorldError;
pub use names::NameKind;
pub use names::sanitize;
pub use registry::Named;
pub use registry::Registry;
pub use world::DEFAULT_CREATOR;
pub use world::World;
