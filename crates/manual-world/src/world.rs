// crates/manual-world/src/world.rs
// ============================================================================
// Module: World Registry
// Description: Add-or-get registration of categories, items, locations, and
//              regions with strict or lenient reference handling.
// Purpose: Own a Manual world's entities and keep their references sound.
// Dependencies: crate::{entities, error, names, registry}, manual-config,
//              manual-logic, tracing
// ============================================================================

//! ## Overview
//! A [`World`] stores each entity kind in its own [`Registry`]. Registration
//! is add-or-get: a name that is already taken returns the stored entity and
//! ignores the new value.
//!
//! In strict mode every referenced category, item, and region must already
//! be registered, and every requirement is validated against the tables as
//! they stand. Failures leave the world untouched. In lenient mode missing
//! categories and items named in lists are created on the spot and bad name
//! characters are stripped; requirements are not checked until [`World::check`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;
use std::path::Path;

use manual_config::ManualConfig;
use manual_logic::Builtin;
use manual_logic::EntityKind;
use manual_logic::Logic;
use manual_logic::Lookup;
use manual_logic::UnresolvedReference;
use manual_logic::YamlReference;
use manual_logic::validate;

use crate::entities::Category;
use crate::entities::Game;
use crate::entities::Item;
use crate::entities::Location;
use crate::entities::Priority;
use crate::entities::Region;
use crate::error::WorldError;
use crate::names::NameKind;
use crate::names::sanitize;
use crate::registry::Registry;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Creator used when neither the game nor the configuration names one.
pub const DEFAULT_CREATOR: &str = "Unknown";

// ============================================================================
// SECTION: World
// ============================================================================

/// Entity tables of one Manual world.
#[derive(Debug, Clone, Default)]
pub struct World {
    /// Authoring configuration.
    config: ManualConfig,
    /// Categories in registration order.
    categories: Registry<Category>,
    /// Items in registration order.
    items: Registry<Item>,
    /// Locations in registration order.
    locations: Registry<Location>,
    /// Regions in registration order.
    regions: Registry<Region>,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new(config: ManualConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Creates an empty world from a configuration file.
    ///
    /// # Errors
    /// Returns [`WorldError::Config`] when the configuration cannot be loaded.
    pub fn load(path: Option<&Path>) -> Result<Self, WorldError> {
        Ok(Self::new(ManualConfig::load(path)?))
    }

    /// Authoring configuration.
    #[must_use]
    pub const fn config(&self) -> &ManualConfig {
        &self.config
    }

    /// Returns `true` when references must exist at registration time.
    #[must_use]
    pub const fn is_strict(&self) -> bool {
        self.config.world.strict
    }

    /// Registered categories.
    #[must_use]
    pub const fn categories(&self) -> &Registry<Category> {
        &self.categories
    }

    /// Registered items.
    #[must_use]
    pub const fn items(&self) -> &Registry<Item> {
        &self.items
    }

    /// Registered locations.
    #[must_use]
    pub const fn locations(&self) -> &Registry<Location> {
        &self.locations
    }

    /// Registered regions.
    #[must_use]
    pub const fn regions(&self) -> &Registry<Region> {
        &self.regions
    }

    /// Priority given to items registered without one.
    fn fallback_priority(&self) -> Priority {
        self.config.world.fallback_priority.into()
    }
}

// ============================================================================
// SECTION: Registration
// ============================================================================

impl World {
    /// Registers a category, or returns the one already registered.
    ///
    /// # Errors
    /// Returns [`WorldError::InvalidName`] in strict mode for a yaml option
    /// name with disallowed characters.
    pub fn category(&mut self, mut category: Category) -> Result<&Category, WorldError> {
        if !self.categories.contains(&category.name) {
            category.yaml = self.sanitize_all(NameKind::Yaml, category.yaml)?;
            tracing::debug!(category = category.name.as_str(), "registered category");
        }
        Ok(self.categories.insert(category))
    }

    /// Registers an item, or returns the one already registered.
    ///
    /// # Errors
    /// Returns [`WorldError`] in strict mode when the name is invalid or a
    /// category is missing.
    pub fn item(&mut self, mut item: Item) -> Result<&Item, WorldError> {
        item.name = sanitize(NameKind::Item, &item.name, self.is_strict())?.into_owned();
        if !self.items.contains(&item.name) {
            self.require_categories(&item.categories)?;
            item.priority.get_or_insert(self.fallback_priority());
            tracing::debug!(item = item.name.as_str(), count = item.count, "registered item");
        }
        Ok(self.items.insert(item))
    }

    /// Registers a location, or returns the one already registered.
    ///
    /// # Errors
    /// Returns [`WorldError`] in strict mode when an allow or deny list, a
    /// category, or the requirement names something unregistered.
    pub fn location(&mut self, mut location: Location) -> Result<&Location, WorldError> {
        if !self.locations.contains(&location.name) {
            self.require_items(&mut location.deny_items)?;
            self.require_items(&mut location.place_items)?;
            self.require_categories(&location.deny_categories)?;
            self.require_categories(&location.place_categories)?;
            self.require_categories(&location.categories)?;
            self.check_logic(location.logic.as_ref())?;
            tracing::debug!(
                location = location.name.as_str(),
                region = location.region.as_deref().unwrap_or_default(),
                "registered location"
            );
        }
        Ok(self.locations.insert(location))
    }

    /// Registers a region, or returns the one already registered.
    ///
    /// # Errors
    /// Returns [`WorldError`] in strict mode when the requirement, a passage
    /// guard, or a connected region names something unregistered.
    pub fn region(&mut self, region: Region) -> Result<&Region, WorldError> {
        if !self.regions.contains(&region.name) {
            self.check_logic(region.logic.as_ref())?;
            if self.is_strict() {
                let linked =
                    region.connects_to.iter().chain(region.entrances.iter().map(|entrance| &entrance.region));
                for name in linked {
                    if !self.regions.contains(name) {
                        return Err(UnresolvedReference::new(EntityKind::Region, name.as_str()).into());
                    }
                }
            }
            for passage in region.exits.iter().chain(&region.entrances) {
                self.check_logic(passage.logic.as_ref())?;
            }
            tracing::debug!(
                region = region.name.as_str(),
                starting = region.starting,
                "registered region"
            );
        }
        Ok(self.regions.insert(region))
    }

    /// Resolves a game descriptor against the world and configuration.
    ///
    /// Missing creator, filler, and starting index are taken from the
    /// configuration; names are sanitized and starting item references are
    /// resolved like location lists.
    ///
    /// # Errors
    /// Returns [`WorldError`] in strict mode for invalid names or unregistered
    /// starting items and categories.
    pub fn game(&mut self, mut game: Game) -> Result<Game, WorldError> {
        let strict = self.is_strict();
        game.name = sanitize(NameKind::Game, &game.name, strict)?.into_owned();
        let creator = game
            .creator
            .take()
            .or_else(|| self.config.game.creator.clone())
            .unwrap_or_else(|| DEFAULT_CREATOR.to_string());
        game.creator = Some(sanitize(NameKind::Creator, &creator, strict)?.into_owned());
        game.filler.get_or_insert_with(|| self.config.game.filler_item_name.clone());
        game.starting_index.get_or_insert(self.config.game.starting_index);

        let mut blocks = std::mem::take(&mut game.starting_items);
        for block in &mut blocks {
            self.require_items(&mut block.items)?;
            self.require_items(&mut block.if_previous_item)?;
            self.require_categories(&block.categories)?;
            block.yaml = self.sanitize_all(NameKind::Yaml, std::mem::take(&mut block.yaml))?;
        }
        game.starting_items = blocks;
        Ok(game)
    }
}

// ============================================================================
// SECTION: Reference Handling
// ============================================================================

impl World {
    /// Sanitizes every name of a list.
    fn sanitize_all(&self, kind: NameKind, names: Vec<String>) -> Result<Vec<String>, WorldError> {
        names
            .into_iter()
            .map(|name| Ok(sanitize(kind, &name, self.is_strict())?.into_owned()))
            .collect()
    }

    /// Requires (strict) or creates (lenient) every listed category.
    fn require_categories(&mut self, names: &[String]) -> Result<(), WorldError> {
        for name in names {
            if self.categories.contains(name) {
                continue;
            }
            if self.is_strict() {
                return Err(UnresolvedReference::new(EntityKind::Category, name.as_str()).into());
            }
            tracing::warn!(category = name.as_str(), "implicitly created category");
            self.categories.insert(Category::new(name.as_str()));
        }
        Ok(())
    }

    /// Requires (strict) or creates (lenient) every listed item.
    ///
    /// Lenient mode rewrites each entry to its sanitized name.
    fn require_items(&mut self, names: &mut [String]) -> Result<(), WorldError> {
        let strict = self.is_strict();
        for name in names {
            let clean = sanitize(NameKind::Item, name, strict)?.into_owned();
            if !self.items.contains(&clean) {
                if strict {
                    return Err(UnresolvedReference::new(EntityKind::Item, clean).into());
                }
                tracing::warn!(item = clean.as_str(), "implicitly created item");
                let item = Item::new(clean.as_str()).with_priority(self.fallback_priority());
                self.items.insert(item);
            }
            *name = clean;
        }
        Ok(())
    }

    /// Validates a requirement in strict mode.
    fn check_logic(&self, logic: Option<&Logic>) -> Result<(), WorldError> {
        match logic {
            Some(logic) if self.is_strict() => self.validate_complete(logic),
            _ => Ok(()),
        }
    }

    /// Validates a requirement against the current tables regardless of mode.
    fn validate_complete(&self, logic: &Logic) -> Result<(), WorldError> {
        validate(logic, &self.categories, &self.items, &self.locations, &self.regions, true)?;
        Ok(())
    }

    /// Fails on the first name missing from `table`.
    fn audit<'n, T: Lookup>(
        table: &T,
        kind: EntityKind,
        names: impl IntoIterator<Item = &'n String>,
    ) -> Result<(), WorldError> {
        for name in names {
            if !table.contains(name) {
                return Err(UnresolvedReference::new(kind, name.as_str()).into());
            }
        }
        Ok(())
    }
}

// ============================================================================
// SECTION: Queries
// ============================================================================

impl World {
    /// Items in `category`, in registration order.
    pub fn items_with<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Item> {
        self.items.iter().filter(move |item| item.categories.iter().any(|name| name == category))
    }

    /// Locations in `category`, in registration order.
    pub fn locations_with<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Location> {
        self.locations
            .iter()
            .filter(move |location| location.categories.iter().any(|name| name == category))
    }

    /// Every requirement stored in the world: locations, then regions with
    /// their exit and entrance guards.
    pub fn requirements(&self) -> impl Iterator<Item = &Logic> {
        let locations = self.locations.iter().filter_map(|location| location.logic.as_ref());
        let regions = self.regions.iter().flat_map(|region| {
            region
                .logic
                .iter()
                .chain(region.exits.iter().chain(&region.entrances).filter_map(|passage| passage.logic.as_ref()))
        });
        locations.chain(regions)
    }

    /// Yaml settings named anywhere in the world, first occurrence first.
    ///
    /// Requirements are scanned before category yaml options, which are
    /// reported as `YamlEnabled`.
    #[must_use]
    pub fn yaml_settings(&self) -> Vec<YamlReference> {
        let from_logic = self.requirements().filter_map(Logic::yaml_settings).flatten();
        let from_categories = self.categories.iter().flat_map(|category| {
            category.yaml.iter().map(|setting| YamlReference {
                builtin: Builtin::YamlEnabled,
                setting: setting.clone(),
            })
        });

        let mut seen = HashSet::new();
        from_logic.chain(from_categories).filter(|reference| seen.insert(reference.clone())).collect()
    }

    /// Re-validates every reference in the world against the full tables.
    ///
    /// Items are audited first, then locations, then regions; the first
    /// problem is reported.
    ///
    /// # Errors
    /// Returns [`WorldError::Unresolved`] for the first unregistered name.
    pub fn check(&self) -> Result<(), WorldError> {
        for item in &self.items {
            Self::audit(&self.categories, EntityKind::Category, &item.categories)?;
        }
        for location in &self.locations {
            Self::audit(&self.items, EntityKind::Item, location.listed_items())?;
            Self::audit(&self.categories, EntityKind::Category, location.listed_categories())?;
            Self::audit(&self.categories, EntityKind::Category, &location.categories)?;
            Self::audit(&self.regions, EntityKind::Region, &location.region)?;
            if let Some(logic) = &location.logic {
                self.validate_complete(logic)?;
            }
        }
        for region in &self.regions {
            Self::audit(&self.regions, EntityKind::Region, &region.connects_to)?;
            Self::audit(
                &self.regions,
                EntityKind::Region,
                region.entrances.iter().map(|entrance| &entrance.region),
            )?;
            let guards = region.exits.iter().chain(&region.entrances).filter_map(|passage| passage.logic.as_ref());
            for logic in region.logic.iter().chain(guards) {
                self.validate_complete(logic)?;
            }
        }
        Ok(())
    }
}
