// crates/manual-world/src/documents.rs
// ============================================================================
// Module: World Documents
// Description: JSON documents consumed by the Manual randomizer client.
// Purpose: Turn a world and its game descriptor into `game.json`,
//          `categories.json`, `items.json`, `locations.json`,
//          `regions.json`, and `options.json`.
// Dependencies: crate::{entities, error, names, output, world}, manual-logic,
//              serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! Each document is assembled from borrowed wire structs whose optional
//! fields are skipped when they hold the randomizer's default, then encoded
//! to a [`serde_json::Value`]. Requirements are embedded as rendered text.
//!
//! With `inline_reachability` enabled, location, region, and passage
//! requirements are rewritten by a single [`Expander`] before rendering, so
//! the region search for each region runs once per build.
//!
//! `options.json` lists every yaml setting named by a location or region
//! requirement: enabled/disabled checks declare a `Toggle`, comparisons a
//! `Range`. A later toggle use replaces an earlier range declaration. The
//! document is absent when no setting is named.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::path::Path;

use manual_logic::Builtin;
use manual_logic::Expander;
use manual_logic::ExpansionDiagnostics;
use manual_logic::Logic;
use manual_logic::NoopDiagnostics;
use manual_logic::TracingDiagnostics;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::entities::Game;
use crate::entities::Item;
use crate::entities::Location;
use crate::entities::Passage;
use crate::entities::Priority;
use crate::entities::Region;
use crate::entities::StartingItemBlock;
use crate::error::WorldError;
use crate::names::NameKind;
use crate::names::sanitize;
use crate::output::open_output_dir;
use crate::output::write_file_atomic;
use crate::registry::Registry;
use crate::world::DEFAULT_CREATOR;
use crate::world::World;

// ============================================================================
// SECTION: Documents
// ============================================================================

/// Generated world documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Documents {
    /// `game.json`.
    pub game: Value,
    /// `categories.json`.
    pub categories: Value,
    /// `items.json`.
    pub items: Value,
    /// `locations.json`.
    pub locations: Value,
    /// `regions.json`.
    pub regions: Value,
    /// `options.json`, when any yaml setting is used.
    pub options: Option<Value>,
}

impl Documents {
    /// File names paired with their documents, in a stable order.
    #[must_use]
    pub fn files(&self) -> Vec<(&'static str, &Value)> {
        let mut files = vec![
            ("game.json", &self.game),
            ("categories.json", &self.categories),
            ("items.json", &self.items),
            ("locations.json", &self.locations),
            ("regions.json", &self.regions),
        ];
        if let Some(options) = &self.options {
            files.push(("options.json", options));
        }
        files
    }

    /// Writes every document as pretty-printed JSON into `directory`.
    ///
    /// Missing directories are created; symlinked components and `..` are
    /// rejected. Each file is written to a temporary sibling and renamed into
    /// place.
    ///
    /// # Errors
    /// Returns [`WorldError::OutputPath`], [`WorldError::Encode`], or
    /// [`WorldError::Io`] on failure.
    pub fn write_to(&self, directory: &Path) -> Result<(), WorldError> {
        let output = open_output_dir(directory)?;
        for (file, document) in self.files() {
            let mut bytes = serde_json::to_vec_pretty(document).map_err(|err| WorldError::Encode {
                file,
                message: err.to_string(),
            })?;
            bytes.push(b'\n');
            write_file_atomic(&output, file, &bytes)?;
            tracing::debug!(file, bytes = bytes.len(), "wrote world document");
        }
        Ok(())
    }
}

impl World {
    /// Builds the world documents for `game`.
    ///
    /// Fields the game leaves unset fall back to the configuration, as in
    /// [`World::game`].
    ///
    /// # Errors
    /// Returns [`WorldError::InvalidName`] in strict mode for a yaml setting
    /// with disallowed characters, or [`WorldError::Encode`] when a document
    /// cannot be encoded.
    pub fn documents(&self, game: &Game) -> Result<Documents, WorldError> {
        let expansion = &self.config().expansion;
        let diagnostics: &'static dyn ExpansionDiagnostics =
            if expansion.report_unreachable { &TracingDiagnostics } else { &NoopDiagnostics };
        let mut renderer = Renderer {
            expander: expansion
                .inline_reachability
                .then(|| Expander::new(self.locations(), self.regions(), diagnostics)),
        };

        let locations: Vec<LocationDocument<'_>> =
            self.locations().iter().map(|location| LocationDocument::new(location, &mut renderer)).collect();
        let regions: BTreeMap<&str, RegionDocument<'_>> = self
            .regions()
            .iter()
            .map(|region| (region.name.as_str(), RegionDocument::new(region, &mut renderer)))
            .collect();
        let categories: BTreeMap<&str, CategoryDocument<'_>> = self
            .categories()
            .iter()
            .filter(|category| category.hidden || !category.yaml.is_empty())
            .map(|category| {
                (
                    category.name.as_str(),
                    CategoryDocument {
                        hidden: category.hidden,
                        yaml_option: &category.yaml,
                    },
                )
            })
            .collect();
        let items: Vec<ItemDocument<'_>> = self.items().iter().map(ItemDocument::new).collect();

        Ok(Documents {
            game: encode("game.json", &self.game_document(game))?,
            categories: encode("categories.json", &categories)?,
            items: encode("items.json", &items)?,
            locations: encode("locations.json", &locations)?,
            regions: encode("regions.json", &regions)?,
            options: self.options_document()?,
        })
    }

    /// Builds the borrowed `game.json` view.
    fn game_document<'a>(&'a self, game: &'a Game) -> GameDocument<'a> {
        let settings = &self.config().game;
        let creator = game
            .creator
            .as_deref()
            .or(settings.creator.as_deref())
            .unwrap_or(DEFAULT_CREATOR);
        let filler = game.filler.as_deref().unwrap_or(&settings.filler_item_name);
        let starting_index = game.starting_index.unwrap_or(settings.starting_index);
        GameDocument {
            game: &game.name,
            filler_item_name: filler,
            creator,
            death_link: game.death_link,
            starting_index: (starting_index != 1).then_some(starting_index),
            starting_items: game.starting_items.iter().map(StartingItemDocument::new).collect(),
        }
    }

    /// Builds `options.json`; `None` when no yaml setting is named.
    fn options_document(&self) -> Result<Option<Value>, WorldError> {
        let requirements = self
            .locations()
            .iter()
            .filter_map(|location| location.logic.as_ref())
            .chain(self.regions().iter().filter_map(|region| region.logic.as_ref()));

        let mut declared: BTreeMap<String, OptionDocument> = BTreeMap::new();
        for reference in requirements.filter_map(Logic::yaml_settings).flatten() {
            let toggle = matches!(reference.builtin, Builtin::YamlEnabled | Builtin::YamlDisabled);
            let name = sanitize(NameKind::Yaml, &reference.setting, self.is_strict())?.into_owned();
            let replace = declared.get(&name).is_none_or(|existing| existing.is_range() && toggle);
            if replace {
                declared.insert(name, OptionDocument::new(toggle));
            }
        }
        if declared.is_empty() {
            return Ok(None);
        }
        let mut root = Map::new();
        root.insert("user".to_string(), encode("options.json", &declared)?);
        Ok(Some(Value::Object(root)))
    }
}

// ============================================================================
// SECTION: Requirement Rendering
// ============================================================================

/// Renders requirements, optionally inlining reachability first.
struct Renderer<'w> {
    /// Expander shared across the whole build.
    expander: Option<Expander<'w, Registry<Location>, Registry<Region>, dyn ExpansionDiagnostics>>,
}

impl Renderer<'_> {
    /// Renders `logic`, expanded when inlining is on.
    fn render(&mut self, logic: Option<&Logic>) -> Option<String> {
        let logic = logic?;
        let expanded = self.expander.as_mut().and_then(|expander| expander.expand(logic));
        Some(expanded.as_ref().unwrap_or(logic).to_string())
    }

    /// Renders the guard of every passage that has one.
    fn render_passages(&mut self, passages: &[Passage]) -> BTreeMap<String, String> {
        passages
            .iter()
            .filter_map(|passage| {
                self.render(passage.logic.as_ref()).map(|text| (passage.region.clone(), text))
            })
            .collect()
    }
}

// ============================================================================
// SECTION: Wire Formats
// ============================================================================

/// `game.json`.
#[derive(Serialize)]
struct GameDocument<'a> {
    /// Game name.
    game: &'a str,
    /// Filler item name.
    filler_item_name: &'a str,
    /// Creator name.
    creator: &'a str,
    /// Death link support.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    death_link: bool,
    /// First id, when not 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    starting_index: Option<i64>,
    /// Starting inventory.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    starting_items: Vec<StartingItemDocument<'a>>,
}

/// One starting inventory block.
#[derive(Serialize)]
struct StartingItemDocument<'a> {
    /// Item categories to draw from.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    item_categories: &'a [String],
    /// Items to draw from.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    items: &'a [String],
    /// Random pick count.
    #[serde(skip_serializing_if = "Option::is_none")]
    random: Option<u32>,
    /// Gating yaml options.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    yaml_option: &'a [String],
    /// Items granted by earlier blocks.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    if_previous_item: &'a [String],
}

impl<'a> StartingItemDocument<'a> {
    /// Borrows a block.
    fn new(block: &'a StartingItemBlock) -> Self {
        Self {
            item_categories: &block.categories,
            items: &block.items,
            random: block.random,
            yaml_option: &block.yaml,
            if_previous_item: &block.if_previous_item,
        }
    }
}

/// One entry of `categories.json`.
#[derive(Serialize)]
struct CategoryDocument<'a> {
    /// Hidden from templates.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    hidden: bool,
    /// Gating yaml options.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    yaml_option: &'a [String],
}

/// One entry of `items.json`.
#[derive(Serialize)]
#[expect(clippy::struct_excessive_bools, reason = "Mirrors the randomizer's item flags.")]
struct ItemDocument<'a> {
    /// Item name.
    name: &'a str,
    /// Copies, when more than one.
    #[serde(skip_serializing_if = "Option::is_none")]
    count: Option<u32>,
    /// Fixed id.
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    /// Early copies.
    #[serde(skip_serializing_if = "Option::is_none")]
    early: Option<u32>,
    /// Local early copies.
    #[serde(skip_serializing_if = "Option::is_none")]
    local_early: Option<u32>,
    /// Categories.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    category: &'a [String],
    /// Trap flag.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    trap: bool,
    /// Local flag.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    local: bool,
    /// Filler flag.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    filler: bool,
    /// Useful flag.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    useful: bool,
    /// Progression without skip-balancing.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    progression: bool,
    /// Progression with skip-balancing.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    progression_skip_balancing: bool,
    /// Skip-balancing without progression.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    skip_balancing: bool,
    /// Phantom item amounts, summed per name.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    value: BTreeMap<&'a str, u64>,
}

impl<'a> ItemDocument<'a> {
    /// Borrows an item.
    fn new(item: &'a Item) -> Self {
        let priority = item.priority.unwrap_or_default();
        let progression = priority.contains(Priority::PROGRESSION);
        let skip_balancing = priority.contains(Priority::SKIP_BALANCING);
        let mut value = BTreeMap::new();
        for (phantom, amount) in &item.give_items {
            *value.entry(phantom.as_str()).or_insert(0) += u64::from(*amount);
        }
        Self {
            name: &item.name,
            count: (item.count > 1).then_some(item.count),
            id: item.id,
            early: (item.early != 0).then_some(item.early),
            local_early: (item.local_early != 0).then_some(item.local_early),
            category: &item.categories,
            trap: priority.contains(Priority::TRAP),
            local: priority.contains(Priority::LOCAL),
            filler: priority.contains(Priority::FILLER),
            useful: priority.contains(Priority::USEFUL),
            progression: progression && !skip_balancing,
            progression_skip_balancing: progression && skip_balancing,
            skip_balancing: !progression && skip_balancing,
            value,
        }
    }
}

/// One entry of `locations.json`.
#[derive(Serialize)]
struct LocationDocument<'a> {
    /// Location name.
    name: &'a str,
    /// Fixed id.
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<i64>,
    /// Categories.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    category: &'a [String],
    /// Rendered requirement.
    #[serde(skip_serializing_if = "Option::is_none")]
    requires: Option<String>,
    /// Hint entrance text.
    #[serde(skip_serializing_if = "Option::is_none")]
    hint_entrance: Option<&'a str>,
    /// Owning region.
    #[serde(skip_serializing_if = "Option::is_none")]
    region: Option<&'a str>,
    /// Goal flag.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    victory: bool,
    /// Prehint flag.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    prehint: bool,
    /// Allowed items.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    place_item: &'a [String],
    /// Denied items.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    dont_place_item: &'a [String],
    /// Allowed item categories.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    place_item_category: &'a [String],
    /// Denied item categories.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    dont_place_item_category: &'a [String],
}

impl<'a> LocationDocument<'a> {
    /// Borrows a location, rendering its requirement.
    fn new(location: &'a Location, renderer: &mut Renderer<'_>) -> Self {
        Self {
            name: &location.name,
            id: location.id,
            category: &location.categories,
            requires: renderer.render(location.logic.as_ref()),
            hint_entrance: location.hint_entrance.as_deref(),
            region: location.region.as_deref().filter(|region| !region.is_empty()),
            victory: location.victory,
            prehint: location.prehint,
            place_item: &location.place_items,
            dont_place_item: &location.deny_items,
            place_item_category: &location.place_categories,
            dont_place_item_category: &location.deny_categories,
        }
    }
}

/// One entry of `regions.json`.
#[derive(Serialize)]
struct RegionDocument<'a> {
    /// Starting flag.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    starting: bool,
    /// Rendered requirement.
    #[serde(skip_serializing_if = "Option::is_none")]
    requires: Option<String>,
    /// Connected regions.
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    connects_to: &'a [String],
    /// Rendered exit guards by target region.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    exit_requires: BTreeMap<String, String>,
    /// Rendered entrance guards by source region.
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    entrance_requires: BTreeMap<String, String>,
}

impl<'a> RegionDocument<'a> {
    /// Borrows a region, rendering its requirement and guards.
    fn new(region: &'a Region, renderer: &mut Renderer<'_>) -> Self {
        Self {
            starting: region.starting,
            requires: renderer.render(region.logic.as_ref()),
            connects_to: &region.connects_to,
            exit_requires: renderer.render_passages(&region.exits),
            entrance_requires: renderer.render_passages(&region.entrances),
        }
    }
}

/// One entry of `options.json`.
#[derive(Serialize)]
struct OptionDocument {
    /// Player-facing description lines.
    description: Vec<String>,
    /// `Toggle` or `Range`.
    #[serde(rename = "type")]
    kind: &'static str,
    /// Default value.
    default: Value,
    /// Lowest range value.
    #[serde(skip_serializing_if = "Option::is_none")]
    range_start: Option<i64>,
    /// Highest range value.
    #[serde(skip_serializing_if = "Option::is_none")]
    range_end: Option<i64>,
    /// Named range values.
    #[serde(skip_serializing_if = "Option::is_none")]
    values: Option<Map<String, Value>>,
}

impl OptionDocument {
    /// Declares a toggle or a 0..=10 range.
    fn new(toggle: bool) -> Self {
        if toggle {
            Self {
                description: Vec::new(),
                kind: "Toggle",
                default: Value::Bool(false),
                range_start: None,
                range_end: None,
                values: None,
            }
        } else {
            Self {
                description: Vec::new(),
                kind: "Range",
                default: Value::from(0),
                range_start: Some(0),
                range_end: Some(10),
                values: Some(Map::new()),
            }
        }
    }

    /// Returns `true` for range declarations.
    const fn is_range(&self) -> bool {
        self.values.is_some()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Encodes a wire struct.
fn encode<T: Serialize + ?Sized>(file: &'static str, document: &T) -> Result<Value, WorldError> {
    serde_json::to_value(document).map_err(|err| WorldError::Encode {
        file,
        message: err.to_string(),
    })
}
