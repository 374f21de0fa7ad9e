// crates/manual-world/src/entities.rs
// ============================================================================
// Module: World Entities
// Description: Categories, items, locations, regions, passages, starting
//              item blocks, and the game descriptor.
// Purpose: Carry everything a Manual world document lists about an entity.
// Dependencies: manual-config, manual-logic, serde
// ============================================================================

//! ## Overview
//! Entities are plain values. Names reference other entities; nothing here
//! holds a pointer into the world. Each type has a `new(name)` constructor
//! with the randomizer's defaults and `with_*` setters for the rest.
//!
//! Items, locations, and regions implement the read-only entry views of
//! `manual-logic`, so a [`Registry`](crate::Registry) of them can be handed
//! straight to the validator and the reachability expander.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ops::BitOr;
use std::ops::BitOrAssign;

use manual_config::FallbackPriority;
use manual_logic::ItemEntry;
use manual_logic::LocationEntry;
use manual_logic::Logic;
use manual_logic::RegionEntry;
use serde::Deserialize;
use serde::Serialize;

use crate::registry::Named;

// ============================================================================
// SECTION: Priority
// ============================================================================

/// Item classification flags understood by the randomizer.
///
/// # Invariants
/// - Only the bits of the named constants are meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Priority(u8);

impl Priority {
    /// No classification.
    pub const NONE: Self = Self(0);
    /// The item is a trap.
    pub const TRAP: Self = Self(1);
    /// The item is filler.
    pub const FILLER: Self = Self(2);
    /// The item is useful but not required.
    pub const USEFUL: Self = Self(4);
    /// The item may be required to finish.
    pub const PROGRESSION: Self = Self(8);
    /// The item is excluded from progression balancing.
    pub const SKIP_BALANCING: Self = Self(16);
    /// The item stays in its own world.
    pub const LOCAL: Self = Self(32);

    /// Raw flag bits.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` when every flag of `other` is set.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Priority {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Priority {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<FallbackPriority> for Priority {
    fn from(value: FallbackPriority) -> Self {
        match value {
            FallbackPriority::Unclassified => Self::NONE,
            FallbackPriority::Trap => Self::TRAP,
            FallbackPriority::Filler => Self::FILLER,
            FallbackPriority::Useful => Self::USEFUL,
            FallbackPriority::Progression => Self::PROGRESSION,
            FallbackPriority::ProgressionUseful => Self::PROGRESSION | Self::USEFUL,
            FallbackPriority::SkipBalancing => Self::SKIP_BALANCING,
            FallbackPriority::ProgressionSkipBalancing => {
                Self::PROGRESSION | Self::SKIP_BALANCING
            }
            FallbackPriority::ProgressionUsefulSkipBalancing => {
                Self::PROGRESSION | Self::USEFUL | Self::SKIP_BALANCING
            }
            FallbackPriority::Local => Self::LOCAL,
        }
    }
}

// ============================================================================
// SECTION: Category
// ============================================================================

/// A grouping of items or locations.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Category {
    /// Category name.
    pub name: String,
    /// Hidden categories are omitted from generated player templates.
    pub hidden: bool,
    /// Yaml options that must be enabled for the category to be in play.
    pub yaml: Vec<String>,
}

impl Category {
    /// Creates a visible category without yaml options.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Marks the category hidden.
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Adds a yaml option gating the category.
    #[must_use]
    pub fn with_yaml(mut self, option: impl Into<String>) -> Self {
        self.yaml.push(option.into());
        self
    }
}

impl Named for Category {
    fn name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// SECTION: Item
// ============================================================================

/// An obtainable item.
///
/// # Invariants
/// - `priority` is `None` until registration applies the world's fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Item name.
    pub name: String,
    /// Classification flags.
    pub priority: Option<Priority>,
    /// Categories the item belongs to.
    pub categories: Vec<String>,
    /// Copies of the item in the pool.
    pub count: u32,
    /// Phantom items granted on pickup, with their amounts.
    pub give_items: Vec<(String, u32)>,
    /// Copies to place early in any world.
    pub early: u32,
    /// Copies to place early in the item's own world.
    pub local_early: u32,
    /// Fixed item id.
    pub id: Option<i64>,
}

impl Item {
    /// Creates a single-copy item without categories.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            priority: None,
            categories: Vec::new(),
            count: 1,
            give_items: Vec::new(),
            early: 0,
            local_early: 0,
            id: None,
        }
    }

    /// Sets the classification flags.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Adds a category.
    #[must_use]
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Sets the number of copies.
    #[must_use]
    pub const fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    /// Grants `amount` of a phantom item on pickup.
    #[must_use]
    pub fn gives(mut self, phantom: impl Into<String>, amount: u32) -> Self {
        self.give_items.push((phantom.into(), amount));
        self
    }

    /// Sets the early placement counts.
    #[must_use]
    pub const fn with_early(mut self, early: u32, local_early: u32) -> Self {
        self.early = early;
        self.local_early = local_early;
        self
    }

    /// Sets the item id.
    #[must_use]
    pub const fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Requirement for one copy of the item.
    #[must_use]
    pub fn logic(&self) -> Logic {
        Logic::item(self.name.as_str())
    }
}

impl Named for Item {
    fn name(&self) -> &str {
        &self.name
    }
}

impl ItemEntry for Item {
    fn categories(&self) -> &[String] {
        &self.categories
    }
}

// ============================================================================
// SECTION: Location
// ============================================================================

/// A check that holds one item.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Location name.
    pub name: String,
    /// Requirement to access the location.
    pub logic: Option<Logic>,
    /// Categories the location belongs to.
    pub categories: Vec<String>,
    /// Region the location is in.
    pub region: Option<String>,
    /// Completing the location wins the game.
    pub victory: bool,
    /// The location's item is hinted from the start.
    pub prehint: bool,
    /// Items the location may hold.
    pub place_items: Vec<String>,
    /// Item categories the location may hold.
    pub place_categories: Vec<String>,
    /// Items the location may not hold.
    pub deny_items: Vec<String>,
    /// Item categories the location may not hold.
    pub deny_categories: Vec<String>,
    /// Entrance text shown with hints.
    pub hint_entrance: Option<String>,
    /// Fixed location id.
    pub id: Option<i64>,
}

impl Location {
    /// Creates an unrestricted location without requirements.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the requirement.
    #[must_use]
    pub fn requires(mut self, logic: impl Into<Option<Logic>>) -> Self {
        self.logic = logic.into();
        self
    }

    /// Adds a category.
    #[must_use]
    pub fn in_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    /// Places the location in a region.
    #[must_use]
    pub fn in_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Marks the location as the goal.
    #[must_use]
    pub const fn victory(mut self) -> Self {
        self.victory = true;
        self
    }

    /// Marks the location as prehinted.
    #[must_use]
    pub const fn prehint(mut self) -> Self {
        self.prehint = true;
        self
    }

    /// Restricts the location to an item.
    #[must_use]
    pub fn place_item(mut self, item: impl Into<String>) -> Self {
        self.place_items.push(item.into());
        self
    }

    /// Restricts the location to an item category.
    #[must_use]
    pub fn place_category(mut self, category: impl Into<String>) -> Self {
        self.place_categories.push(category.into());
        self
    }

    /// Forbids an item at the location.
    #[must_use]
    pub fn deny_item(mut self, item: impl Into<String>) -> Self {
        self.deny_items.push(item.into());
        self
    }

    /// Forbids an item category at the location.
    #[must_use]
    pub fn deny_category(mut self, category: impl Into<String>) -> Self {
        self.deny_categories.push(category.into());
        self
    }

    /// Sets the hint entrance text.
    #[must_use]
    pub fn with_hint_entrance(mut self, entrance: impl Into<String>) -> Self {
        self.hint_entrance = Some(entrance.into());
        self
    }

    /// Sets the location id.
    #[must_use]
    pub const fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Every item and category name the allow and deny lists mention.
    pub(crate) fn listed_items(&self) -> impl Iterator<Item = &String> {
        self.place_items.iter().chain(&self.deny_items)
    }

    /// Every category name the allow and deny lists mention.
    pub(crate) fn listed_categories(&self) -> impl Iterator<Item = &String> {
        self.place_categories.iter().chain(&self.deny_categories)
    }
}

impl Named for Location {
    fn name(&self) -> &str {
        &self.name
    }
}

impl LocationEntry for Location {
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

// ============================================================================
// SECTION: Regions and Passages
// ============================================================================

/// A guarded edge endpoint between two regions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passage {
    /// Region on the other side.
    pub region: String,
    /// Requirement to use the passage.
    pub logic: Option<Logic>,
}

impl Passage {
    /// Creates a passage.
    #[must_use]
    pub fn new(region: impl Into<String>, logic: impl Into<Option<Logic>>) -> Self {
        Self {
            region: region.into(),
            logic: logic.into(),
        }
    }
}

/// A node of the world's region graph.
///
/// # Invariants
/// - Every exit's region is also listed in `connects_to`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Region {
    /// Region name.
    pub name: String,
    /// Requirement to be in the region.
    pub logic: Option<Logic>,
    /// Regions directly reachable from here.
    pub connects_to: Vec<String>,
    /// The player may start here.
    pub starting: bool,
    /// Guards on entering from other regions.
    pub entrances: Vec<Passage>,
    /// Guards on leaving toward connected regions.
    pub exits: Vec<Passage>,
}

impl Region {
    /// Creates an unconnected region without requirements.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the requirement.
    #[must_use]
    pub fn requires(mut self, logic: impl Into<Option<Logic>>) -> Self {
        self.logic = logic.into();
        self
    }

    /// Marks the region as a starting region.
    #[must_use]
    pub const fn starting(mut self) -> Self {
        self.starting = true;
        self
    }

    /// Adds an unguarded connection.
    #[must_use]
    pub fn connect(mut self, region: impl Into<String>) -> Self {
        self.connects_to.push(region.into());
        self
    }

    /// Adds a guarded connection.
    #[must_use]
    pub fn exit(mut self, region: impl Into<String>, logic: impl Into<Option<Logic>>) -> Self {
        let passage = Passage::new(region, logic);
        self.connects_to.push(passage.region.clone());
        self.exits.push(passage);
        self
    }

    /// Adds a guard on entering from `region`.
    #[must_use]
    pub fn entrance(mut self, region: impl Into<String>, logic: impl Into<Option<Logic>>) -> Self {
        self.entrances.push(Passage::new(region, logic));
        self
    }
}

impl Named for Region {
    fn name(&self) -> &str {
        &self.name
    }
}

impl RegionEntry for Region {
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
        self.exits.iter().find(|exit| exit.region == target).and_then(|exit| exit.logic.as_ref())
    }

    fn entrance_from(&self, source: &str) -> Option<&Logic> {
        self.entrances
            .iter()
            .find(|entrance| entrance.region == source)
            .and_then(|entrance| entrance.logic.as_ref())
    }
}

// ============================================================================
// SECTION: Game
// ============================================================================

/// Items the player starts with.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StartingItemBlock {
    /// Specific items to draw from.
    pub items: Vec<String>,
    /// Item categories to draw from.
    pub categories: Vec<String>,
    /// Number of random picks; `None` grants everything.
    pub random: Option<u32>,
    /// Items that must have been granted by an earlier block.
    pub if_previous_item: Vec<String>,
    /// Yaml options that must be enabled for the block to apply.
    pub yaml: Vec<String>,
}

impl StartingItemBlock {
    /// Grants every copy of the given items.
    #[must_use]
    pub fn items<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            items: items.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Grants items from the given categories.
    #[must_use]
    pub fn categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Draws `amount` random items from the block.
    #[must_use]
    pub const fn random(mut self, amount: u32) -> Self {
        self.random = Some(amount);
        self
    }

    /// Applies the block only after `item` was granted.
    #[must_use]
    pub fn if_previous_item(mut self, item: impl Into<String>) -> Self {
        self.if_previous_item.push(item.into());
        self
    }

    /// Applies the block only when a yaml option is enabled.
    #[must_use]
    pub fn with_yaml(mut self, option: impl Into<String>) -> Self {
        self.yaml.push(option.into());
        self
    }
}

/// Top-level descriptor of the world.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Game {
    /// Game name.
    pub name: String,
    /// Author name; the configured creator applies when absent.
    pub creator: Option<String>,
    /// Filler item name; the configured filler applies when absent.
    pub filler: Option<String>,
    /// The world supports death link.
    pub death_link: bool,
    /// First item and location id; the configured index applies when absent.
    pub starting_index: Option<i64>,
    /// Starting inventory blocks.
    pub starting_items: Vec<StartingItemBlock>,
}

impl Game {
    /// Creates a game descriptor with configured defaults.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the creator.
    #[must_use]
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = Some(creator.into());
        self
    }

    /// Sets the filler item name.
    #[must_use]
    pub fn with_filler(mut self, filler: impl Into<String>) -> Self {
        self.filler = Some(filler.into());
        self
    }

    /// Enables death link.
    #[must_use]
    pub const fn with_death_link(mut self) -> Self {
        self.death_link = true;
        self
    }

    /// Sets the starting id.
    #[must_use]
    pub const fn with_starting_index(mut self, index: i64) -> Self {
        self.starting_index = Some(index);
        self
    }

    /// Adds a starting inventory block.
    #[must_use]
    pub fn with_starting_items(mut self, block: StartingItemBlock) -> Self {
        self.starting_items.push(block);
        self
    }

    /// Name of the packaged world, `Manual_{game}_{creator}`.
    ///
    /// Returns `None` until a creator is known.
    #[must_use]
    pub fn full_name(&self) -> Option<String> {
        self.creator.as_ref().map(|creator| format!("Manual_{}_{creator}", self.name))
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
