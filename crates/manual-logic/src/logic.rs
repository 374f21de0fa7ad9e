// crates/manual-logic/src/logic.rs
// ============================================================================
// Module: Logic Node
// Description: Tagged-union requirement expression for Manual worlds.
// Purpose: Define `Logic`, its discriminant, leaf constructors, and the
//          commutative-aware identity used for deduplication.
// Dependencies: serde::{Deserialize, Serialize}
// ============================================================================

//! ## Overview
//! A [`Logic`] value is one boolean requirement: either an algebraic node
//! (`And`/`Or`), an entity reference (item, category, region, location), or a
//! function-style builtin (`ItemValue`, `OptOne`, `YamlCompare`, ...). Nodes
//! are immutable; composition always produces new nodes.
//!
//! Entities are referenced by name only, so a node may mention an item or
//! region that is declared later. Resolution happens through the lookup tables
//! in [`crate::catalog`].
//!
//! Equality, ordering, and hashing agree with each other: `And`/`Or` children
//! are compared in canonical (sorted) order, which makes `And(a, b)` equal to
//! `And(b, a)` and places both at the same position in the total preorder.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Percentage rendered as `ALL`.
pub const PERCENT_ALL: u8 = 100;
/// Percentage rendered as `HALF`.
pub const PERCENT_HALF: u8 = 50;

// ============================================================================
// SECTION: Comparator
// ============================================================================

/// Comparison applied by [`Logic::YamlCompare`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparator {
    /// Setting equals the value.
    Equal,
    /// Setting differs from the value.
    NotEqual,
    /// Setting is strictly less than the value.
    LessThan,
    /// Setting is less than or equal to the value.
    LessThanOrEqual,
    /// Setting is strictly greater than the value.
    GreaterThan,
    /// Setting is greater than or equal to the value.
    GreaterThanOrEqual,
}

impl Comparator {
    /// Returns the textual symbol used in requirement strings.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Equal => "=",
            Self::NotEqual => "!=",
            Self::LessThan => "<",
            Self::LessThanOrEqual => "<=",
            Self::GreaterThan => ">",
            Self::GreaterThanOrEqual => ">=",
        }
    }

    /// Parses a comparator symbol. Both `=` and `==` mean equality.
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "=" | "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            "<" => Some(Self::LessThan),
            "<=" => Some(Self::LessThanOrEqual),
            ">" => Some(Self::GreaterThan),
            ">=" => Some(Self::GreaterThanOrEqual),
            _ => None,
        }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

// ============================================================================
// SECTION: Builtin
// ============================================================================

/// Function-style leaves bundled with the randomizer's requirement syntax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Builtin {
    /// Can the player reach the given region?
    CanReachRegion,
    /// Can the player reach the given location?
    CanReachLocation,
    /// Has the player collected the given value of a value-based item?
    ItemValue,
    /// Requires an item only if that item exists.
    OptOne,
    /// Applies the `OptOne` check to every item inside a requirement.
    OptAll,
    /// The yaml option must be enabled.
    YamlEnabled,
    /// The yaml option must be disabled.
    YamlDisabled,
    /// Numeric comparison against a yaml option.
    YamlCompare,
    /// World-specific function with opaque arguments.
    Custom,
}

impl Builtin {
    /// Returns the function name used in requirement strings.
    ///
    /// `Custom` has no fixed name; its textual form uses the node's own name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::CanReachRegion => "canReachRegion",
            Self::CanReachLocation => "canReachLocation",
            Self::ItemValue => "ItemValue",
            Self::OptOne => "OptOne",
            Self::OptAll => "OptAll",
            Self::YamlEnabled => "YamlEnabled",
            Self::YamlDisabled => "YamlDisabled",
            Self::YamlCompare => "YamlCompare",
            Self::Custom => "Custom",
        }
    }

    /// Maps a function name to a builtin. Unknown names map to `Custom`.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name {
            "canReachRegion" => Self::CanReachRegion,
            "canReachLocation" => Self::CanReachLocation,
            "ItemValue" => Self::ItemValue,
            "OptOne" => Self::OptOne,
            "OptAll" => Self::OptAll,
            "YamlEnabled" => Self::YamlEnabled,
            "YamlDisabled" => Self::YamlDisabled,
            "YamlCompare" => Self::YamlCompare,
            _ => Self::Custom,
        }
    }
}

impl fmt::Display for Builtin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ============================================================================
// SECTION: Kind
// ============================================================================

/// Discriminant of a [`Logic`] node.
///
/// # Invariants
/// - Declaration order is the first key of the [`Logic`] total preorder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    /// Both children must be fulfilled.
    And,
    /// Either child must be fulfilled.
    Or,
    /// A particular item must be obtained.
    Item,
    /// A particular amount of an item must be obtained.
    ItemCount,
    /// A particular percentage of an item must be obtained.
    ItemPercent,
    /// An item of a particular category must be obtained.
    Category,
    /// A particular amount of items in a category must be obtained.
    CategoryCount,
    /// A particular percentage of items in a category must be obtained.
    CategoryPercent,
    /// A particular region must be reachable.
    Region,
    /// A particular location must be reachable.
    Location,
    /// A particular amount of a phantom item must be obtained.
    ItemValue,
    /// The inner requirement must be fulfilled or not exist.
    OptOne,
    /// Every item inside the inner requirement must be obtained or not exist.
    OptAll,
    /// The option must be enabled.
    YamlEnabled,
    /// The option must be disabled.
    YamlDisabled,
    /// The option must compare against a value.
    YamlCompare,
    /// Custom function; semantics vary from world to world.
    Custom,
}

// ============================================================================
// SECTION: Logic Definition
// ============================================================================

/// The set of requirements for a location or region to be considered reachable.
///
/// "No requirement" is never a variant; callers model it as `Option<Logic>`
/// being `None`.
#[derive(Debug, Clone)]
pub enum Logic {
    /// Both sides must be fulfilled.
    And(Box<Self>, Box<Self>),
    /// Either side must be fulfilled.
    Or(Box<Self>, Box<Self>),
    /// Item name.
    Item(String),
    /// Item name and required count.
    ItemCount(String, u32),
    /// Item name and required percentage.
    ItemPercent(String, u8),
    /// Category name.
    Category(String),
    /// Category name and required count.
    CategoryCount(String, u32),
    /// Category name and required percentage.
    CategoryPercent(String, u8),
    /// Region that must be reachable.
    Region(String),
    /// Location that must be reachable.
    Location(String),
    /// Phantom item name and accumulated value.
    ItemValue(String, u32),
    /// Requirement applied only if the referenced entity exists.
    OptOne(Box<Self>),
    /// Opt semantics applied to every leaf of the inner requirement.
    OptAll(Box<Self>),
    /// Yaml setting that must be enabled.
    YamlEnabled(String),
    /// Yaml setting that must be disabled.
    YamlDisabled(String),
    /// Yaml setting compared against a value.
    YamlCompare {
        /// Setting name.
        setting: String,
        /// Comparison to apply.
        comparator: Comparator,
        /// Right-hand side of the comparison.
        value: i64,
    },
    /// Opaque escape hatch rendered verbatim.
    Custom {
        /// Function name.
        name: String,
        /// Raw argument text.
        args: String,
    },
}

// ============================================================================
// SECTION: Constructors
// ============================================================================

impl Logic {
    /// Requires the item.
    #[must_use]
    pub fn item(name: impl Into<String>) -> Self {
        Self::Item(name.into())
    }

    /// Requires `count` copies of the item. A count of zero is no requirement.
    #[must_use]
    pub fn item_count(name: impl Into<String>, count: u32) -> Option<Self> {
        (count > 0).then(|| Self::ItemCount(name.into(), count))
    }

    /// Requires a percentage of the item's copies.
    ///
    /// Zero is no requirement; anything above 100 is clamped to `ALL`.
    #[must_use]
    pub fn item_percent(name: impl Into<String>, percent: u32) -> Option<Self> {
        clamp_percent(percent).map(|percent| Self::ItemPercent(name.into(), percent))
    }

    /// Requires a percentage computed as `index * scaling`, truncated.
    #[must_use]
    pub fn item_percent_scaled(name: impl Into<String>, index: f64, scaling: f64) -> Option<Self> {
        scaled_percent(index, scaling).map(|percent| Self::ItemPercent(name.into(), percent))
    }

    /// Requires every copy of the item.
    #[must_use]
    pub fn item_all(name: impl Into<String>) -> Self {
        Self::ItemPercent(name.into(), PERCENT_ALL)
    }

    /// Requires half of the item's copies.
    #[must_use]
    pub fn item_half(name: impl Into<String>) -> Self {
        Self::ItemPercent(name.into(), PERCENT_HALF)
    }

    /// Requires any item of the category.
    #[must_use]
    pub fn category(name: impl Into<String>) -> Self {
        Self::Category(name.into())
    }

    /// Requires `count` items of the category. A count of zero is no requirement.
    #[must_use]
    pub fn category_count(name: impl Into<String>, count: u32) -> Option<Self> {
        (count > 0).then(|| Self::CategoryCount(name.into(), count))
    }

    /// Requires a percentage of the category.
    ///
    /// Zero is no requirement; anything above 100 is clamped to `ALL`.
    #[must_use]
    pub fn category_percent(name: impl Into<String>, percent: u32) -> Option<Self> {
        clamp_percent(percent).map(|percent| Self::CategoryPercent(name.into(), percent))
    }

    /// Requires a category percentage computed as `index * scaling`, truncated.
    #[must_use]
    pub fn category_percent_scaled(
        name: impl Into<String>,
        index: f64,
        scaling: f64,
    ) -> Option<Self> {
        scaled_percent(index, scaling).map(|percent| Self::CategoryPercent(name.into(), percent))
    }

    /// Requires every item of the category.
    #[must_use]
    pub fn category_all(name: impl Into<String>) -> Self {
        Self::CategoryPercent(name.into(), PERCENT_ALL)
    }

    /// Requires half the items of the category.
    #[must_use]
    pub fn category_half(name: impl Into<String>) -> Self {
        Self::CategoryPercent(name.into(), PERCENT_HALF)
    }

    /// Requires the region to be reachable.
    #[must_use]
    pub fn region(name: impl Into<String>) -> Self {
        Self::Region(name.into())
    }

    /// Requires the location to be reachable.
    #[must_use]
    pub fn location(name: impl Into<String>) -> Self {
        Self::Location(name.into())
    }

    /// Requires `count` accumulated value of a phantom item. Zero is no requirement.
    #[must_use]
    pub fn item_value(phantom: impl Into<String>, count: u32) -> Option<Self> {
        (count > 0).then(|| Self::ItemValue(phantom.into(), count))
    }

    /// Requires `inner` only if the referenced entity exists.
    #[must_use]
    pub fn opt_one(inner: Self) -> Self {
        Self::OptOne(Box::new(inner))
    }

    /// Applies opt semantics to every leaf of `inner`.
    #[must_use]
    pub fn opt_all(inner: Self) -> Self {
        Self::OptAll(Box::new(inner))
    }

    /// Requires the yaml setting to be enabled.
    #[must_use]
    pub fn yaml_enabled(setting: impl Into<String>) -> Self {
        Self::YamlEnabled(setting.into())
    }

    /// Requires the yaml setting to be disabled.
    #[must_use]
    pub fn yaml_disabled(setting: impl Into<String>) -> Self {
        Self::YamlDisabled(setting.into())
    }

    /// Requires the yaml setting to compare against `value`.
    #[must_use]
    pub fn yaml_compare(setting: impl Into<String>, comparator: Comparator, value: i64) -> Self {
        Self::YamlCompare {
            setting: setting.into(),
            comparator,
            value,
        }
    }

    /// Custom function rendered as `{name(args)}`.
    #[must_use]
    pub fn custom(name: impl Into<String>, args: impl Into<String>) -> Self {
        Self::Custom {
            name: name.into(),
            args: args.into(),
        }
    }
}

/// Maps a raw percentage onto the stored range, dropping zero.
pub(crate) fn clamp_percent(percent: u32) -> Option<u8> {
    if percent == 0 {
        return None;
    }
    Some(u8::try_from(percent.min(u32::from(PERCENT_ALL))).unwrap_or(PERCENT_ALL))
}

/// Truncates `index * scaling` to a whole percentage within `1 ..= 100`.
fn scaled_percent(index: f64, scaling: f64) -> Option<u8> {
    if index.is_nan() || index <= 0.0 {
        return None;
    }
    let scaled = index * scaling;
    (1 ..= PERCENT_ALL).rev().find(|percent| f64::from(*percent) <= scaled)
}

// ============================================================================
// SECTION: Accessors
// ============================================================================

impl Logic {
    /// Returns the node's discriminant.
    #[must_use]
    pub const fn kind(&self) -> Kind {
        match self {
            Self::And(..) => Kind::And,
            Self::Or(..) => Kind::Or,
            Self::Item(_) => Kind::Item,
            Self::ItemCount(..) => Kind::ItemCount,
            Self::ItemPercent(..) => Kind::ItemPercent,
            Self::Category(_) => Kind::Category,
            Self::CategoryCount(..) => Kind::CategoryCount,
            Self::CategoryPercent(..) => Kind::CategoryPercent,
            Self::Region(_) => Kind::Region,
            Self::Location(_) => Kind::Location,
            Self::ItemValue(..) => Kind::ItemValue,
            Self::OptOne(_) => Kind::OptOne,
            Self::OptAll(_) => Kind::OptAll,
            Self::YamlEnabled(_) => Kind::YamlEnabled,
            Self::YamlDisabled(_) => Kind::YamlDisabled,
            Self::YamlCompare {
                ..
            } => Kind::YamlCompare,
            Self::Custom {
                ..
            } => Kind::Custom,
        }
    }

    /// Returns the entity, setting, or function name carried by a leaf.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Item(name)
            | Self::ItemCount(name, _)
            | Self::ItemPercent(name, _)
            | Self::Category(name)
            | Self::CategoryCount(name, _)
            | Self::CategoryPercent(name, _)
            | Self::Region(name)
            | Self::Location(name)
            | Self::ItemValue(name, _)
            | Self::YamlEnabled(name)
            | Self::YamlDisabled(name)
            | Self::YamlCompare {
                setting: name,
                ..
            }
            | Self::Custom {
                name,
                ..
            } => Some(name),
            Self::And(..) | Self::Or(..) | Self::OptOne(_) | Self::OptAll(_) => None,
        }
    }

    /// Returns the count, percentage, or compared value; zero when absent.
    #[must_use]
    pub fn amount(&self) -> i64 {
        match self {
            Self::ItemCount(_, count) | Self::CategoryCount(_, count) | Self::ItemValue(_, count) => {
                i64::from(*count)
            }
            Self::ItemPercent(_, percent) | Self::CategoryPercent(_, percent) => {
                i64::from(*percent)
            }
            Self::YamlCompare {
                value,
                ..
            } => *value,
            _ => 0,
        }
    }

    /// Returns both children when this is an `And` or `Or` node.
    #[must_use]
    pub fn binary(&self) -> Option<(&Self, &Self)> {
        match self {
            Self::And(left, right) | Self::Or(left, right) => Some((left, right)),
            _ => None,
        }
    }

    /// Returns `true` for an `And` node.
    #[must_use]
    pub const fn is_and(&self) -> bool {
        matches!(self, Self::And(..))
    }

    /// Returns `true` for an `Or` node.
    #[must_use]
    pub const fn is_or(&self) -> bool {
        matches!(self, Self::Or(..))
    }

    /// Returns `true` when the leaf is trivially satisfied.
    ///
    /// Only the raw variants can hold a zero amount; the constructors turn a
    /// zero into "no requirement" instead.
    #[must_use]
    pub const fn is_redundant(&self) -> bool {
        match self {
            Self::ItemCount(_, count) | Self::CategoryCount(_, count) | Self::ItemValue(_, count) => {
                *count == 0
            }
            Self::ItemPercent(_, percent) | Self::CategoryPercent(_, percent) => *percent == 0,
            _ => false,
        }
    }

    /// Visits leaves left to right, descending through `And`/`Or`/`OptOne`/`OptAll`,
    /// and returns the first value produced by `visit`.
    pub(crate) fn find_leaf<T>(&self, visit: &mut impl FnMut(&Self) -> Option<T>) -> Option<T> {
        match self {
            Self::And(left, right) | Self::Or(left, right) => {
                left.find_leaf(visit).or_else(|| right.find_leaf(visit))
            }
            Self::OptOne(inner) | Self::OptAll(inner) => inner.find_leaf(visit),
            leaf => visit(leaf),
        }
    }
}

// ============================================================================
// SECTION: Identity
// ============================================================================

/// Orders a pair of children canonically so identity ignores operand order.
fn canonical<'a>(left: &'a Logic, right: &'a Logic) -> (&'a Logic, &'a Logic) {
    if left <= right { (left, right) } else { (right, left) }
}

impl Logic {
    /// Compares the parts not covered by kind, amount, and name.
    fn cmp_payload(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::And(a, b), Self::And(c, d)) | (Self::Or(a, b), Self::Or(c, d)) => {
                let (low, high) = canonical(a, b);
                let (other_low, other_high) = canonical(c, d);
                low.cmp(other_low).then_with(|| high.cmp(other_high))
            }
            (Self::OptOne(a), Self::OptOne(b)) | (Self::OptAll(a), Self::OptAll(b)) => a.cmp(b),
            (
                Self::YamlCompare {
                    comparator: a,
                    ..
                },
                Self::YamlCompare {
                    comparator: b,
                    ..
                },
            ) => a.cmp(b),
            (
                Self::Custom {
                    args: a,
                    ..
                },
                Self::Custom {
                    args: b,
                    ..
                },
            ) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

impl Ord for Logic {
    fn cmp(&self, other: &Self) -> Ordering {
        self.kind()
            .cmp(&other.kind())
            .then_with(|| self.amount().cmp(&other.amount()))
            .then_with(|| self.name().unwrap_or_default().cmp(other.name().unwrap_or_default()))
            .then_with(|| self.cmp_payload(other))
    }
}

impl PartialOrd for Logic {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Logic {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other).is_eq()
    }
}

impl Eq for Logic {}

impl Hash for Logic {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.kind().hash(state);
        self.amount().hash(state);
        self.name().hash(state);
        match self {
            Self::And(left, right) | Self::Or(left, right) => {
                let (low, high) = canonical(left, right);
                low.hash(state);
                high.hash(state);
            }
            Self::OptOne(inner) | Self::OptAll(inner) => inner.hash(state),
            Self::YamlCompare {
                comparator,
                ..
            } => comparator.hash(state),
            Self::Custom {
                args,
                ..
            } => args.hash(state),
            _ => {}
        }
    }
}
