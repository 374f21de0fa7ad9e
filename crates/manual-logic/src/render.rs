// crates/manual-logic/src/render.rs
// ============================================================================
// Module: Requirement Rendering
// Description: Textual form of `Logic` embedded in generated world documents.
// Purpose: Render requirement trees with parentheses only where kinds change.
// Dependencies: crate::{combine, logic}
// ============================================================================

//! ## Overview
//! The rendered text is the only surface the randomizer sees, so it must be
//! deterministic. Children of `And`/`Or` nodes are written in canonical order,
//! which makes the text independent of how a structurally equal tree was built.
//!
//! Same-kind chains are flat (`|A| AND |B| AND |C|`); an `Or` under an `And`
//! (or the reverse) is wrapped in parentheses. Requirements nested inside a
//! builtin call start a fresh context and are never wrapped.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use crate::combine::Junction;
use crate::logic::Builtin;
use crate::logic::Logic;
use crate::logic::PERCENT_ALL;
use crate::logic::PERCENT_HALF;

// ============================================================================
// SECTION: Display
// ============================================================================

impl fmt::Display for Logic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_logic(f, self, None)
    }
}

/// Writes `logic` as the operand of an enclosing junction, if any.
fn write_logic(f: &mut fmt::Formatter<'_>, logic: &Logic, enclosing: Option<Junction>) -> fmt::Result {
    match logic {
        Logic::And(left, right) => write_junction(f, Junction::And, left, right, enclosing),
        Logic::Or(left, right) => write_junction(f, Junction::Or, left, right, enclosing),
        Logic::Item(name) => write!(f, "|{name}|"),
        Logic::ItemCount(name, count) => write!(f, "|{name}:{count}|"),
        Logic::ItemPercent(name, percent) => write!(f, "|{name}:{}|", Percent(*percent)),
        Logic::Category(name) => write!(f, "|@{name}|"),
        Logic::CategoryCount(name, count) => write!(f, "|@{name}:{count}|"),
        Logic::CategoryPercent(name, percent) => write!(f, "|@{name}:{}|", Percent(*percent)),
        Logic::Region(name) => write!(f, "{{{}({name})}}", Builtin::CanReachRegion),
        Logic::Location(name) => write!(f, "{{{}({name})}}", Builtin::CanReachLocation),
        Logic::ItemValue(name, count) => write!(f, "{{{}({name}:{count})}}", Builtin::ItemValue),
        Logic::OptOne(inner) => write!(f, "{{{}({inner})}}", Builtin::OptOne),
        Logic::OptAll(inner) => write!(f, "{{{}({inner})}}", Builtin::OptAll),
        Logic::YamlEnabled(setting) => write!(f, "{{{}({setting})}}", Builtin::YamlEnabled),
        Logic::YamlDisabled(setting) => write!(f, "{{{}({setting})}}", Builtin::YamlDisabled),
        Logic::YamlCompare {
            setting,
            comparator,
            value,
        } => write!(f, "{{{}({setting} {comparator} {value})}}", Builtin::YamlCompare),
        Logic::Custom {
            name,
            args,
        } => write!(f, "{{{name}({args})}}"),
    }
}

/// Writes a binary node, wrapping it when it sits under the opposite junction.
fn write_junction(
    f: &mut fmt::Formatter<'_>,
    junction: Junction,
    left: &Logic,
    right: &Logic,
    enclosing: Option<Junction>,
) -> fmt::Result {
    let wrap = enclosing.is_some_and(|outer| outer != junction);
    let (first, second) = if left <= right { (left, right) } else { (right, left) };

    if wrap {
        f.write_str("(")?;
    }
    write_logic(f, first, Some(junction))?;
    f.write_str(junction.separator())?;
    write_logic(f, second, Some(junction))?;
    if wrap {
        f.write_str(")")?;
    }
    Ok(())
}

// ============================================================================
// SECTION: Percentages
// ============================================================================

/// Display adapter for the `ALL` / `HALF` / `N%` percentage forms.
struct Percent(u8);

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            PERCENT_ALL => f.write_str("ALL"),
            PERCENT_HALF => f.write_str("HALF"),
            other => write!(f, "{other}%"),
        }
    }
}
