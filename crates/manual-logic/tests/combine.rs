// crates/manual-logic/tests/combine.rs
// ============================================================================
// Test Module: Logic Combinators
// Coverage: Identity, idempotence, absorption, chain re-association, and
//           commutative-aware identity of `And`/`Or` nodes.
// ============================================================================
//! ## Overview
//! Integration tests for the simplifying AND/OR combinators.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

mod support;

use std::collections::HashSet;

use manual_logic::Logic;
use manual_logic::and;
use manual_logic::or;
use support::TestResult;
use support::ensure;
use support::ensure_eq;

// ========================================================================
// Helpers
// ========================================================================

/// Shorthand for an item leaf.
fn item(name: &str) -> Logic {
    Logic::item(name)
}

/// Builds a raw `And` node without simplification.
fn raw_and(left: Logic, right: Logic) -> Logic {
    Logic::And(Box::new(left), Box::new(right))
}

/// Builds a raw `Or` node without simplification.
fn raw_or(left: Logic, right: Logic) -> Logic {
    Logic::Or(Box::new(left), Box::new(right))
}

// ========================================================================
// Identity and Equality
// ========================================================================

/// Tests that absent operands are the identity for both operators.
#[test]
fn test_absent_operand_is_identity() -> TestResult {
    let sword = item("Sword");
    ensure_eq(&and(None, Some(sword.clone())), &Some(sword.clone()), "None AND x")?;
    ensure_eq(&and(Some(sword.clone()), None), &Some(sword.clone()), "x AND None")?;
    ensure_eq(&or(None, Some(sword.clone())), &Some(sword.clone()), "None OR x")?;
    ensure_eq(&or(Some(sword.clone()), None), &Some(sword), "x OR None")?;
    ensure_eq(&and(None, None), &None, "None AND None")?;
    ensure_eq(&or(None, None), &None, "None OR None")?;
    Ok(())
}

/// Tests commutative-aware equality of binary nodes.
#[test]
fn test_binary_equality_ignores_operand_order() -> TestResult {
    ensure_eq(&raw_and(item("A"), item("B")), &raw_and(item("B"), item("A")), "And(a,b)")?;
    ensure_eq(&raw_or(item("A"), item("B")), &raw_or(item("B"), item("A")), "Or(a,b)")?;
    ensure(
        raw_and(item("A"), item("B")) != raw_or(item("A"), item("B")),
        "And and Or must differ",
    )?;

    let nested = raw_or(raw_and(item("A"), item("B")), item("C"));
    let swapped = raw_or(item("C"), raw_and(item("B"), item("A")));
    ensure_eq(&nested, &swapped, "nested commutation")?;
    Ok(())
}

/// Tests that equal nodes hash equally so sets deduplicate them.
#[test]
fn test_hash_agrees_with_equality() -> TestResult {
    let mut set = HashSet::new();
    set.insert(raw_and(item("A"), item("B")));
    set.insert(raw_and(item("B"), item("A")));
    set.insert(raw_or(item("A"), item("B")));
    ensure_eq(&set.len(), &2, "deduplicated set size")?;
    Ok(())
}

/// Tests the ordering keys: kind, then amount, then name.
#[test]
fn test_ordering_keys() -> TestResult {
    ensure(raw_and(item("Z"), item("Z")) < item("A"), "And sorts before items")?;
    ensure(item("Z") < Logic::category("A"), "items sort before categories")?;
    ensure(
        Logic::ItemCount("Z".to_string(), 1) < Logic::ItemCount("A".to_string(), 2),
        "count before name",
    )?;
    ensure(item("Apple") < item("Banana"), "ordinal name order")?;
    ensure(item("Z") < item("a"), "byte order, not case-insensitive")?;
    Ok(())
}

// ========================================================================
// Simplification Rules
// ========================================================================

/// Tests idempotence, including commutatively equal operands.
#[test]
fn test_idempotence() -> TestResult {
    let pair = raw_and(item("A"), item("B"));
    let flipped = raw_and(item("B"), item("A"));
    ensure_eq(&(item("A") & item("A")), &item("A"), "a AND a")?;
    ensure_eq(&(item("A") | item("A")), &item("A"), "a OR a")?;
    ensure_eq(&(pair.clone() & flipped), &pair, "commutative duplicate")?;
    Ok(())
}

/// Tests absorption in both directions and both argument positions.
#[test]
fn test_absorption() -> TestResult {
    let either = raw_or(item("A"), item("B"));
    let both = raw_and(item("A"), item("B"));
    ensure_eq(&(either.clone() & item("A")), &item("A"), "(a|b) & a")?;
    ensure_eq(&(item("B") & either), &item("B"), "b & (a|b)")?;
    ensure_eq(&(both.clone() | item("A")), &item("A"), "(a&b) | a")?;
    ensure_eq(&(item("B") | both), &item("B"), "b | (a&b)")?;
    Ok(())
}

/// Tests that a same-kind chain already containing an operand is kept.
#[test]
fn test_chain_containment() -> TestResult {
    let both = raw_and(item("A"), item("B"));
    ensure_eq(&(both.clone() & item("A")), &both, "(a&b) & a")?;
    ensure_eq(&(item("B") & both.clone()), &both, "b & (a&b)")?;

    let either = raw_or(item("A"), item("B"));
    ensure_eq(&(either.clone() | item("B")), &either, "(a|b) | b")?;
    Ok(())
}

/// Tests re-association through a nested chain.
#[test]
fn test_reassociation_renests_simplified_operand() -> TestResult {
    // ((A | B) AND C) AND A  ->  A AND C
    let left = raw_and(raw_or(item("A"), item("B")), item("C"));
    ensure_eq(&(left & item("A")), &raw_and(item("A"), item("C")), "left chain")?;

    // A AND (C AND (A | B))  ->  C AND A
    let right = raw_and(item("C"), raw_or(item("A"), item("B")));
    ensure_eq(&(item("A") & right), &raw_and(item("C"), item("A")), "right chain")?;
    Ok(())
}

/// Tests the fallback for unrelated operands.
#[test]
fn test_fallback_builds_fresh_node() -> TestResult {
    let combined = item("A") & item("B") & item("C");
    let expected = raw_and(raw_and(item("A"), item("B")), item("C"));
    ensure_eq(&combined, &expected, "three unrelated leaves")?;
    Ok(())
}

/// Tests that zero-amount leaves drop under AND and absorb under OR.
#[test]
fn test_redundant_leaves() -> TestResult {
    let free = Logic::CategoryPercent("Keys".to_string(), 0);
    ensure(free.is_redundant(), "zero percent is redundant")?;
    ensure_eq(&(free.clone() & item("A")), &item("A"), "redundant under AND")?;
    ensure_eq(&(item("A") | free.clone()), &free, "redundant under OR")?;
    ensure(!item("A").is_redundant(), "plain item is not redundant")?;
    Ok(())
}

// ========================================================================
// Constructors and Folds
// ========================================================================

/// Tests that zero amounts produce no requirement.
#[test]
fn test_zero_amount_constructors() -> TestResult {
    ensure(Logic::item_count("A", 0).is_none(), "zero count")?;
    ensure(Logic::category_count("A", 0).is_none(), "zero category count")?;
    ensure(Logic::item_percent("A", 0).is_none(), "zero percent")?;
    ensure(Logic::item_value("Coins", 0).is_none(), "zero value")?;
    ensure(Logic::item_percent_scaled("A", 0.0, 10.0).is_none(), "zero index")?;
    ensure_eq(
        &Logic::item_percent("A", 250),
        &Some(Logic::ItemPercent("A".to_string(), 100)),
        "clamped percent",
    )?;
    ensure_eq(
        &Logic::category_percent_scaled("Keys", 3.0, 12.5),
        &Some(Logic::CategoryPercent("Keys".to_string(), 37)),
        "truncated scaled percent",
    )?;
    Ok(())
}

/// Tests `Logic::all` and `Logic::any` folds.
#[test]
fn test_folds_skip_absent_requirements() -> TestResult {
    let all = Logic::all([Some(item("A")), None, Logic::item_count("B", 0), Some(item("C"))]);
    ensure_eq(&all, &Some(raw_and(item("A"), item("C"))), "all")?;

    let any = Logic::any([item("A"), item("A"), item("B")]);
    ensure_eq(&any, &Some(raw_or(item("A"), item("B"))), "any")?;

    ensure_eq(&Logic::all(Vec::<Logic>::new()), &None, "empty all")?;
    Ok(())
}

/// Tests operators with optional right-hand sides.
#[test]
fn test_operators_accept_optional_rhs() -> TestResult {
    ensure_eq(&(item("A") & None), &item("A"), "a AND None")?;
    ensure_eq(
        &(item("A") | Logic::item_count("B", 2)),
        &raw_or(item("A"), Logic::ItemCount("B".to_string(), 2)),
        "a OR b:2",
    )?;
    Ok(())
}
