// crates/manual-logic/tests/proptest_algebra.rs
// ============================================================================
// Module: Logic Algebra Property-Based Tests
// Description: Property tests for combinator laws and text stability.
// Purpose: Check simplification and rendering invariants over random trees.
// ============================================================================

//! Property-based tests for requirement algebra and rendering.

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
    reason = "Test-only assertions and helpers are permitted."
)]

use std::collections::hash_map::DefaultHasher;
use std::hash::Hash;
use std::hash::Hasher;

use manual_logic::Builtin;
use manual_logic::Comparator;
use manual_logic::Logic;
use manual_logic::and;
use manual_logic::or;
use manual_logic::parse_logic;
use proptest::prelude::*;

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z0-9]{0,6}"
}

fn comparator_strategy() -> impl Strategy<Value = Comparator> {
    prop_oneof![
        Just(Comparator::Equal),
        Just(Comparator::NotEqual),
        Just(Comparator::LessThan),
        Just(Comparator::LessThanOrEqual),
        Just(Comparator::GreaterThan),
        Just(Comparator::GreaterThanOrEqual),
    ]
}

/// Leaves with a non-zero amount, so none of them is redundant.
fn leaf_strategy() -> impl Strategy<Value = Logic> {
    prop_oneof![
        name_strategy().prop_map(Logic::item),
        (name_strategy(), 1_u32 .. 50).prop_map(|(name, count)| Logic::ItemCount(name, count)),
        (name_strategy(), 1_u8 ..= 100).prop_map(|(name, pct)| Logic::ItemPercent(name, pct)),
        name_strategy().prop_map(Logic::category),
        (name_strategy(), 1_u32 .. 50).prop_map(|(name, count)| Logic::CategoryCount(name, count)),
        (name_strategy(), 1_u8 ..= 100).prop_map(|(name, pct)| Logic::CategoryPercent(name, pct)),
        name_strategy().prop_map(Logic::region),
        name_strategy().prop_map(Logic::location),
        (name_strategy(), 1_u32 .. 500).prop_map(|(name, value)| Logic::ItemValue(name, value)),
        "[a-z]{1,8}".prop_map(Logic::yaml_enabled),
        "[a-z]{1,8}".prop_map(Logic::yaml_disabled),
        ("[a-z]{1,8}", comparator_strategy(), -100_i64 .. 100)
            .prop_map(|(setting, comparator, value)| Logic::yaml_compare(setting, comparator, value)),
        ("[a-z][A-Za-z]{0,8}", "[a-z0-9]{1,6}")
            .prop_filter("custom names must not shadow builtins", |(name, _)| {
                Builtin::from_name(name) == Builtin::Custom
            })
            .prop_map(|(name, args)| Logic::custom(name, args)),
    ]
}

/// Trees built through the simplifying operators.
fn logic_strategy() -> impl Strategy<Value = Logic> {
    leaf_strategy().prop_recursive(4, 32, 2, |inner| {
        prop_oneof![
            (inner.clone(), inner.clone()).prop_map(|(left, right)| left & right),
            (inner.clone(), inner.clone()).prop_map(|(left, right)| left | right),
            inner.clone().prop_map(Logic::opt_one),
            inner.prop_map(Logic::opt_all),
        ]
    })
}

/// Swaps the children of every binary node without simplifying.
fn mirror(logic: &Logic) -> Logic {
    match logic {
        Logic::And(left, right) => Logic::And(Box::new(mirror(right)), Box::new(mirror(left))),
        Logic::Or(left, right) => Logic::Or(Box::new(mirror(right)), Box::new(mirror(left))),
        Logic::OptOne(inner) => Logic::opt_one(mirror(inner)),
        Logic::OptAll(inner) => Logic::opt_all(mirror(inner)),
        other => other.clone(),
    }
}

fn hash_of(logic: &Logic) -> u64 {
    let mut hasher = DefaultHasher::new();
    logic.hash(&mut hasher);
    hasher.finish()
}

proptest! {
    #[test]
    fn absent_operand_is_identity(logic in logic_strategy()) {
        prop_assert_eq!(and(None, Some(logic.clone())), Some(logic.clone()));
        prop_assert_eq!(or(Some(logic.clone()), None), Some(logic));
    }

    #[test]
    fn combining_with_self_is_idempotent(logic in logic_strategy()) {
        prop_assert_eq!(logic.clone() & logic.clone(), logic.clone());
        prop_assert_eq!(logic.clone() | logic.clone(), logic);
    }

    #[test]
    fn leaf_combination_is_commutative(left in leaf_strategy(), right in leaf_strategy()) {
        prop_assert_eq!(left.clone() & right.clone(), right.clone() & left.clone());
        prop_assert_eq!(left.clone() | right.clone(), right | left);
    }

    #[test]
    fn disjunction_is_absorbed_by_its_operand(left in leaf_strategy(), right in leaf_strategy()) {
        let either = left.clone() | right.clone();
        prop_assert_eq!(either & left.clone(), left.clone());
        let both = left.clone() & right;
        prop_assert_eq!(both | left.clone(), left);
    }

    #[test]
    fn mirrored_trees_are_equal_with_equal_hashes(logic in logic_strategy()) {
        let mirrored = mirror(&logic);
        prop_assert_eq!(&mirrored, &logic);
        prop_assert_eq!(hash_of(&mirrored), hash_of(&logic));
    }

    #[test]
    fn rendering_ignores_child_order(logic in logic_strategy()) {
        prop_assert_eq!(mirror(&logic).to_string(), logic.to_string());
    }

    #[test]
    fn rendered_text_parses_back_to_the_same_text(logic in logic_strategy()) {
        let text = logic.to_string();
        let parsed = parse_logic(&text)
            .map_err(|error| TestCaseError::fail(format!("{text}: {error}")))?;
        prop_assert_eq!(parsed.to_string(), text);
    }
}
