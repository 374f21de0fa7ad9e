// crates/manual-logic/src/combine.rs
// ============================================================================
// Module: Logic Combinators
// Description: Simplifying AND/OR construction over optional operands.
// Purpose: Apply identity, idempotence, absorption, and one-step
//          re-association while composing requirement trees.
// Dependencies: crate::logic
// ============================================================================

//! ## Overview
//! Requirements are combined pairwise. An absent operand (`None`) is the
//! identity for both operators: the library never builds a literal "false",
//! so callers never combine with one.
//!
//! Each combination reports whether a rule fired through [`Step`]. The trial
//! in [`reassociate`] relies on that marker to prefer re-nesting a simplified
//! sub-result over growing a deeper default tree. The marker never leaves the
//! crate; it is not part of a node's identity.
//!
//! Rules, in order:
//! - `l ∘ l = l`
//! - zero-amount leaves: dropped under AND, absorbing under OR
//! - absorption: `(a ∨ b) ∧ a = a`, `(a ∧ b) ∨ a = a`
//! - chain idempotence: `(a ∧ b) ∧ a = a ∧ b`
//! - one trial combination inside each operand that is itself a same-kind chain

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::ops::BitAnd;
use std::ops::BitOr;

use crate::logic::Logic;

// ============================================================================
// SECTION: Junction
// ============================================================================

/// The two algebraic node kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Junction {
    /// Conjunction.
    And,
    /// Disjunction.
    Or,
}

impl Junction {
    /// Returns the opposite junction.
    const fn dual(self) -> Self {
        match self {
            Self::And => Self::Or,
            Self::Or => Self::And,
        }
    }

    /// Builds an unsimplified node of this kind.
    fn build(self, left: Logic, right: Logic) -> Logic {
        match self {
            Self::And => Logic::And(Box::new(left), Box::new(right)),
            Self::Or => Logic::Or(Box::new(left), Box::new(right)),
        }
    }

    /// Returns the children when `logic` is a node of this kind.
    fn split(self, logic: &Logic) -> Option<(&Logic, &Logic)> {
        match (self, logic) {
            (Self::And, Logic::And(left, right)) | (Self::Or, Logic::Or(left, right)) => {
                Some((left, right))
            }
            _ => None,
        }
    }

    /// Returns the keyword separating operands in requirement text.
    pub(crate) const fn separator(self) -> &'static str {
        match self {
            Self::And => " AND ",
            Self::Or => " OR ",
        }
    }
}

// ============================================================================
// SECTION: Combination Step
// ============================================================================

/// Outcome of a single combination.
#[derive(Debug, Clone)]
pub(crate) enum Step {
    /// A simplification rule produced the node.
    Simplified(Logic),
    /// The fallback produced a fresh binary node.
    Fresh(Logic),
}

impl Step {
    /// Returns `true` when a rule other than the fallback fired.
    pub(crate) const fn is_simplified(&self) -> bool {
        matches!(self, Self::Simplified(_))
    }

    /// Consumes the step and returns the node.
    pub(crate) fn into_logic(self) -> Logic {
        match self {
            Self::Simplified(logic) | Self::Fresh(logic) => logic,
        }
    }
}

// ============================================================================
// SECTION: Public API
// ============================================================================

/// Combines two optional requirements with AND.
///
/// An absent side yields the other side unchanged.
#[must_use]
pub fn and(left: Option<Logic>, right: Option<Logic>) -> Option<Logic> {
    combine_optional(Junction::And, left, right)
}

/// Combines two optional requirements with OR.
///
/// An absent side yields the other side unchanged.
#[must_use]
pub fn or(left: Option<Logic>, right: Option<Logic>) -> Option<Logic> {
    combine_optional(Junction::Or, left, right)
}

impl Logic {
    /// Folds every requirement with AND, starting from "no requirement".
    pub fn all<I, T>(requirements: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Self>>,
    {
        requirements.into_iter().fold(None, |acc, next| and(acc, next.into()))
    }

    /// Folds every requirement with OR, starting from "no requirement".
    pub fn any<I, T>(requirements: I) -> Option<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Self>>,
    {
        requirements.into_iter().fold(None, |acc, next| or(acc, next.into()))
    }
}

impl BitAnd for Logic {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self::Output {
        combine(Junction::And, self, rhs).into_logic()
    }
}

impl BitAnd<Option<Self>> for Logic {
    type Output = Self;

    fn bitand(self, rhs: Option<Self>) -> Self::Output {
        match rhs {
            Some(rhs) => self & rhs,
            None => self,
        }
    }
}

impl BitOr for Logic {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        combine(Junction::Or, self, rhs).into_logic()
    }
}

impl BitOr<Option<Self>> for Logic {
    type Output = Self;

    fn bitor(self, rhs: Option<Self>) -> Self::Output {
        match rhs {
            Some(rhs) => self | rhs,
            None => self,
        }
    }
}

// ============================================================================
// SECTION: Rules
// ============================================================================

/// Applies the identity element before delegating to [`combine`].
fn combine_optional(
    junction: Junction,
    left: Option<Logic>,
    right: Option<Logic>,
) -> Option<Logic> {
    match (left, right) {
        (None, other) | (other, None) => other,
        (Some(left), Some(right)) => Some(combine(junction, left, right).into_logic()),
    }
}

/// Combines two present operands.
pub(crate) fn combine(junction: Junction, left: Logic, right: Logic) -> Step {
    if let Some(logic) = simplify(junction, &left, &right) {
        return Step::Simplified(logic);
    }
    if let Some(logic) = reassociate(junction, &left, &right) {
        return Step::Simplified(logic);
    }
    Step::Fresh(junction.build(left, right))
}

/// Applies the local rules without probing into operands.
fn rules(junction: Junction, left: &Logic, right: &Logic) -> Step {
    simplify(junction, left, right)
        .map_or_else(|| Step::Fresh(junction.build(left.clone(), right.clone())), Step::Simplified)
}

/// Returns the simplified node when a local rule applies.
fn simplify(junction: Junction, left: &Logic, right: &Logic) -> Option<Logic> {
    if left == right {
        return Some(left.clone());
    }

    match junction {
        Junction::And if left.is_redundant() => return Some(right.clone()),
        Junction::And if right.is_redundant() => return Some(left.clone()),
        Junction::Or if left.is_redundant() => return Some(left.clone()),
        Junction::Or if right.is_redundant() => return Some(right.clone()),
        _ => {}
    }

    let dual = junction.dual();
    if let Some((a, b)) = dual.split(left)
        && (a == right || b == right)
    {
        return Some(right.clone());
    }
    if let Some((a, b)) = dual.split(right)
        && (a == left || b == left)
    {
        return Some(left.clone());
    }

    if let Some((a, b)) = junction.split(left)
        && (a == right || b == right)
    {
        return Some(left.clone());
    }
    if let Some((a, b)) = junction.split(right)
        && (a == left || b == left)
    {
        return Some(right.clone());
    }

    None
}

/// Probes each operand that is a same-kind chain once.
///
/// When `a ∘ right` simplifies for `left = a ∘ b`, the result is re-nested as
/// `simplified ∘ b` instead of `(a ∘ b) ∘ right`.
fn reassociate(junction: Junction, left: &Logic, right: &Logic) -> Option<Logic> {
    if let Some((a, b)) = junction.split(left) {
        let attempt = rules(junction, a, right);
        if attempt.is_simplified() {
            return Some(rules(junction, &attempt.into_logic(), b).into_logic());
        }
        let attempt = rules(junction, b, right);
        if attempt.is_simplified() {
            return Some(rules(junction, a, &attempt.into_logic()).into_logic());
        }
    }

    if let Some((c, d)) = junction.split(right) {
        let attempt = rules(junction, left, c);
        if attempt.is_simplified() {
            return Some(rules(junction, &attempt.into_logic(), d).into_logic());
        }
        let attempt = rules(junction, left, d);
        if attempt.is_simplified() {
            return Some(rules(junction, c, &attempt.into_logic()).into_logic());
        }
    }

    None
}
