// crates/manual-world/src/names.rs
// ============================================================================
// Module: Name Sanitization
// Description: Character rules for item, game, creator, and yaml names.
// Purpose: Keep names that end up inside requirement text or file names
//          parseable by the randomizer.
// Dependencies: crate::error, serde, tracing
// ============================================================================

//! ## Overview
//! Item names may not contain `:` or `|` because both delimit clauses in
//! requirement text. Game and creator names form the world's file name, so
//! whitespace and `"*/:<>?\_|` are disallowed. Yaml setting names may not
//! contain `'`, `(`, or `)`.
//!
//! Strict worlds reject a bad name; lenient worlds strip the offending
//! characters and log a warning.

use std::borrow::Cow;
use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::error::WorldError;

// ============================================================================
// SECTION: Name Kinds
// ============================================================================

/// Kind of name being sanitized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NameKind {
    /// Item name.
    Item,
    /// Game name.
    Game,
    /// Creator name.
    Creator,
    /// Yaml setting name.
    Yaml,
}

impl NameKind {
    /// Returns `true` when `character` may not appear in this kind of name.
    #[must_use]
    pub fn disallows(self, character: char) -> bool {
        match self {
            Self::Item => matches!(character, ':' | '|'),
            Self::Game | Self::Creator => {
                character.is_whitespace() || "\"*/:<>?\\_|".contains(character)
            }
            Self::Yaml => matches!(character, '\'' | '(' | ')'),
        }
    }

    /// Returns the lowercase label used in messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Item => "item",
            Self::Game => "game",
            Self::Creator => "creator",
            Self::Yaml => "yaml",
        }
    }
}

impl fmt::Display for NameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// SECTION: Sanitization
// ============================================================================

/// Checks or repairs `name` according to `kind`.
///
/// Returns the name unchanged (borrowed) when it is already valid.
///
/// # Errors
/// Returns [`WorldError::InvalidName`] in strict mode when a disallowed
/// character is present.
pub fn sanitize(kind: NameKind, name: &str, strict: bool) -> Result<Cow<'_, str>, WorldError> {
    let Some(character) = name.chars().find(|character| kind.disallows(*character)) else {
        return Ok(Cow::Borrowed(name));
    };
    if strict {
        return Err(WorldError::InvalidName {
            kind,
            name: name.to_string(),
            character,
        });
    }
    let cleaned: String = name.chars().filter(|character| !kind.disallows(*character)).collect();
    tracing::warn!(kind = kind.label(), name, cleaned = cleaned.as_str(), "stripped disallowed characters");
    Ok(Cow::Owned(cleaned))
}

// ============================================================================
// SECTION: Tests
// ============================================================================
