// crates/manual-logic/src/serde_support.rs
// ============================================================================
// Module: Logic Serde Support
// Description: Serialize requirements as their textual form.
// Purpose: Embed `Logic` in world documents exactly as the randomizer reads it.
// Dependencies: crate::{dsl, logic}, serde
// ============================================================================

//! ## Overview
//! A [`Logic`] serializes as the string produced by `Display` and
//! deserializes through [`parse_logic`](crate::dsl::parse_logic), so a
//! document field such as `"requires": "|Sword| AND |Shield|"` maps directly
//! onto a tree.

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de;

use crate::dsl::parse_logic;
use crate::logic::Logic;

impl Serialize for Logic {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Logic {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_logic(&text).map_err(de::Error::custom)
    }
}
