// crates/manual-logic/src/yaml.rs
// ============================================================================
// Module: Yaml Reference Collection
// Description: Collects the yaml settings a requirement depends on.
// Purpose: Feed the settings template with every option named by logic.
// Dependencies: crate::logic, serde, smallvec
// ============================================================================

//! ## Overview
//! Collection preserves left-to-right order and keeps duplicates; callers that
//! need a set deduplicate afterwards. A requirement without any yaml leaf
//! yields `None`, never an empty collection.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;
use smallvec::SmallVec;

use crate::logic::Builtin;
use crate::logic::Logic;

// ============================================================================
// SECTION: Types
// ============================================================================

/// A yaml setting named by a requirement, with the builtin that names it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct YamlReference {
    /// `YamlEnabled`, `YamlDisabled`, or `YamlCompare`.
    pub builtin: Builtin,
    /// Setting name.
    pub setting: String,
}

/// Inline-first list of yaml references.
pub type YamlReferences = SmallVec<[YamlReference; 4]>;

// ============================================================================
// SECTION: Collection
// ============================================================================

impl Logic {
    /// Collects the yaml settings referenced anywhere in the requirement.
    ///
    /// Returns `None` when there are none.
    #[must_use]
    pub fn yaml_settings(&self) -> Option<YamlReferences> {
        let mut found = YamlReferences::new();
        self.collect_yaml(&mut found);
        (!found.is_empty()).then_some(found)
    }

    /// Appends yaml references in left-to-right order.
    fn collect_yaml(&self, found: &mut YamlReferences) {
        let (builtin, setting) = match self {
            Self::And(left, right) | Self::Or(left, right) => {
                left.collect_yaml(found);
                right.collect_yaml(found);
                return;
            }
            Self::OptOne(inner) | Self::OptAll(inner) => {
                inner.collect_yaml(found);
                return;
            }
            Self::YamlEnabled(setting) => (Builtin::YamlEnabled, setting),
            Self::YamlDisabled(setting) => (Builtin::YamlDisabled, setting),
            Self::YamlCompare {
                setting,
                ..
            } => (Builtin::YamlCompare, setting),
            _ => return,
        };
        found.push(YamlReference {
            builtin,
            setting: setting.clone(),
        });
    }
}
