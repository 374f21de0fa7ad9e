// crates/manual-world/src/error.rs
// ============================================================================
// Module: World Errors
// Description: Failures raised while registering entities or building files.
// Purpose: One error type for every fallible world operation.
// Dependencies: manual-config, manual-logic, thiserror
// ============================================================================

//! ## Overview
//! Registration failures abort the registration they occur in; the world is
//! left exactly as it was before the call.

use manual_config::ConfigError;
use manual_logic::UnresolvedReference;
use thiserror::Error;

use crate::names::NameKind;

/// World registry and document errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// A requirement or list names an entity that is not registered.
    #[error(transparent)]
    Unresolved(#[from] UnresolvedReference),
    /// A name contains a character its kind does not allow.
    #[error("{kind} name \"{name}\" contains disallowed character '{character}'")]
    InvalidName {
        /// Kind of name that was checked.
        kind: NameKind,
        /// The rejected name.
        name: String,
        /// First disallowed character.
        character: char,
    },
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// A document could not be encoded.
    #[error("document {file} could not be encoded: {message}")]
    Encode {
        /// Document file name.
        file: &'static str,
        /// Encoder message.
        message: String,
    },
    /// The output directory is not a usable path.
    #[error("invalid output path: {path}")]
    OutputPath {
        /// Rejected path.
        path: String,
    },
    /// A document could not be written.
    #[error("document io error at {path}: {message}")]
    Io {
        /// Target path.
        path: String,
        /// Io error message.
        message: String,
    },
}
