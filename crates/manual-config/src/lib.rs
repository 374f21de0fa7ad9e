// crates/manual-config/src/lib.rs
// ============================================================================
// Module: Manual Config Library
// Description: Configuration model and validation for Manual world builds.
// Purpose: Single source of truth for manual.toml semantics.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! `manual-config` defines the settings that steer world registration
//! (strict or lenient reference handling, the fallback item priority),
//! reachability expansion in generated documents, and game defaults.
//! Loading is fail-closed: oversized, non-utf-8, malformed, or inconsistent
//! files are rejected rather than partially applied.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
