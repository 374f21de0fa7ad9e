// crates/manual-logic/src/diagnostics.rs
// ============================================================================
// Module: Expansion Diagnostics
// Description: Observability hooks for reachability expansion.
// Purpose: Surface regions that expand to no requirement because no path
//          reaches them, without turning that case into an error.
// Dependencies: tracing
// ============================================================================

//! ## Overview
//! A region that cannot be reached from any starting region expands to "no
//! requirement", which silently drops the constraint. Expansion reports that
//! case (and every successful region expansion) through an
//! [`ExpansionDiagnostics`] sink so authoring tools can flag it.

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Sink for reachability expansion events.
pub trait ExpansionDiagnostics {
    /// Records that `region` was expanded from `paths` starting regions.
    fn region_expanded(&self, region: &str, paths: usize);
    /// Records that no starting region reaches `region`.
    fn unreachable_region(&self, region: &str);
}

/// No-op diagnostics sink.
///
/// # Invariants
/// - Events are discarded.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopDiagnostics;

impl ExpansionDiagnostics for NoopDiagnostics {
    fn region_expanded(&self, _region: &str, _paths: usize) {}

    fn unreachable_region(&self, _region: &str) {}
}

/// Diagnostics sink that emits `tracing` events.
///
/// Unreachable regions are logged at `warn`, expansions at `debug`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl ExpansionDiagnostics for TracingDiagnostics {
    fn region_expanded(&self, region: &str, paths: usize) {
        tracing::debug!(region, paths, "expanded region reachability");
    }

    fn unreachable_region(&self, region: &str) {
        tracing::warn!(region, "region is unreachable from every starting region");
    }
}
