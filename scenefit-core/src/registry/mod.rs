//! Static geometry: canvas zones, layout modes, per-mode budgets.

/// Density tiers that scale element and caption sizes by element count.
pub mod density;
/// Canvas, zones, typography and the registry itself.
pub mod geometry;
/// Layout modes and their budgets.
pub mod mode;
