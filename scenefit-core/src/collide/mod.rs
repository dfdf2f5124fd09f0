//! Layout prediction: seeding, force simulation, collision and label checks.

pub(crate) mod labels;
pub(crate) mod placement;
/// Collision prediction over a scene.
pub mod predict;
/// Force-directed relaxation.
pub mod simulate;

pub use labels::{LABEL_GAP, LabelAnchor, LabelPlacement};
