//! scenefit is a layout constraint engine for generated educational video.
//!
//! Scenes arrive from an upstream generator as a list of labeled elements and
//! relationships, and frequently overfill the frame, collide or run labels off
//! the canvas. scenefit checks such a scene against the fixed geometry of a
//! 1920×1080 canvas, predicts where a force layout would put everything and
//! corrects what it can, so that a renderer never receives an illegible frame.
//!
//! # Pipeline overview
//!
//! 1. **Check**: fatal input problems (`Scene::check`) abort with a [`LayoutError`]
//! 2. **Validate**: budget violations become a [`ValidationResult`]
//! 3. **Predict**: seeded placement plus force simulation, giving a [`CollisionReport`]
//! 4. **Sanitize**: eviction, clamping, truncation and push-apart, logged in a [`SanitizationLog`]
//! 5. **Finalize**: positions in both pixel and unit space ([`FinalizedScene`])
//!
//! [`process`] runs all of it. [`describe`] tells a generator what a layout
//! mode allows before it produces a scene.
//!
//! Everything is deterministic: the same scene, seed and config always give
//! the same output.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Layout prediction and collision checks.
pub mod collide;
/// Constraint descriptions for upstream generators.
pub mod emit;
/// End-to-end processing.
pub mod pipeline;
/// Geometry registry and layout modes.
pub mod registry;
/// Deterministic scene correction.
pub mod sanitize;
/// Scene model.
pub mod scene;
/// Coordinate conversion between rendering backends.
pub mod transform;
/// Structural validation.
pub mod validate;

pub use crate::foundation::core::{Affine, Canvas, Point, Rect, UnitBounds, UnitPoint, Vec2};
pub use crate::foundation::error::{LayoutError, LayoutResult};
pub use crate::foundation::math::Rng64;

pub use crate::collide::predict::{Collision, CollisionReport, ElementPosition, predict};
pub use crate::collide::simulate::{ForceParams, SimulationStats};
pub use crate::collide::{LabelAnchor, LabelPlacement};
pub use crate::emit::describe::{ConstraintDescription, RegionDescription, TypographyHint, describe};
pub use crate::pipeline::{
    EngineConfig, FinalizedScene, LayoutOutcome, PlacedElement, process, process_batch,
    process_scene,
};
pub use crate::registry::density::{Density, DensityTable, DensityTier, TierBand, TierStyle};
pub use crate::registry::geometry::{GeometryRegistry, Palette, Typography, ZoneName};
pub use crate::registry::mode::{Budget, BudgetTable, LayoutMode, MAX_SUBDIVISIONS};
pub use crate::sanitize::sanitizer::{
    Correction, CorrectionKind, ELLIPSIS, SanitizationLog, SanitizeParams, sanitize, truncate_label,
};
pub use crate::scene::model::{
    ElementDef, Placement, Relationship, RelationshipDef, RelativePosition, Scene, SceneDef,
    VisualElement,
};
pub use crate::transform::coords::CoordinateTransform;
pub use crate::validate::issue::{Issue, IssueKind, Severity};
pub use crate::validate::validator::{ValidationResult, validate};
