//! End-to-end processing: fatal checks, validation, prediction,
//! sanitization, re-validation and conversion into both coordinate spaces.

use std::path::Path;

use anyhow::Context;
use rayon::prelude::*;

use crate::{
    collide::labels::LabelAnchor,
    collide::predict::predict,
    collide::simulate::ForceParams,
    foundation::core::{Point, Rect, UnitBounds, UnitPoint},
    foundation::error::{LayoutError, LayoutResult},
    registry::geometry::GeometryRegistry,
    registry::mode::LayoutMode,
    sanitize::sanitizer::{SanitizationLog, SanitizeParams, sanitize},
    scene::model::{Relationship, Scene, SceneDef},
    transform::coords::CoordinateTransform,
    validate::validator::{ValidationResult, validate},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Everything the engine needs, passed explicitly by reference.
pub struct EngineConfig {
    /// Canvas, zones, budgets and typography.
    pub geometry: GeometryRegistry,
    /// Force simulation tuning.
    pub forces: ForceParams,
    /// Sanitizer tuning.
    pub sanitize: SanitizeParams,
}

impl EngineConfig {
    /// Parse and validate a config from JSON. Missing sections take defaults.
    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read, parse and validate a config JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read engine config '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Validate every section.
    pub fn validate(&self) -> LayoutResult<()> {
        self.geometry.validate()?;
        self.forces.validate()?;
        self.sanitize.validate()
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One element in both coordinate spaces.
pub struct PlacedElement {
    /// Element id.
    pub id: String,
    /// Final label.
    pub label: String,
    /// Diameter in pixels.
    pub size: f64,
    /// Importance carried through from the input.
    pub importance: i32,
    /// Pixel center for backend A.
    pub pixel: Point,
    /// Unit center for backend B.
    pub unit: UnitPoint,
    /// Diameter in units.
    pub unit_size: f64,
    /// Chosen label side; `None` when the label could not be placed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_anchor: Option<LabelAnchor>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Fully positioned scene ready for either rendering backend.
pub struct FinalizedScene {
    /// Layout mode.
    pub layout_mode: LayoutMode,
    /// Region index.
    pub region: usize,
    /// Region in pixels.
    pub region_pixels: Rect,
    /// Region in units.
    pub region_units: UnitBounds,
    /// Elements in scene order.
    pub elements: Vec<PlacedElement>,
    /// Relationships that survived sanitization.
    pub relationships: Vec<Relationship>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Result of [`process`].
pub struct LayoutOutcome {
    /// Finalized scene in both coordinate spaces.
    pub scene: FinalizedScene,
    /// Sanitized scene in pixel space.
    pub sanitized: Scene,
    /// Corrections and unresolved issues.
    pub log: SanitizationLog,
    /// Validation of the input scene.
    pub initial: ValidationResult,
    /// Validation of the sanitized scene.
    pub final_validation: ValidationResult,
}

impl LayoutOutcome {
    /// `true` if errors remain after sanitization.
    pub fn has_unresolved_errors(&self) -> bool {
        !self.final_validation.valid || self.log.has_unresolved_errors()
    }

    /// `true` if any warning survived sanitization.
    pub fn has_unresolved_warnings(&self) -> bool {
        !self.log.unresolved.is_empty() || !self.final_validation.warnings.is_empty()
    }
}

/// Build a scene from its definition and run the whole pipeline.
pub fn process(config: &EngineConfig, def: SceneDef) -> LayoutResult<LayoutOutcome> {
    let scene = Scene::from_def(def, &config.geometry)?;
    process_scene(config, &scene)
}

/// Run the whole pipeline on an already built scene.
#[tracing::instrument(skip_all, fields(mode = %scene.layout_mode, elements = scene.elements.len()))]
pub fn process_scene(config: &EngineConfig, scene: &Scene) -> LayoutResult<LayoutOutcome> {
    let reg = &config.geometry;
    scene.check(reg)?;

    let initial = validate(reg, scene)?;
    let report = predict(reg, &config.forces, scene)?;
    let (sanitized, log) = sanitize(
        reg,
        &config.forces,
        &config.sanitize,
        scene,
        &initial,
        &report,
    )?;
    let final_validation = validate(reg, &sanitized)?;
    if !final_validation.valid {
        tracing::warn!(
            errors = final_validation.errors.len(),
            "sanitized scene still has errors"
        );
    }

    let finalized = finalize(config, &sanitized)?;
    tracing::debug!(
        corrections = log.corrections.len(),
        unresolved = log.unresolved.len(),
        "scene processed"
    );
    Ok(LayoutOutcome {
        scene: finalized,
        sanitized,
        log,
        initial,
        final_validation,
    })
}

/// Process independent scenes on a dedicated pool. Output order matches
/// input order; each scene fails or succeeds on its own.
pub fn process_batch(
    config: &EngineConfig,
    defs: Vec<SceneDef>,
    threads: Option<usize>,
) -> LayoutResult<Vec<LayoutResult<LayoutOutcome>>> {
    let pool = build_thread_pool(threads)?;
    tracing::debug!(scenes = defs.len(), threads = pool.current_num_threads(), "batch");
    Ok(pool.install(|| {
        defs.into_par_iter()
            .map(|def| process(config, def))
            .collect()
    }))
}

fn finalize(config: &EngineConfig, scene: &Scene) -> LayoutResult<FinalizedScene> {
    let reg = &config.geometry;
    let region = reg.region(scene.layout_mode, scene.region)?;
    let xf = CoordinateTransform::new(reg);
    // Anchors of the final positions; the sanitizer's last prediction
    // already settled them but is not part of its output.
    let labels = predict(reg, &config.forces, scene)?.labels;

    let elements = scene
        .elements
        .iter()
        .map(|e| {
            let pixel = e.position.ok_or_else(|| {
                LayoutError::malformed(format!(
                    "element '{}' has no position after sanitization",
                    e.id
                ))
            })?;
            Ok(PlacedElement {
                id: e.id.clone(),
                label: e.label.clone(),
                size: e.size,
                importance: e.importance,
                pixel: xf.to_backend_a(pixel),
                unit: xf.to_backend_b(pixel),
                unit_size: xf.length_to_units(e.size),
                label_anchor: labels.iter().find(|l| l.id == e.id).and_then(|l| l.anchor),
            })
        })
        .collect::<LayoutResult<Vec<_>>>()?;

    Ok(FinalizedScene {
        layout_mode: scene.layout_mode,
        region: scene.region,
        region_pixels: region,
        region_units: xf.rect_to_backend_b(region),
        elements,
        relationships: scene.relationships.clone(),
    })
}

fn build_thread_pool(threads: Option<usize>) -> LayoutResult<rayon::ThreadPool> {
    if threads == Some(0) {
        return Err(LayoutError::config("batch 'threads' must be >= 1 when set"));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| LayoutError::config(format!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
