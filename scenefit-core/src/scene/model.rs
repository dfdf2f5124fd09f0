use std::collections::HashSet;
use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::Point,
    foundation::error::{LayoutError, LayoutResult},
    registry::geometry::GeometryRegistry,
    registry::mode::LayoutMode,
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How unpositioned elements get their initial positions.
pub enum Placement {
    /// Force-directed simulation confined to the region.
    #[default]
    Auto,
    /// Hexagonal lattice slots nearest the region center, most important first.
    Hex,
    /// Evenly spaced rows, left to right, wrapping when a row is full.
    Row,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Position as fractions of the scene's region: `(0, 0)` is its top-left
/// corner, `(1, 1)` its bottom-right.
pub struct RelativePosition {
    /// Fraction of the region width, left to right.
    pub x: f64,
    /// Fraction of the region height, top to bottom.
    pub y: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Producer-side element record. Only `id` and `label` are required.
pub struct ElementDef {
    /// Identifier, unique within the scene.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Diameter in pixels; the mode's default size when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    /// Eviction priority, higher is kept longer. Defaults to 0.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<i32>,
    /// Pre-assigned pixel center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Point>,
    /// Pre-assigned center as fractions of the region; exclusive with `position`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relative_position: Option<RelativePosition>,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Producer-side relationship record.
pub struct RelationshipDef {
    /// One endpoint id.
    pub source: String,
    /// Other endpoint id.
    pub target: String,
    /// Optional edge caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Scene description exactly as the content producer sends it.
pub struct SceneDef {
    /// Layout mode the scene targets.
    pub layout_mode: LayoutMode,
    /// Region index within the mode.
    #[serde(default)]
    pub region: usize,
    /// Placement strategy for unpositioned elements.
    #[serde(default)]
    pub placement: Placement,
    /// Seed for placement jitter.
    #[serde(default)]
    pub seed: u64,
    /// Ordered elements.
    pub elements: Vec<ElementDef>,
    /// Relationships between elements.
    #[serde(default)]
    pub relationships: Vec<RelationshipDef>,
}

impl SceneDef {
    /// Parse a scene description from JSON.
    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Read and parse a scene description file.
    pub fn from_path(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read scene '{}'", path.display()))?;
        Self::from_json_str(&s)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// An atomic visual unit with a label and a size.
pub struct VisualElement {
    /// Identifier, unique within the scene.
    pub id: String,
    /// Display text.
    pub label: String,
    /// Diameter in pixels.
    pub size: f64,
    /// Pixel center, `None` until placed.
    pub position: Option<Point>,
    /// Eviction priority, higher is kept longer.
    pub importance: i32,
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Unordered connection between two elements.
pub struct Relationship {
    /// One endpoint id.
    pub source: String,
    /// Other endpoint id.
    pub target: String,
    /// Optional edge caption.
    pub label: Option<String>,
}

impl Relationship {
    /// Order-independent identity of the endpoint pair.
    pub fn key(&self) -> (&str, &str) {
        if self.source <= self.target {
            (&self.source, &self.target)
        } else {
            (&self.target, &self.source)
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// A boundary-checked scene ready for validation.
///
/// Elements and relationships are owned here; only the sanitizer changes them.
pub struct Scene {
    /// Layout mode the scene targets.
    pub layout_mode: LayoutMode,
    /// Region index within the mode.
    pub region: usize,
    /// Placement strategy for unpositioned elements.
    pub placement: Placement,
    /// Seed for placement jitter.
    pub seed: u64,
    /// Ordered elements.
    pub elements: Vec<VisualElement>,
    /// Relationships between elements.
    pub relationships: Vec<Relationship>,
}

impl Scene {
    /// Convert a producer record, rejecting malformed input.
    ///
    /// Missing sizes take the mode's default scaled by the density tier of
    /// the element count, and missing importance is 0. Relative positions
    /// resolve against the scene's region. Dangling relationships are *not*
    /// rejected here: they are a recoverable validation error the sanitizer
    /// resolves.
    pub fn from_def(def: SceneDef, registry: &GeometryRegistry) -> LayoutResult<Self> {
        def.layout_mode.validate()?;
        registry.region(def.layout_mode, def.region)?;
        let default_size = registry.default_element_size(def.layout_mode, def.elements.len());

        let mut elements = Vec::with_capacity(def.elements.len());
        for e in def.elements {
            let position = match (e.position, e.relative_position) {
                (Some(_), Some(_)) => {
                    return Err(LayoutError::malformed(format!(
                        "element '{}': position and relative_position are exclusive",
                        e.id
                    )));
                }
                (Some(p), None) => Some(p),
                (None, Some(rel)) => {
                    let inside = |v: f64| (0.0..=1.0).contains(&v);
                    if !inside(rel.x) || !inside(rel.y) {
                        return Err(LayoutError::malformed(format!(
                            "element '{}': relative_position must lie in [0, 1]",
                            e.id
                        )));
                    }
                    Some(registry.region_point(def.layout_mode, def.region, rel.x, rel.y)?)
                }
                (None, None) => None,
            };
            elements.push(VisualElement {
                id: e.id,
                label: e.label,
                size: e.size.unwrap_or(default_size),
                position,
                importance: e.importance.unwrap_or(0),
            });
        }

        let scene = Self {
            layout_mode: def.layout_mode,
            region: def.region,
            placement: def.placement,
            seed: def.seed,
            elements,
            relationships: def
                .relationships
                .into_iter()
                .map(|r| Relationship {
                    source: r.source,
                    target: r.target,
                    label: r.label,
                })
                .collect(),
        };
        scene.check(registry)?;
        Ok(scene)
    }

    /// Fatal-severity checks: ids, finite numbers, mode parameters, region index.
    pub fn check(&self, registry: &GeometryRegistry) -> LayoutResult<()> {
        self.layout_mode.validate()?;
        registry.region(self.layout_mode, self.region)?;

        let mut seen = HashSet::<&str>::with_capacity(self.elements.len());
        for (idx, e) in self.elements.iter().enumerate() {
            if e.id.trim().is_empty() {
                return Err(LayoutError::malformed(format!(
                    "elements[{idx}]: id must be non-empty"
                )));
            }
            if !seen.insert(e.id.as_str()) {
                return Err(LayoutError::malformed(format!(
                    "elements[{idx}]: duplicate id '{}'",
                    e.id
                )));
            }
            if !e.size.is_finite() {
                return Err(LayoutError::malformed(format!(
                    "element '{}': size must be finite",
                    e.id
                )));
            }
            if let Some(p) = e.position
                && (!p.x.is_finite() || !p.y.is_finite())
            {
                return Err(LayoutError::malformed(format!(
                    "element '{}': position must be finite",
                    e.id
                )));
            }
        }
        for (idx, r) in self.relationships.iter().enumerate() {
            if r.source.trim().is_empty() || r.target.trim().is_empty() {
                return Err(LayoutError::malformed(format!(
                    "relationships[{idx}]: source and target must be non-empty"
                )));
            }
        }
        Ok(())
    }

    /// Element by id.
    pub fn element(&self, id: &str) -> Option<&VisualElement> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// `true` when every element already has a position.
    pub fn is_fully_positioned(&self) -> bool {
        self.elements.iter().all(|e| e.position.is_some())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
