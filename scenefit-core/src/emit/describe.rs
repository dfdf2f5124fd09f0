use std::fmt::Write as _;

use crate::{
    foundation::core::{Rect, UnitBounds},
    registry::density::DensityTier,
    registry::geometry::GeometryRegistry,
    registry::mode::{Budget, LayoutMode},
    transform::coords::CoordinateTransform,
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One region in both coordinate spaces.
pub struct RegionDescription {
    /// Row-major region index.
    pub index: usize,
    /// Pixel rect (top-left origin, y down).
    pub pixels: Rect,
    /// Unit-space bounds (center origin, y up).
    pub units: UnitBounds,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Font guidance for captions.
pub struct TypographyHint {
    /// Caption font family.
    pub family: String,
    /// Caption size in points.
    pub caption_pt: f64,
    /// Approximate caption width at the label budget, in pixels.
    pub max_label_width: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Default element and caption size for element counts up to `up_to`.
pub struct DensityHint {
    /// Density tier.
    pub tier: DensityTier,
    /// Largest element count in the tier.
    pub up_to: usize,
    /// Diameter given to unsized elements, in pixels.
    pub element_size: f64,
    /// Caption size in points.
    pub caption_pt: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Machine-readable limits for one layout mode.
pub struct ConstraintDescription {
    /// Described mode.
    pub mode: LayoutMode,
    /// Budget in force for the mode.
    pub budget: Budget,
    /// Number of regions the content zone is split into.
    pub region_count: usize,
    /// Every region, row-major.
    pub regions: Vec<RegionDescription>,
    /// Caption typography.
    pub typography: TypographyHint,
    /// Sizing per density tier within the budget, fewest elements first.
    pub density: Vec<DensityHint>,
    /// Short imperative rules for upstream generators.
    pub guidance: Vec<String>,
}

impl ConstraintDescription {
    /// Render the guidance as a single text block.
    pub fn to_prompt_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "Layout mode: {} ({} {}{}).",
            self.mode,
            self.region_count,
            self.mode.region_noun(),
            if self.region_count == 1 { "" } else { "s" }
        );
        for line in &self.guidance {
            let _ = writeln!(out, "- {line}");
        }
        out
    }
}

/// Describe what `mode` allows under `registry`.
#[tracing::instrument(skip_all, fields(mode = %mode))]
pub fn describe(registry: &GeometryRegistry, mode: LayoutMode) -> ConstraintDescription {
    let budget = registry.budget(mode);
    let transform = CoordinateTransform::new(registry);
    let regions: Vec<RegionDescription> = registry
        .regions(mode)
        .into_iter()
        .enumerate()
        .map(|(index, pixels)| RegionDescription {
            index,
            pixels,
            units: transform.rect_to_backend_b(pixels),
        })
        .collect();

    let typo = registry.typography();
    let (label_w, _) = typo.caption_extent(budget.max_label_chars);
    let noun = mode.region_noun();

    let mut density: Vec<DensityHint> = Vec::new();
    for n in 1..=budget.max_elements {
        let d = registry.density(mode, n);
        let hint = DensityHint {
            tier: d.tier,
            up_to: n,
            element_size: registry.default_element_size(mode, n),
            caption_pt: d.caption_pt,
        };
        match density.last_mut() {
            Some(last) if last.tier == d.tier => *last = hint,
            _ => density.push(hint),
        }
    }

    let mut guidance = vec![
        format!("at most {} elements per {noun}", budget.max_elements),
        format!("labels of at most {} characters", budget.max_label_chars),
        format!(
            "element sizes between {} and {} px",
            budget.min_element_size, budget.max_element_size
        ),
        format!(
            "keep at least {} px between element edges",
            budget.min_spacing
        ),
    ];
    if let Some(first) = regions.first() {
        guidance.push(format!(
            "each {noun} is {:.0}x{:.0} px",
            first.pixels.width(),
            first.pixels.height()
        ));
    }
    if let (Some(first), Some(last)) = (density.first(), density.last())
        && density.len() > 1
    {
        guidance.push(format!(
            "fewer elements render larger: {:.0} px up to {} elements, {:.0} px at {}",
            first.element_size, first.up_to, last.element_size, last.up_to
        ));
    }
    if budget.max_elements <= 3 {
        guidance.push("prefer one idea per element; split anything larger".to_string());
    }

    ConstraintDescription {
        mode,
        budget,
        region_count: regions.len(),
        regions,
        typography: TypographyHint {
            family: typo.body_family.clone(),
            caption_pt: typo.caption_pt,
            max_label_width: label_w,
        },
        density,
        guidance,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/emit/describe.rs"]
mod tests;
