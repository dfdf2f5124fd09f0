use std::path::Path;

use anyhow::Context as _;

use crate::{
    foundation::core::{Canvas, Point, Rect, rect_contains_rect, rects_overlap},
    foundation::error::{LayoutError, LayoutResult},
    registry::density::{Density, DensityTable},
    registry::mode::{Budget, BudgetTable, LayoutMode},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Named horizontal band of the canvas.
pub enum ZoneName {
    /// Heading band at the top.
    Title,
    /// Main band where regions live.
    Content,
    /// Caption band at the bottom.
    Footer,
}

impl std::str::FromStr for ZoneName {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "content" => Ok(Self::Content),
            "footer" => Ok(Self::Footer),
            other => Err(LayoutError::config(format!("unknown zone '{other}'"))),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Font families and point sizes shared by both backends.
pub struct Typography {
    /// Family used for titles.
    pub display_family: String,
    /// Family used for body text and labels.
    pub body_family: String,
    /// Family used for code and equations.
    pub mono_family: String,
    /// Title size in points.
    pub title_pt: f64,
    /// Body size in points.
    pub body_pt: f64,
    /// Caption/label size in points.
    pub caption_pt: f64,
    /// Average glyph advance as a fraction of the point size.
    pub advance_ratio: f64,
    /// Line height as a multiple of the point size.
    pub line_height: f64,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            display_family: "Poppins".to_string(),
            body_family: "Inter".to_string(),
            mono_family: "JetBrains Mono".to_string(),
            title_pt: 56.0,
            body_pt: 32.0,
            caption_pt: 28.0,
            advance_ratio: 0.55,
            line_height: 1.2,
        }
    }
}

impl Typography {
    /// Estimated pixel size of a single-line caption with `chars` characters.
    pub fn caption_extent(&self, chars: usize) -> (f64, f64) {
        self.caption_extent_at(self.caption_pt, chars)
    }

    /// [`Self::caption_extent`] at an explicit point size.
    pub fn caption_extent_at(&self, pt: f64, chars: usize) -> (f64, f64) {
        ((chars as f64) * pt * self.advance_ratio, pt * self.line_height)
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Fixed named color set (blackboard style), as `#rrggbb` strings.
pub struct Palette {
    /// Canvas background.
    pub background: String,
    /// Chalk colors keyed by name, in a stable order.
    pub chalk: Vec<(String, String)>,
}

impl Default for Palette {
    fn default() -> Self {
        let chalk = [
            ("white", "#ffffff"),
            ("blue", "#3b82f6"),
            ("green", "#10b981"),
            ("yellow", "#fbbf24"),
            ("red", "#ef4444"),
            ("purple", "#a78bfa"),
            ("orange", "#f97316"),
            ("cyan", "#06b6d4"),
        ];
        Self {
            background: "#000000".to_string(),
            chalk: chalk
                .iter()
                .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
                .collect(),
        }
    }
}

impl Palette {
    /// Look up a chalk color by name.
    pub fn color(&self, name: &str) -> Option<&str> {
        self.chalk
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Immutable canvas geometry, zones, budgets and style shared by every stage.
///
/// Construct once (usually via [`Default`] or [`GeometryRegistry::from_path`])
/// and pass by reference. Nothing in the engine mutates it, so it can be
/// shared freely across threads.
pub struct GeometryRegistry {
    /// Canvas dimensions in pixels.
    pub canvas: Canvas,
    /// Safe margin kept clear on every canvas edge.
    pub outer_padding: f64,
    /// Height of the title zone.
    pub title_height: f64,
    /// Height of the footer zone.
    pub footer_height: f64,
    /// Gap between neighbouring regions of a mode.
    pub region_gap: f64,
    /// Pixels per animation-space unit.
    pub pixels_per_unit: f64,
    /// Per-mode element budgets.
    pub budgets: BudgetTable,
    /// Size and caption scaling by how full a region is.
    pub density: DensityTable,
    /// Shared typography.
    pub typography: Typography,
    /// Shared color palette.
    pub palette: Palette,
}

impl Default for GeometryRegistry {
    fn default() -> Self {
        Self {
            canvas: Canvas {
                width: 1920,
                height: 1080,
            },
            outer_padding: 50.0,
            title_height: 100.0,
            footer_height: 50.0,
            region_gap: 10.0,
            pixels_per_unit: 135.0,
            budgets: BudgetTable::default(),
            density: DensityTable::default(),
            typography: Typography::default(),
            palette: Palette::default(),
        }
    }
}

impl GeometryRegistry {
    /// Parse and validate a registry from JSON. Missing fields take defaults.
    pub fn from_json_str(s: &str) -> LayoutResult<Self> {
        let reg: Self = serde_json::from_str(s)?;
        reg.validate()?;
        Ok(reg)
    }

    /// Read, parse and validate a registry JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> LayoutResult<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path)
            .with_context(|| format!("read geometry registry '{}'", path.display()))?;
        Self::from_json_str(&s)
    }

    /// Check zone, padding and scale invariants.
    pub fn validate(&self) -> LayoutResult<()> {
        if self.canvas.width == 0 || self.canvas.height == 0 {
            return Err(LayoutError::config("canvas width/height must be > 0"));
        }
        for (name, v) in [
            ("outer_padding", self.outer_padding),
            ("title_height", self.title_height),
            ("footer_height", self.footer_height),
            ("region_gap", self.region_gap),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(LayoutError::config(format!("{name} must be finite and >= 0")));
            }
        }
        if !self.pixels_per_unit.is_finite() || self.pixels_per_unit <= 0.0 {
            return Err(LayoutError::config("pixels_per_unit must be finite and > 0"));
        }
        let content = self.zone(ZoneName::Content);
        if content.width() <= 0.0 || content.height() <= 0.0 {
            return Err(LayoutError::config(
                "padding, title and footer leave no room for the content zone",
            ));
        }

        let safe = self.safe_area();
        let zones = [
            self.zone(ZoneName::Title),
            content,
            self.zone(ZoneName::Footer),
        ];
        for (i, z) in zones.iter().enumerate() {
            if !rect_contains_rect(safe, *z, 1e-9) {
                return Err(LayoutError::config(format!(
                    "zone {i} lies outside the padded canvas"
                )));
            }
            for other in &zones[i + 1..] {
                if rects_overlap(*z, *other) {
                    return Err(LayoutError::config("zones overlap"));
                }
            }
        }

        let t = &self.typography;
        for (name, v) in [
            ("title_pt", t.title_pt),
            ("body_pt", t.body_pt),
            ("caption_pt", t.caption_pt),
            ("advance_ratio", t.advance_ratio),
            ("line_height", t.line_height),
        ] {
            if !v.is_finite() || v <= 0.0 {
                return Err(LayoutError::config(format!(
                    "typography.{name} must be finite and > 0"
                )));
            }
        }
        self.budgets.validate()?;
        self.density.validate()
    }

    /// Canvas minus the outer padding on every side.
    pub fn safe_area(&self) -> Rect {
        let c = self.canvas.rect();
        let p = self.outer_padding;
        Rect::new(c.x0 + p, c.y0 + p, c.x1 - p, c.y1 - p)
    }

    /// Pixel rectangle of a named zone.
    pub fn zone(&self, name: ZoneName) -> Rect {
        let safe = self.safe_area();
        match name {
            ZoneName::Title => Rect::new(safe.x0, safe.y0, safe.x1, safe.y0 + self.title_height),
            ZoneName::Content => Rect::new(
                safe.x0,
                safe.y0 + self.title_height,
                safe.x1,
                safe.y1 - self.footer_height,
            ),
            ZoneName::Footer => Rect::new(safe.x0, safe.y1 - self.footer_height, safe.x1, safe.y1),
        }
    }

    /// All regions of `mode`, in row-major order.
    pub fn regions(&self, mode: LayoutMode) -> Vec<Rect> {
        mode.subdivide(self.zone(ZoneName::Content), self.region_gap)
    }

    /// Region `index` of `mode`.
    pub fn region(&self, mode: LayoutMode, index: usize) -> LayoutResult<Rect> {
        self.regions(mode).get(index).copied().ok_or_else(|| {
            LayoutError::malformed(format!(
                "region {index} out of range for layout mode {mode} ({} regions)",
                mode.region_count()
            ))
        })
    }

    /// Element budget for `mode`.
    pub fn budget(&self, mode: LayoutMode) -> Budget {
        self.budgets.for_mode(mode)
    }

    /// Density tier of `count` elements under `mode`'s budget.
    pub fn density(&self, mode: LayoutMode, count: usize) -> Density {
        self.density.select(count, self.budget(mode).max_elements)
    }

    /// Diameter for elements given without one, scaled by the density tier.
    ///
    /// Counts over budget are sized as a full region, since eviction brings
    /// them down to it. The result stays inside the budget's size range.
    pub fn default_element_size(&self, mode: LayoutMode, count: usize) -> f64 {
        let budget = self.budget(mode);
        let density = self.density(mode, count.min(budget.max_elements));
        (budget.default_element_size * density.size_scale)
            .clamp(budget.min_element_size, budget.max_element_size)
    }

    /// Point at fractions of the content zone: `(0, 0)` is its top-left
    /// corner, `(1, 1)` its bottom-right.
    pub fn content_point(&self, x_frac: f64, y_frac: f64) -> Point {
        fraction_of(self.zone(ZoneName::Content), x_frac, y_frac)
    }

    /// Point at fractions of region `index` of `mode`, measured like
    /// [`Self::content_point`].
    pub fn region_point(
        &self,
        mode: LayoutMode,
        index: usize,
        x_frac: f64,
        y_frac: f64,
    ) -> LayoutResult<Point> {
        Ok(fraction_of(self.region(mode, index)?, x_frac, y_frac))
    }

    /// Shared typography.
    pub fn typography(&self) -> &Typography {
        &self.typography
    }

    /// Shared palette.
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}

fn fraction_of(r: Rect, x_frac: f64, y_frac: f64) -> Point {
    Point::new(r.x0 + r.width() * x_frac, r.y0 + r.height() * y_frac)
}

#[cfg(test)]
#[path = "../../tests/unit/registry/geometry.rs"]
mod tests;
