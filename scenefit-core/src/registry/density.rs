use std::fmt;

use crate::foundation::error::{LayoutError, LayoutResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How crowded a region is relative to its element budget.
pub enum DensityTier {
    /// Plenty of room; full-size elements and captions.
    Comfortable,
    /// Somewhat busy.
    Moderate,
    /// Close to the budget.
    Tight,
    /// At the budget.
    VeryTight,
    /// Over every band; reported as a warning.
    Overfull,
}

impl DensityTier {
    /// Snake-case name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Comfortable => "comfortable",
            Self::Moderate => "moderate",
            Self::Tight => "tight",
            Self::VeryTight => "very_tight",
            Self::Overfull => "overfull",
        }
    }
}

impl fmt::Display for DensityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Styling applied to every element of a region in one tier.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TierStyle {
    /// Multiplier on the budget's default element size.
    pub size_scale: f64,
    /// Caption size in points.
    pub caption_pt: f64,
}

/// One bounded tier: covers fills up to and including `max_fill`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TierBand {
    /// Largest `elements / max_elements` ratio this band covers.
    pub max_fill: f64,
    /// Styling inside the band.
    #[serde(flatten)]
    pub style: TierStyle,
}

/// Selected tier for a concrete element count.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Density {
    /// Tier the count falls into.
    pub tier: DensityTier,
    /// `elements / max_elements`.
    pub fill: f64,
    /// Multiplier on the budget's default element size.
    pub size_scale: f64,
    /// Caption size in points.
    pub caption_pt: f64,
}

/// Density bands in ascending fill order, plus the style past the last one.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct DensityTable {
    /// First band.
    pub comfortable: TierBand,
    /// Second band.
    pub moderate: TierBand,
    /// Third band.
    pub tight: TierBand,
    /// Fourth band.
    pub very_tight: TierBand,
    /// Anything fuller than `very_tight`.
    pub overfull: TierStyle,
}

impl Default for DensityTable {
    fn default() -> Self {
        let band = |max_fill, size_scale, caption_pt| TierBand {
            max_fill,
            style: TierStyle {
                size_scale,
                caption_pt,
            },
        };
        Self {
            comfortable: band(0.5, 1.0, 28.0),
            moderate: band(0.7, 0.9, 28.0),
            tight: band(0.9, 0.8, 26.0),
            very_tight: band(1.0, 0.7, 24.0),
            overfull: TierStyle {
                size_scale: 0.6,
                caption_pt: 20.0,
            },
        }
    }
}

impl DensityTable {
    fn bands(&self) -> [(DensityTier, TierBand); 4] {
        [
            (DensityTier::Comfortable, self.comfortable),
            (DensityTier::Moderate, self.moderate),
            (DensityTier::Tight, self.tight),
            (DensityTier::VeryTight, self.very_tight),
        ]
    }

    /// First band whose `max_fill` covers `count / max_elements`; `Overfull`
    /// past the last band.
    pub fn select(&self, count: usize, max_elements: usize) -> Density {
        let fill = count as f64 / max_elements.max(1) as f64;
        let (tier, style) = self
            .bands()
            .into_iter()
            .find(|(_, b)| fill <= b.max_fill)
            .map(|(t, b)| (t, b.style))
            .unwrap_or((DensityTier::Overfull, self.overfull));
        Density {
            tier,
            fill,
            size_scale: style.size_scale,
            caption_pt: style.caption_pt,
        }
    }

    pub(crate) fn validate(&self) -> LayoutResult<()> {
        let finite_pos = |v: f64| v.is_finite() && v > 0.0;
        let mut prev = 0.0;
        for (tier, band) in self.bands() {
            if !finite_pos(band.max_fill) || band.max_fill <= prev {
                return Err(LayoutError::config(format!(
                    "density.{tier}: max_fill must be finite, > 0 and above the previous band"
                )));
            }
            prev = band.max_fill;
        }
        let styles = self
            .bands()
            .map(|(t, b)| (t, b.style))
            .into_iter()
            .chain([(DensityTier::Overfull, self.overfull)]);
        for (tier, style) in styles {
            if !finite_pos(style.size_scale) || !finite_pos(style.caption_pt) {
                return Err(LayoutError::config(format!(
                    "density.{tier}: size_scale and caption_pt must be finite and > 0"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/density.rs"]
mod tests;
