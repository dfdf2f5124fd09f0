use std::fmt;
use std::str::FromStr;

use crate::foundation::core::Rect;
use crate::foundation::error::{LayoutError, LayoutResult};

/// Upper bound on steps/rows/cols; anything larger cannot hold a legible element.
pub const MAX_SUBDIVISIONS: u32 = 32;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Strategy for dividing the content zone into regions.
pub enum LayoutMode {
    /// One region covering the whole content zone.
    #[default]
    Full,
    /// Two side-by-side regions.
    Split,
    /// `steps` regions stacked vertically.
    StepByStep {
        /// Number of stacked regions.
        steps: u32,
    },
    /// `rows × cols` cells in row-major order.
    Grid {
        /// Number of rows.
        rows: u32,
        /// Number of columns.
        cols: u32,
    },
}

impl LayoutMode {
    /// Check mode parameters. Zero or absurd subdivision counts are malformed input.
    pub fn validate(self) -> LayoutResult<()> {
        let check = |name: &str, v: u32| {
            if v == 0 || v > MAX_SUBDIVISIONS {
                Err(LayoutError::malformed(format!(
                    "layout mode {name} must be in 1..={MAX_SUBDIVISIONS}, got {v}"
                )))
            } else {
                Ok(())
            }
        };
        match self {
            Self::Full | Self::Split => Ok(()),
            Self::StepByStep { steps } => check("steps", steps),
            Self::Grid { rows, cols } => {
                check("rows", rows)?;
                check("cols", cols)
            }
        }
    }

    /// Number of regions this mode produces.
    pub fn region_count(self) -> usize {
        match self {
            Self::Full => 1,
            Self::Split => 2,
            Self::StepByStep { steps } => steps as usize,
            Self::Grid { rows, cols } => (rows as usize) * (cols as usize),
        }
    }

    /// Stable snake_case kind name, used for budgets and diagnostics.
    pub fn kind_name(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Split => "split",
            Self::StepByStep { .. } => "step_by_step",
            Self::Grid { .. } => "grid",
        }
    }

    /// Human noun for one region of this mode ("step", "cell", ...).
    pub fn region_noun(self) -> &'static str {
        match self {
            Self::Full => "scene",
            Self::Split => "panel",
            Self::StepByStep { .. } => "step",
            Self::Grid { .. } => "cell",
        }
    }

    /// Subdivide `content` into this mode's regions, separated by `gap`.
    ///
    /// The last region in each direction is snapped to the content edge so
    /// region extents plus gaps always sum to the content extent.
    pub fn subdivide(self, content: Rect, gap: f64) -> Vec<Rect> {
        let (rows, cols) = match self {
            Self::Full => (1, 1),
            Self::Split => (1, 2),
            Self::StepByStep { steps } => (steps.max(1), 1),
            Self::Grid { rows, cols } => (rows.max(1), cols.max(1)),
        };
        let ys = split_span(content.y0, content.y1, rows as usize, gap);
        let xs = split_span(content.x0, content.x1, cols as usize, gap);
        let mut out = Vec::with_capacity(ys.len() * xs.len());
        for &(y0, y1) in &ys {
            for &(x0, x1) in &xs {
                out.push(Rect::new(x0, y0, x1, y1));
            }
        }
        out
    }
}

fn split_span(start: f64, end: f64, n: usize, gap: f64) -> Vec<(f64, f64)> {
    let total = (end - start).max(0.0);
    let gaps = (n.saturating_sub(1) as f64) * gap;
    let each = ((total - gaps) / n as f64).max(0.0);
    (0..n)
        .map(|i| {
            let a = start + (i as f64) * (each + gap);
            let b = if i + 1 == n { end } else { a + each };
            (a, b)
        })
        .collect()
}

impl fmt::Display for LayoutMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::Full => write!(f, "full"),
            Self::Split => write!(f, "split"),
            Self::StepByStep { steps } => write!(f, "step_by_step:{steps}"),
            Self::Grid { rows, cols } => write!(f, "grid:{rows}x{cols}"),
        }
    }
}

impl FromStr for LayoutMode {
    type Err = LayoutError;

    /// Parse `full`, `split`, `step_by_step[:N]` or `grid[:RxC]`.
    ///
    /// Kind names are matched case-insensitively with `_`/`-` ignored, so
    /// `stepByStep:4` is accepted too. Defaults: 3 steps, 2×2 grid.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, arg) = match s.split_once(':') {
            Some((k, a)) => (k, Some(a.trim())),
            None => (s, None),
        };
        let kind: String = kind
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();
        let parse_u32 = |v: &str| {
            v.trim().parse::<u32>().map_err(|_| {
                LayoutError::malformed(format!("invalid layout mode argument '{v}' in '{s}'"))
            })
        };

        let mode = match (kind.as_str(), arg) {
            ("full", None) => Self::Full,
            ("split", None) => Self::Split,
            ("stepbystep" | "steps", None) => Self::StepByStep { steps: 3 },
            ("stepbystep" | "steps", Some(a)) => Self::StepByStep {
                steps: parse_u32(a)?,
            },
            ("grid", None) => Self::Grid { rows: 2, cols: 2 },
            ("grid", Some(a)) => {
                let (r, c) = a.split_once(['x', 'X']).ok_or_else(|| {
                    LayoutError::malformed(format!("grid mode expects ROWSxCOLS, got '{a}'"))
                })?;
                Self::Grid {
                    rows: parse_u32(r)?,
                    cols: parse_u32(c)?,
                }
            }
            _ => {
                return Err(LayoutError::malformed(format!(
                    "unknown layout mode '{s}' (expected full, split, step_by_step[:N], grid[:RxC])"
                )));
            }
        };
        mode.validate()?;
        Ok(mode)
    }
}

/// Numeric limits for one layout mode. Sizes and spacing are in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Budget {
    /// Maximum number of elements per region.
    pub max_elements: usize,
    /// Maximum label length in characters.
    pub max_label_chars: usize,
    /// Smallest allowed element diameter.
    pub min_element_size: f64,
    /// Largest allowed element diameter.
    pub max_element_size: f64,
    /// Minimum clear distance between two element boxes.
    pub min_spacing: f64,
    /// Diameter assigned when the producer omits one.
    pub default_element_size: f64,
    /// Length labels are cut to when no anchor can place them.
    pub fallback_label_chars: usize,
}

impl Budget {
    pub(crate) fn validate(&self, name: &str) -> LayoutResult<()> {
        let finite_pos = |v: f64| v.is_finite() && v > 0.0;
        if self.max_elements == 0 {
            return Err(LayoutError::config(format!(
                "budget {name}: max_elements must be > 0"
            )));
        }
        if self.max_label_chars < 2 {
            return Err(LayoutError::config(format!(
                "budget {name}: max_label_chars must be >= 2"
            )));
        }
        if !finite_pos(self.min_element_size)
            || !finite_pos(self.max_element_size)
            || self.min_element_size > self.max_element_size
        {
            return Err(LayoutError::config(format!(
                "budget {name}: element size range must be finite, > 0 and ordered"
            )));
        }
        if !self.min_spacing.is_finite() || self.min_spacing < 0.0 {
            return Err(LayoutError::config(format!(
                "budget {name}: min_spacing must be finite and >= 0"
            )));
        }
        if !(self.min_element_size..=self.max_element_size).contains(&self.default_element_size) {
            return Err(LayoutError::config(format!(
                "budget {name}: default_element_size must lie in the size range"
            )));
        }
        if self.fallback_label_chars < 2 || self.fallback_label_chars > self.max_label_chars {
            return Err(LayoutError::config(format!(
                "budget {name}: fallback_label_chars must be in 2..=max_label_chars"
            )));
        }
        Ok(())
    }
}

/// Budgets keyed by layout mode kind.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BudgetTable {
    /// Budget for [`LayoutMode::Full`].
    pub full: Budget,
    /// Budget for [`LayoutMode::Split`] (per panel).
    pub split: Budget,
    /// Budget for [`LayoutMode::StepByStep`] (per step).
    pub step_by_step: Budget,
    /// Budget for [`LayoutMode::Grid`] (per cell).
    pub grid: Budget,
}

impl Default for BudgetTable {
    fn default() -> Self {
        Self {
            full: Budget {
                max_elements: 10,
                max_label_chars: 20,
                min_element_size: 40.0,
                max_element_size: 160.0,
                min_spacing: 20.0,
                default_element_size: 90.0,
                fallback_label_chars: 10,
            },
            split: Budget {
                max_elements: 6,
                max_label_chars: 18,
                min_element_size: 40.0,
                max_element_size: 140.0,
                min_spacing: 20.0,
                default_element_size: 80.0,
                fallback_label_chars: 9,
            },
            step_by_step: Budget {
                max_elements: 5,
                max_label_chars: 20,
                min_element_size: 30.0,
                max_element_size: 100.0,
                min_spacing: 15.0,
                default_element_size: 60.0,
                fallback_label_chars: 10,
            },
            grid: Budget {
                max_elements: 3,
                max_label_chars: 16,
                min_element_size: 30.0,
                max_element_size: 100.0,
                min_spacing: 15.0,
                default_element_size: 60.0,
                fallback_label_chars: 8,
            },
        }
    }
}

impl BudgetTable {
    /// Budget for `mode`.
    pub fn for_mode(&self, mode: LayoutMode) -> Budget {
        match mode {
            LayoutMode::Full => self.full,
            LayoutMode::Split => self.split,
            LayoutMode::StepByStep { .. } => self.step_by_step,
            LayoutMode::Grid { .. } => self.grid,
        }
    }

    pub(crate) fn validate(&self) -> LayoutResult<()> {
        self.full.validate("full")?;
        self.split.validate("split")?;
        self.step_by_step.validate("step_by_step")?;
        self.grid.validate("grid")
    }
}

#[cfg(test)]
#[path = "../../tests/unit/registry/mode.rs"]
mod tests;
