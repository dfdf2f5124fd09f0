pub use kurbo::{Affine, Point, Rect, Vec2};

/// Output canvas dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
}

impl Canvas {
    /// Full canvas rectangle anchored at the top-left origin.
    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

/// A point in the center-origin, y-up unit space of the animation backend.
#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnitPoint {
    /// Horizontal coordinate, growing to the right.
    pub x: f64,
    /// Vertical coordinate, growing upward.
    pub y: f64,
}

impl UnitPoint {
    /// Construct a unit-space point.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounds in unit space. `top > bottom` because y grows upward.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct UnitBounds {
    /// Left edge.
    pub left: f64,
    /// Right edge.
    pub right: f64,
    /// Top edge.
    pub top: f64,
    /// Bottom edge.
    pub bottom: f64,
}

/// Square box of side `size` centered on `center`.
pub(crate) fn box_around(center: Point, size: f64) -> Rect {
    let h = size * 0.5;
    Rect::new(center.x - h, center.y - h, center.x + h, center.y + h)
}

/// Shrink `r` by `d` on every side. Collapses to the center line when `d` is
/// larger than half the extent.
pub(crate) fn shrink(r: Rect, d: f64) -> Rect {
    let cx = (r.x0 + r.x1) * 0.5;
    let cy = (r.y0 + r.y1) * 0.5;
    let x0 = (r.x0 + d).min(cx);
    let x1 = (r.x1 - d).max(cx);
    let y0 = (r.y0 + d).min(cy);
    let y1 = (r.y1 - d).max(cy);
    Rect::new(x0, y0, x1, y1)
}

pub(crate) fn clamp_point(p: Point, r: Rect) -> Point {
    Point::new(p.x.clamp(r.x0, r.x1), p.y.clamp(r.y0, r.y1))
}

/// Strict interior overlap; touching edges do not count.
pub(crate) fn rects_overlap(a: Rect, b: Rect) -> bool {
    a.x0 < b.x1 && b.x0 < a.x1 && a.y0 < b.y1 && b.y0 < a.y1
}

pub(crate) fn rect_contains_rect(outer: Rect, inner: Rect, eps: f64) -> bool {
    inner.x0 >= outer.x0 - eps
        && inner.y0 >= outer.y0 - eps
        && inner.x1 <= outer.x1 + eps
        && inner.y1 <= outer.y1 + eps
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
