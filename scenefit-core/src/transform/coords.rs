//! Mapping between the two backend coordinate conventions.
//!
//! Backend A (vector graphics) uses top-left-origin pixels with y growing
//! down; that is the engine's native space, so its mapping is the identity.
//! Backend B (procedural animation) uses a center-origin space measured in
//! units with y growing up:
//!
//! ```text
//! unit_x = (pixel_x - width / 2) / pixels_per_unit
//! unit_y = (height / 2 - pixel_y) / pixels_per_unit
//! ```

use crate::{
    foundation::core::{Affine, Point, Rect, UnitBounds, UnitPoint, Vec2},
    registry::geometry::GeometryRegistry,
};

/// Bidirectional pixel ⇄ unit mapping for one registry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CoordinateTransform {
    to_unit: Affine,
    to_pixel: Affine,
    pixels_per_unit: f64,
}

impl CoordinateTransform {
    /// Build the mapping for `registry`'s canvas and scale.
    pub fn new(registry: &GeometryRegistry) -> Self {
        let w = f64::from(registry.canvas.width);
        let h = f64::from(registry.canvas.height);
        let ppu = registry.pixels_per_unit;
        // Translate the canvas center to the origin, then scale and flip y.
        let to_unit = Affine::scale_non_uniform(1.0 / ppu, -1.0 / ppu)
            * Affine::translate(Vec2::new(-w * 0.5, -h * 0.5));
        Self {
            to_unit,
            to_pixel: to_unit.inverse(),
            pixels_per_unit: ppu,
        }
    }

    /// Pixel point in backend A's space (identity).
    #[inline]
    pub fn to_backend_a(&self, p: Point) -> Point {
        p
    }

    /// Inverse of [`Self::to_backend_a`] (identity).
    #[inline]
    pub fn from_backend_a(&self, p: Point) -> Point {
        p
    }

    /// Pixel point to backend B's center-origin unit space.
    pub fn to_backend_b(&self, p: Point) -> UnitPoint {
        let u = self.to_unit * p;
        UnitPoint::new(u.x, u.y)
    }

    /// Unit point from backend B back to pixels.
    pub fn from_backend_b(&self, u: UnitPoint) -> Point {
        self.to_pixel * Point::new(u.x, u.y)
    }

    /// Pixel rectangle to unit-space bounds.
    pub fn rect_to_backend_b(&self, r: Rect) -> UnitBounds {
        let tl = self.to_backend_b(Point::new(r.x0, r.y0));
        let br = self.to_backend_b(Point::new(r.x1, r.y1));
        UnitBounds {
            left: tl.x,
            right: br.x,
            top: tl.y,
            bottom: br.y,
        }
    }

    /// Pixel length to units. Lengths are direction-free, so no flip applies.
    pub fn length_to_units(&self, px: f64) -> f64 {
        px / self.pixels_per_unit
    }

    /// Unit length to pixels.
    pub fn length_to_pixels(&self, units: f64) -> f64 {
        units * self.pixels_per_unit
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transform/coords.rs"]
mod tests;
