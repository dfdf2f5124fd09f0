use super::*;
use crate::foundation::math::Rng64;

#[test]
fn canvas_center_maps_to_origin() {
    let t = CoordinateTransform::new(&GeometryRegistry::default());
    let u = t.to_backend_b(Point::new(960.0, 540.0));
    assert!(u.x.abs() < 1e-12);
    assert!(u.y.abs() < 1e-12);
}

#[test]
fn y_axis_is_flipped() {
    let t = CoordinateTransform::new(&GeometryRegistry::default());
    let top_left = t.to_backend_b(Point::new(0.0, 0.0));
    assert!((top_left.x - (-960.0 / 135.0)).abs() < 1e-12);
    assert!((top_left.y - 4.0).abs() < 1e-12);
    let bottom = t.to_backend_b(Point::new(960.0, 1080.0));
    assert!((bottom.y + 4.0).abs() < 1e-12);
}

#[test]
fn formula_matches_closed_form() {
    let reg = GeometryRegistry::default();
    let t = CoordinateTransform::new(&reg);
    let p = Point::new(123.5, 876.25);
    let u = t.to_backend_b(p);
    assert!((u.x - (p.x - 960.0) / 135.0).abs() < 1e-12);
    assert!((u.y - (540.0 - p.y) / 135.0).abs() < 1e-12);
}

#[test]
fn backend_a_is_identity() {
    let t = CoordinateTransform::new(&GeometryRegistry::default());
    let p = Point::new(17.0, 33.0);
    assert_eq!(t.to_backend_a(p), p);
    assert_eq!(t.from_backend_a(p), p);
}

#[test]
fn thousand_random_points_round_trip() {
    let reg = GeometryRegistry::default();
    let t = CoordinateTransform::new(&reg);
    let mut rng = Rng64::new(0x5EED);
    for _ in 0..1000 {
        let p = Point::new(
            rng.next_range(0.0, f64::from(reg.canvas.width)),
            rng.next_range(0.0, f64::from(reg.canvas.height)),
        );
        let back = t.to_backend_a(t.from_backend_b(t.to_backend_b(p)));
        assert!((back.x - p.x).abs() < 1e-9, "{p:?} -> {back:?}");
        assert!((back.y - p.y).abs() < 1e-9, "{p:?} -> {back:?}");
    }
}

#[test]
fn rect_bounds_keep_top_above_bottom() {
    let reg = GeometryRegistry::default();
    let t = CoordinateTransform::new(&reg);
    let b = t.rect_to_backend_b(reg.safe_area());
    assert!(b.top > b.bottom);
    assert!(b.left < b.right);
    assert!((t.length_to_pixels(t.length_to_units(80.0)) - 80.0).abs() < 1e-12);
}
