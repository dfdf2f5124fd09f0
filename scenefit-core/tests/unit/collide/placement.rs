use super::*;

fn items(n: usize, size: f64) -> Vec<(String, f64, i32)> {
    (0..n).map(|i| (format!("e{i}"), size, 0)).collect()
}

fn slotted(v: &[(String, f64, i32)]) -> Vec<Slotted<'_>> {
    v.iter()
        .map(|(id, size, importance)| Slotted {
            id,
            size: *size,
            importance: *importance,
        })
        .collect()
}

fn region() -> Rect {
    Rect::new(50.0, 150.0, 1870.0, 980.0)
}

#[test]
fn spiral_is_seeded_and_contained() {
    let data = items(10, 80.0);
    let s = slotted(&data);
    let a = spiral_seeds(region(), &s, 20.0, 9, 6.0);
    let b = spiral_seeds(region(), &s, 20.0, 9, 6.0);
    let c = spiral_seeds(region(), &s, 20.0, 10, 6.0);
    assert_eq!(a, b);
    assert_ne!(a, c);
    let inner = shrink(region(), 40.0);
    for p in &a {
        assert!(p.x >= inner.x0 && p.x <= inner.x1);
        assert!(p.y >= inner.y0 && p.y <= inner.y1);
    }
}

#[test]
fn hex_slots_are_separated_by_pitch() {
    let data = items(7, 60.0);
    let s = slotted(&data);
    let pts = hex_slots(region(), &s, 20.0, 0);
    for i in 0..pts.len() {
        for j in (i + 1)..pts.len() {
            assert!(pts[i].distance(pts[j]) >= 80.0 - 1e-9);
        }
    }
}

#[test]
fn hex_gives_center_slot_to_most_important() {
    let mut data = items(3, 60.0);
    data[2].2 = 5;
    let s = slotted(&data);
    let pts = hex_slots(region(), &s, 20.0, 0);
    let center = region().center();
    assert!(pts[2].distance(center) < 1e-9);
}

#[test]
fn hex_overflow_falls_back_to_spiral() {
    let small = Rect::new(0.0, 0.0, 100.0, 100.0);
    let data = items(5, 60.0);
    let s = slotted(&data);
    let pts = hex_slots(small, &s, 20.0, 0);
    assert_eq!(pts.len(), 5);
}

#[test]
fn rows_wrap_and_center() {
    let r = Rect::new(0.0, 0.0, 300.0, 300.0);
    let data = items(4, 80.0);
    let s = slotted(&data);
    let pts = row_slots(r, &s, 20.0);
    // Three 80px items + two gaps = 280 fit in one row; the fourth wraps.
    assert_eq!(pts[0].y, pts[2].y);
    assert!(pts[3].y > pts[0].y);
    assert!((pts[1].x - 150.0).abs() < 1e-9);
    assert!((pts[3].x - 150.0).abs() < 1e-9);
    assert!((pts[0].distance(pts[1]) - 100.0).abs() < 1e-9);
}
