use super::*;

fn target<'a>(id: &'a str, label: &'a str, x: f64, y: f64, size: f64) -> LabelTarget<'a> {
    LabelTarget {
        id,
        label,
        center: Point::new(x, y),
        size,
    }
}

fn bounds() -> Rect {
    Rect::new(0.0, 0.0, 1000.0, 600.0)
}

#[test]
fn lone_element_gets_top_anchor() {
    let t = Typography::default();
    let out = place_labels(&t, t.caption_pt, &[target("a", "Alpha", 500.0, 300.0, 60.0)], bounds());
    assert_eq!(out[0].anchor, Some(LabelAnchor::Top));
    let rect = out[0].rect.unwrap();
    assert!((rect.y1 - (300.0 - 30.0 - LABEL_GAP)).abs() < 1e-9);
    assert!(!out[0].flagged);
}

#[test]
fn element_above_forces_bottom_anchor() {
    let t = Typography::default();
    let out = place_labels(
        &t,
        t.caption_pt,
        &[
            target("a", "Alpha", 500.0, 300.0, 60.0),
            target("b", "Beta", 500.0, 230.0, 40.0),
        ],
        bounds(),
    );
    assert_eq!(out[0].anchor, Some(LabelAnchor::Bottom));
}

#[test]
fn near_top_edge_falls_through_to_bottom() {
    let t = Typography::default();
    let out = place_labels(&t, t.caption_pt, &[target("a", "Alpha", 500.0, 40.0, 60.0)], bounds());
    assert_eq!(out[0].anchor, Some(LabelAnchor::Bottom));
}

#[test]
fn boxed_in_label_is_flagged() {
    let t = Typography::default();
    let tight = Rect::new(0.0, 0.0, 80.0, 80.0);
    let out = place_labels(
        &t,
        t.caption_pt,
        &[target("a", "A long caption", 40.0, 40.0, 60.0)],
        tight,
    );
    assert!(out[0].flagged);
    assert!(out[0].anchor.is_none());
}

#[test]
fn empty_label_needs_no_anchor() {
    let t = Typography::default();
    let out = place_labels(&t, t.caption_pt, &[target("a", "", 500.0, 300.0, 60.0)], bounds());
    assert!(!out[0].flagged);
    assert!(out[0].rect.is_none());
}

#[test]
fn labels_do_not_overlap_each_other() {
    let t = Typography::default();
    let out = place_labels(
        &t,
        t.caption_pt,
        &[
            target("a", "Alpha", 400.0, 300.0, 40.0),
            target("b", "Bravo", 450.0, 300.0, 40.0),
        ],
        bounds(),
    );
    let ra = out[0].rect.unwrap();
    let rb = out[1].rect.unwrap();
    assert!(!rects_overlap(ra, rb));
    assert_eq!(out[0].anchor, Some(LabelAnchor::Top));
    assert_eq!(out[1].anchor, Some(LabelAnchor::Bottom));
}

#[test]
fn smaller_captions_fit_where_larger_ones_do_not() {
    let t = Typography::default();
    let cramped = Rect::new(0.0, 0.0, 160.0, 200.0);
    let a = [target("a", "Mitochondria", 80.0, 100.0, 100.0)];
    assert!(place_labels(&t, t.caption_pt, &a, cramped)[0].flagged);
    assert_eq!(place_labels(&t, 20.0, &a, cramped)[0].anchor, Some(LabelAnchor::Top));
}
