use super::*;
use crate::{
    foundation::core::Point,
    registry::mode::LayoutMode,
    scene::model::{Placement, Relationship, VisualElement},
};

fn el(id: &str, label: &str, size: f64) -> VisualElement {
    VisualElement {
        id: id.to_string(),
        label: label.to_string(),
        size,
        position: None,
        importance: 0,
    }
}

fn rel(a: &str, b: &str) -> Relationship {
    Relationship {
        source: a.to_string(),
        target: b.to_string(),
        label: None,
    }
}

fn scene(elements: Vec<VisualElement>, relationships: Vec<Relationship>) -> Scene {
    Scene {
        layout_mode: LayoutMode::Full,
        region: 0,
        placement: Placement::Auto,
        seed: 0,
        elements,
        relationships,
    }
}

#[test]
fn clean_scene_is_valid_without_warnings() {
    let reg = GeometryRegistry::default();
    let s = scene(vec![el("a", "A", 60.0), el("b", "B", 60.0)], vec![rel("a", "b")]);
    let v = validate(&reg, &s).unwrap();
    assert!(v.valid);
    assert!(v.is_clean());
}

#[test]
fn too_many_elements_is_an_error() {
    let reg = GeometryRegistry::default();
    let elements = (0..11).map(|i| el(&format!("e{i}"), "x", 60.0)).collect();
    let v = validate(&reg, &scene(elements, vec![])).unwrap();
    assert!(!v.valid);
    assert_eq!(v.errors.len(), 1);
    assert_eq!(v.errors[0].kind, IssueKind::TooManyElements);
    assert!(v.errors[0].message.contains("too many elements"));
    assert_eq!(v.warnings.len(), 1);
    assert_eq!(v.warnings[0].kind, IssueKind::Overcrowded);
    assert!(v.warnings[0].message.contains("overfull"));
}

#[test]
fn lowered_density_bands_warn_within_budget() {
    let mut reg = GeometryRegistry::default();
    reg.density.very_tight.max_fill = 0.8;
    reg.density.tight.max_fill = 0.6;
    reg.density.moderate.max_fill = 0.4;
    reg.density.comfortable.max_fill = 0.2;
    let elements = (0..9).map(|i| el(&format!("e{i}"), "x", 60.0)).collect();
    let v = validate(&reg, &scene(elements, vec![])).unwrap();
    assert!(v.valid);
    assert!(v.has(IssueKind::Overcrowded));
    assert_eq!(IssueKind::Overcrowded.severity(), Severity::Warning);
}

#[test]
fn long_label_and_bad_size_are_warnings_only() {
    let reg = GeometryRegistry::default();
    let s = scene(
        vec![
            el("a", "This is a very long label that overflows", 60.0),
            el("b", "B", 500.0),
            el("c", "C", 1.0),
        ],
        vec![],
    );
    let v = validate(&reg, &s).unwrap();
    assert!(v.valid);
    assert_eq!(v.warnings.len(), 3);
    assert_eq!(v.warnings[0].kind, IssueKind::LabelTooLong);
    assert_eq!(v.warnings[0].element.as_deref(), Some("a"));
    assert_eq!(v.warnings[1].kind, IssueKind::SizeOutOfRange);
    assert_eq!(v.warnings[2].element.as_deref(), Some("c"));
}

#[test]
fn label_length_counts_characters_not_bytes() {
    let reg = GeometryRegistry::default();
    // 20 multi-byte characters sit exactly at the limit.
    let label: String = std::iter::repeat_n('é', 20).collect();
    let v = validate(&reg, &scene(vec![el("a", &label, 60.0)], vec![])).unwrap();
    assert!(!v.has(IssueKind::LabelTooLong));
}

#[test]
fn dangling_relationship_is_an_error() {
    let reg = GeometryRegistry::default();
    let s = scene(vec![el("a", "A", 60.0)], vec![rel("a", "ghost")]);
    let v = validate(&reg, &s).unwrap();
    assert!(!v.valid);
    assert_eq!(v.errors[0].kind, IssueKind::DanglingRelationship);
    assert_eq!(v.errors[0].element.as_deref(), Some("ghost"));
}

#[test]
fn self_and_duplicate_relationships_are_warnings() {
    let reg = GeometryRegistry::default();
    let s = scene(
        vec![el("a", "A", 60.0), el("b", "B", 60.0)],
        vec![rel("a", "a"), rel("a", "b"), rel("b", "a")],
    );
    let v = validate(&reg, &s).unwrap();
    assert!(v.valid);
    assert!(v.has(IssueKind::SelfRelationship));
    assert!(v.has(IssueKind::DuplicateRelationship));
}

#[test]
fn positioned_element_outside_region_is_flagged() {
    let reg = GeometryRegistry::default();
    let mut e = el("a", "A", 60.0);
    e.position = Some(Point::new(60.0, 160.0));
    let v = validate(&reg, &scene(vec![e], vec![])).unwrap();
    assert!(v.has(IssueKind::OutOfRegion));
}

#[test]
fn checks_are_independent() {
    let reg = GeometryRegistry::default();
    let mut elements: Vec<_> = (0..12).map(|i| el(&format!("e{i}"), "x", 60.0)).collect();
    elements[0].label = "x".repeat(30);
    let v = validate(&reg, &scene(elements, vec![rel("e0", "zz")])).unwrap();
    assert_eq!(v.errors.len(), 2);
    assert_eq!(v.warnings.len(), 1);
}

#[test]
fn severities_match_kinds() {
    assert_eq!(IssueKind::TooManyElements.severity(), Severity::Error);
    assert_eq!(IssueKind::DanglingRelationship.severity(), Severity::Error);
    assert_eq!(IssueKind::Collision.severity(), Severity::Warning);
}
