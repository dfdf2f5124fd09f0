use super::*;

fn def_with(elements: Vec<ElementDef>) -> SceneDef {
    SceneDef {
        layout_mode: LayoutMode::Full,
        region: 0,
        placement: Placement::Auto,
        seed: 0,
        elements,
        relationships: vec![],
    }
}

fn el(id: &str) -> ElementDef {
    ElementDef {
        id: id.to_string(),
        label: id.to_uppercase(),
        size: None,
        importance: None,
        position: None,
        relative_position: None,
    }
}

#[test]
fn defaults_fill_size_and_importance() {
    let reg = GeometryRegistry::default();
    let scene = Scene::from_def(def_with(vec![el("a")]), &reg).unwrap();
    assert_eq!(scene.elements[0].size, reg.budget(LayoutMode::Full).default_element_size);
    assert_eq!(scene.elements[0].importance, 0);
    assert!(scene.elements[0].position.is_none());
}

#[test]
fn default_size_shrinks_with_density() {
    let reg = GeometryRegistry::default();
    let sizes = |n: usize| {
        let elements = (0..n).map(|i| el(&format!("e{i}"))).collect();
        Scene::from_def(def_with(elements), &reg).unwrap().elements[0].size
    };
    assert_eq!(sizes(5), 90.0);
    assert!((sizes(6) - 81.0).abs() < 1e-9);
    assert!((sizes(10) - 63.0).abs() < 1e-9);
    // Over budget sizes as a full region; eviction trims the rest.
    assert!((sizes(14) - 63.0).abs() < 1e-9);
}

#[test]
fn relative_position_resolves_inside_the_region() {
    let reg = GeometryRegistry::default();
    let mut e = el("a");
    e.relative_position = Some(RelativePosition { x: 0.5, y: 0.25 });
    let mut def = def_with(vec![e]);
    def.layout_mode = LayoutMode::StepByStep { steps: 3 };
    def.region = 1;
    let scene = Scene::from_def(def, &reg).unwrap();
    let p = scene.elements[0].position.unwrap();
    assert!((p.x - 960.0).abs() < 1e-9);
    assert!((p.y - 497.5).abs() < 1e-9);
}

#[test]
fn relative_position_must_be_a_fraction_and_exclusive() {
    let reg = GeometryRegistry::default();
    let mut e = el("a");
    e.relative_position = Some(RelativePosition { x: 1.5, y: 0.5 });
    assert!(Scene::from_def(def_with(vec![e]), &reg).is_err());

    let mut e = el("b");
    e.position = Some(Point::new(100.0, 200.0));
    e.relative_position = Some(RelativePosition { x: 0.5, y: 0.5 });
    let err = Scene::from_def(def_with(vec![e]), &reg).unwrap_err();
    assert!(err.to_string().contains("exclusive"));
}

#[test]
fn duplicate_ids_are_malformed() {
    let reg = GeometryRegistry::default();
    let err = Scene::from_def(def_with(vec![el("a"), el("a")]), &reg).unwrap_err();
    assert!(matches!(err, LayoutError::Malformed(_)));
    assert!(err.to_string().contains("duplicate id 'a'"));
}

#[test]
fn empty_id_is_malformed() {
    let reg = GeometryRegistry::default();
    assert!(Scene::from_def(def_with(vec![el(" ")]), &reg).is_err());
}

#[test]
fn non_finite_numbers_are_malformed() {
    let reg = GeometryRegistry::default();
    let mut e = el("a");
    e.size = Some(f64::NAN);
    assert!(Scene::from_def(def_with(vec![e]), &reg).is_err());

    let mut e = el("b");
    e.position = Some(Point::new(f64::INFINITY, 1.0));
    assert!(Scene::from_def(def_with(vec![e]), &reg).is_err());
}

#[test]
fn region_out_of_range_is_malformed() {
    let reg = GeometryRegistry::default();
    let mut def = def_with(vec![el("a")]);
    def.layout_mode = LayoutMode::StepByStep { steps: 2 };
    def.region = 2;
    assert!(Scene::from_def(def, &reg).is_err());
}

#[test]
fn dangling_relationship_survives_boundary_checks() {
    let reg = GeometryRegistry::default();
    let mut def = def_with(vec![el("a")]);
    def.relationships.push(RelationshipDef {
        source: "a".to_string(),
        target: "ghost".to_string(),
        label: None,
    });
    let scene = Scene::from_def(def, &reg).unwrap();
    assert_eq!(scene.relationships.len(), 1);
}

#[test]
fn json_missing_required_field_is_serde_error() {
    let json = r#"{ "layout_mode": {"kind":"full"}, "elements": [{"label":"x"}] }"#;
    let err = SceneDef::from_json_str(json).unwrap_err();
    assert!(matches!(err, LayoutError::Serde(_)));
}

#[test]
fn json_scene_parses_with_optional_fields() {
    let def = SceneDef::from_json_str(
        r#"{
            "layout_mode": {"kind": "grid", "rows": 2, "cols": 2},
            "region": 3,
            "placement": "hex",
            "elements": [
                {"id": "a", "label": "Alpha", "size": 50, "importance": 2},
                {"id": "b", "label": "Beta", "position": {"x": 10, "y": 20}}
            ],
            "relationships": [{"source": "a", "target": "b", "label": "to"}]
        }"#,
    )
    .unwrap();
    assert_eq!(def.region, 3);
    assert_eq!(def.placement, Placement::Hex);
    assert_eq!(def.elements[1].position, Some(Point::new(10.0, 20.0)));
    assert_eq!(def.relationships[0].label.as_deref(), Some("to"));
}

#[test]
fn relationship_key_is_order_independent() {
    let a = Relationship {
        source: "x".to_string(),
        target: "y".to_string(),
        label: None,
    };
    let b = Relationship {
        source: "y".to_string(),
        target: "x".to_string(),
        label: Some("rev".to_string()),
    };
    assert_eq!(a.key(), b.key());
}
