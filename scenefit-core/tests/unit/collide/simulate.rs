use super::*;

fn node(x: f64, y: f64, r: f64) -> SimNode {
    SimNode {
        pos: Point::new(x, y),
        radius: r,
        pinned: false,
    }
}

fn region() -> Rect {
    Rect::new(0.0, 0.0, 800.0, 400.0)
}

#[test]
fn overlapping_pair_separates() {
    let params = ForceParams::default();
    let ctx = SimContext {
        region: region(),
        spacing: 20.0,
        edges: &[],
        params: &params,
    };
    let mut nodes = vec![node(390.0, 200.0, 30.0), node(410.0, 200.0, 30.0)];
    simulate(&mut nodes, &ctx);
    assert!(nodes[0].pos.distance(nodes[1].pos) >= 80.0 - 1e-6);
}

#[test]
fn coincident_nodes_are_split_deterministically() {
    let params = ForceParams::default();
    let ctx = SimContext {
        region: region(),
        spacing: 10.0,
        edges: &[],
        params: &params,
    };
    let mut a = vec![node(400.0, 200.0, 20.0), node(400.0, 200.0, 20.0)];
    let mut b = a.clone();
    simulate(&mut a, &ctx);
    simulate(&mut b, &ctx);
    assert_eq!(a, b);
    assert!(a[0].pos.distance(a[1].pos) > 1.0);
}

#[test]
fn pinned_nodes_never_move() {
    let params = ForceParams::default();
    let ctx = SimContext {
        region: region(),
        spacing: 20.0,
        edges: &[],
        params: &params,
    };
    let mut nodes = vec![
        SimNode {
            pinned: true,
            ..node(400.0, 200.0, 30.0)
        },
        node(405.0, 200.0, 30.0),
    ];
    simulate(&mut nodes, &ctx);
    assert_eq!(nodes[0].pos, Point::new(400.0, 200.0));
    assert!(nodes[0].pos.distance(nodes[1].pos) >= 80.0 - 1e-6);
}

#[test]
fn nodes_stay_inside_region_minus_radius() {
    let params = ForceParams::default();
    let ctx = SimContext {
        region: region(),
        spacing: 20.0,
        edges: &[],
        params: &params,
    };
    let mut nodes: Vec<_> = (0..8)
        .map(|i| node(400.0 + f64::from(i), 200.0 - f64::from(i), 40.0))
        .collect();
    simulate(&mut nodes, &ctx);
    for n in &nodes {
        assert!(n.pos.x >= 40.0 - 1e-9 && n.pos.x <= 760.0 + 1e-9);
        assert!(n.pos.y >= 40.0 - 1e-9 && n.pos.y <= 360.0 + 1e-9);
    }
}

#[test]
fn springs_pull_linked_nodes_closer_than_unlinked() {
    let params = ForceParams::default();
    let start = vec![
        node(100.0, 200.0, 20.0),
        node(700.0, 200.0, 20.0),
        node(400.0, 100.0, 20.0),
    ];
    let free_ctx = SimContext {
        region: region(),
        spacing: 20.0,
        edges: &[],
        params: &params,
    };
    let edges = [(0usize, 1usize)];
    let linked_ctx = SimContext {
        edges: &edges,
        ..free_ctx
    };
    let mut free = start.clone();
    let mut linked = start;
    simulate(&mut free, &free_ctx);
    simulate(&mut linked, &linked_ctx);
    assert!(linked[0].pos.distance(linked[1].pos) < free[0].pos.distance(free[1].pos));
}

#[test]
fn degenerate_overcrowding_terminates_at_cap() {
    let params = ForceParams {
        max_iterations: 50,
        ..ForceParams::default()
    };
    let ctx = SimContext {
        region: Rect::new(0.0, 0.0, 200.0, 100.0),
        spacing: 20.0,
        edges: &[],
        params: &params,
    };
    let mut nodes: Vec<_> = (0..30).map(|i| node(100.0, 50.0 + f64::from(i) * 0.1, 45.0)).collect();
    let stats = simulate(&mut nodes, &ctx);
    assert!(stats.iterations <= 50);
}

#[test]
fn step_is_pure() {
    let params = ForceParams::default();
    let ctx = SimContext {
        region: region(),
        spacing: 20.0,
        edges: &[],
        params: &params,
    };
    let nodes = vec![node(300.0, 200.0, 20.0), node(320.0, 200.0, 20.0)];
    let (a, da) = step(&nodes, &ctx, 1.0);
    let (b, db) = step(&nodes, &ctx, 1.0);
    assert_eq!(a, b);
    assert_eq!(da, db);
    assert_eq!(nodes[0].pos, Point::new(300.0, 200.0));
}

#[test]
fn all_pinned_skips_iteration() {
    let params = ForceParams::default();
    let ctx = SimContext {
        region: region(),
        spacing: 20.0,
        edges: &[],
        params: &params,
    };
    let mut nodes = vec![SimNode {
        pinned: true,
        ..node(10.0, 10.0, 5.0)
    }];
    let stats = simulate(&mut nodes, &ctx);
    assert_eq!(stats.iterations, 0);
    assert!(stats.converged);
}

#[test]
fn params_validation() {
    ForceParams::default().validate().unwrap();
    let bad = ForceParams {
        alpha_decay: 1.0,
        ..ForceParams::default()
    };
    assert!(bad.validate().is_err());
    let bad = ForceParams {
        repulsion: f64::NAN,
        ..ForceParams::default()
    };
    assert!(bad.validate().is_err());
}
