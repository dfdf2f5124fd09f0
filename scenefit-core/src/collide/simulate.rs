//! Bounded force-directed relaxation inside one region.
//!
//! The simulation is a pure iteration of [`step`]: each call reads the current
//! positions and returns new ones, so runs are reproducible and testable in
//! isolation. Forces, per node:
//!
//! - repulsion from every other node, inversely proportional to distance
//! - separation for pairs closer than their required distance
//! - spring attraction along relationships toward a rest length
//! - weak pull toward the region center
//! - boundary push back inside the region shrunk by the node's half-size
//!
//! Everything but separation is scaled by a cooling factor `alpha` that decays
//! each iteration. The loop stops on convergence or after `max_iterations`.

use crate::{
    foundation::core::{Point, Rect, Vec2, clamp_point, shrink},
    foundation::error::{LayoutError, LayoutResult},
    foundation::math::fallback_direction,
};

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Tunable simulation constants. Units are pixels per iteration.
pub struct ForceParams {
    /// Repulsion numerator; force is `repulsion / distance`.
    pub repulsion: f64,
    /// Spring constant along relationships.
    pub spring: f64,
    /// Extra rest length of a relationship beyond the required separation.
    pub link_slack: f64,
    /// Pull toward the region center per pixel of offset.
    pub gravity: f64,
    /// Push back per pixel outside the region.
    pub boundary: f64,
    /// Fraction of a pair's overlap resolved per iteration.
    pub separation: f64,
    /// Cooling applied to `alpha` each iteration.
    pub alpha_decay: f64,
    /// Largest displacement a node may take in one iteration.
    pub max_step: f64,
    /// Mean per-node displacement below which the run has converged.
    pub convergence: f64,
    /// Hard cap on iterations.
    pub max_iterations: usize,
    /// Half-width of the seeded initial jitter.
    pub jitter: f64,
}

impl Default for ForceParams {
    fn default() -> Self {
        Self {
            repulsion: 4000.0,
            spring: 0.04,
            link_slack: 40.0,
            gravity: 0.015,
            boundary: 0.5,
            separation: 0.6,
            alpha_decay: 0.02,
            max_step: 40.0,
            convergence: 0.05,
            max_iterations: 300,
            jitter: 6.0,
        }
    }
}

impl ForceParams {
    /// Reject non-finite or negative constants.
    pub fn validate(&self) -> LayoutResult<()> {
        for (name, v) in [
            ("repulsion", self.repulsion),
            ("spring", self.spring),
            ("link_slack", self.link_slack),
            ("gravity", self.gravity),
            ("boundary", self.boundary),
            ("separation", self.separation),
            ("max_step", self.max_step),
            ("convergence", self.convergence),
            ("jitter", self.jitter),
        ] {
            if !v.is_finite() || v < 0.0 {
                return Err(LayoutError::config(format!(
                    "forces.{name} must be finite and >= 0"
                )));
            }
        }
        if !(0.0..1.0).contains(&self.alpha_decay) {
            return Err(LayoutError::config("forces.alpha_decay must be in [0, 1)"));
        }
        if self.max_iterations == 0 {
            return Err(LayoutError::config("forces.max_iterations must be >= 1"));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// One simulated body.
pub struct SimNode {
    /// Current pixel center.
    pub pos: Point,
    /// Half of the element size.
    pub radius: f64,
    /// Pinned nodes exert forces but never move.
    pub pinned: bool,
}

/// Static inputs shared by every iteration.
#[derive(Clone, Copy, Debug)]
pub struct SimContext<'a> {
    /// Region the nodes are confined to.
    pub region: Rect,
    /// Minimum clear distance between node boxes.
    pub spacing: f64,
    /// Relationship edges as node index pairs.
    pub edges: &'a [(usize, usize)],
    /// Force constants.
    pub params: &'a ForceParams,
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Summary of a finished simulation.
pub struct SimulationStats {
    /// Iterations executed.
    pub iterations: usize,
    /// `true` if the run stopped on the convergence threshold.
    pub converged: bool,
    /// Mean per-node displacement of the last iteration.
    pub final_displacement: f64,
}

/// One iteration: returns the new positions and the total displacement.
pub fn step(nodes: &[SimNode], ctx: &SimContext<'_>, alpha: f64) -> (Vec<Point>, f64) {
    let p = ctx.params;
    let n = nodes.len();
    let mut soft = vec![Vec2::ZERO; n];
    let mut hard = vec![Vec2::ZERO; n];

    for i in 0..n {
        for j in (i + 1)..n {
            let (unit, dist) = direction(nodes[i].pos, nodes[j].pos, i, j);
            let rep = p.repulsion / dist.max(1.0);
            soft[i] -= unit * rep;
            soft[j] += unit * rep;

            let required = ctx.spacing + nodes[i].radius + nodes[j].radius;
            if dist < required {
                let push = (required - dist) * p.separation;
                let (wi, wj) = share(nodes[i].pinned, nodes[j].pinned);
                hard[i] -= unit * (push * wi);
                hard[j] += unit * (push * wj);
            }
        }
    }

    for &(a, b) in ctx.edges {
        if a == b || a >= n || b >= n {
            continue;
        }
        let (unit, dist) = direction(nodes[a].pos, nodes[b].pos, a, b);
        let rest = ctx.spacing + nodes[a].radius + nodes[b].radius + p.link_slack;
        let pull = p.spring * (dist - rest);
        soft[a] += unit * pull;
        soft[b] -= unit * pull;
    }

    let center = ctx.region.center();
    let mut out = Vec::with_capacity(n);
    let mut total = 0.0;
    for (i, node) in nodes.iter().enumerate() {
        if node.pinned {
            out.push(node.pos);
            continue;
        }
        let inner = shrink(ctx.region, node.radius);
        let mut f = soft[i] + (center - node.pos) * p.gravity;
        if node.pos.x < inner.x0 {
            f.x += p.boundary * (inner.x0 - node.pos.x);
        } else if node.pos.x > inner.x1 {
            f.x -= p.boundary * (node.pos.x - inner.x1);
        }
        if node.pos.y < inner.y0 {
            f.y += p.boundary * (inner.y0 - node.pos.y);
        } else if node.pos.y > inner.y1 {
            f.y -= p.boundary * (node.pos.y - inner.y1);
        }

        let disp = cap(f * alpha + hard[i], p.max_step);
        let next = clamp_point(node.pos + disp, inner);
        total += node.pos.distance(next);
        out.push(next);
    }
    (out, total)
}

/// Iterate [`step`] until convergence or the iteration cap.
pub fn simulate(nodes: &mut [SimNode], ctx: &SimContext<'_>) -> SimulationStats {
    let movable = nodes.iter().filter(|n| !n.pinned).count();
    if movable == 0 {
        return SimulationStats {
            iterations: 0,
            converged: true,
            final_displacement: 0.0,
        };
    }

    let mut alpha = 1.0;
    let mut mean = f64::INFINITY;
    for iter in 0..ctx.params.max_iterations {
        let (next, total) = step(nodes, ctx, alpha);
        for (node, pos) in nodes.iter_mut().zip(next) {
            node.pos = pos;
        }
        mean = total / movable as f64;
        if mean < ctx.params.convergence {
            tracing::debug!(iterations = iter + 1, mean, "force simulation converged");
            return SimulationStats {
                iterations: iter + 1,
                converged: true,
                final_displacement: mean,
            };
        }
        alpha *= 1.0 - ctx.params.alpha_decay;
    }
    tracing::debug!(
        iterations = ctx.params.max_iterations,
        mean,
        "force simulation hit iteration cap"
    );
    SimulationStats {
        iterations: ctx.params.max_iterations,
        converged: false,
        final_displacement: mean,
    }
}

fn direction(a: Point, b: Point, i: usize, j: usize) -> (Vec2, f64) {
    let d = b - a;
    let dist = d.x.hypot(d.y);
    if dist < 1e-9 {
        (fallback_direction(i, j), 0.0)
    } else {
        (d / dist, dist)
    }
}

fn share(pinned_a: bool, pinned_b: bool) -> (f64, f64) {
    match (pinned_a, pinned_b) {
        (false, false) => (0.5, 0.5),
        (true, false) => (0.0, 1.0),
        (false, true) => (1.0, 0.0),
        (true, true) => (0.0, 0.0),
    }
}

fn cap(v: Vec2, max: f64) -> Vec2 {
    let len = v.x.hypot(v.y);
    if len > max && len > 0.0 {
        v * (max / len)
    } else {
        v
    }
}

#[cfg(test)]
#[path = "../../tests/unit/collide/simulate.rs"]
mod tests;
