use std::collections::HashMap;

use crate::{
    collide::labels::{LABEL_GAP, LabelPlacement, LabelTarget, place_labels},
    collide::placement::{Slotted, hex_slots, row_slots, spiral_seeds},
    collide::simulate::{ForceParams, SimContext, SimNode, SimulationStats, simulate},
    foundation::core::{Point, Rect},
    foundation::error::LayoutResult,
    foundation::math::GEOM_EPSILON,
    registry::geometry::GeometryRegistry,
    scene::model::{Placement, Scene},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Two elements closer than their required separation.
pub struct Collision {
    /// First element id (earlier in scene order).
    pub a: String,
    /// Second element id.
    pub b: String,
    /// How much closer than required the pair is, in pixels. Always > 0.
    pub overlap: f64,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Finalized pixel center of one element.
pub struct ElementPosition {
    /// Element id.
    pub id: String,
    /// Pixel center.
    pub position: Point,
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Predicted layout and every pairwise violation in it.
pub struct CollisionReport {
    /// Pairs closer than `min_spacing + size_a/2 + size_b/2`, in scene order.
    pub collisions: Vec<Collision>,
    /// Positions the collisions were computed against, in scene order.
    pub positions: Vec<ElementPosition>,
    /// Label anchoring per element, in scene order.
    pub labels: Vec<LabelPlacement>,
    /// Present when a force simulation ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationStats>,
}

impl CollisionReport {
    /// `true` when no pair collides.
    pub fn is_collision_free(&self) -> bool {
        self.collisions.is_empty()
    }

    /// Predicted position of `id`.
    pub fn position_of(&self, id: &str) -> Option<Point> {
        self.positions
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.position)
    }

    /// Ids of labels no anchor could place.
    pub fn flagged_labels(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .filter(|l| l.flagged)
            .map(|l| l.id.as_str())
    }
}

/// Simulate final positions for `scene` in its region and report overlaps.
///
/// Pre-positioned elements stay where they are. Unpositioned elements are
/// placed according to [`Placement`]; with `Auto` a force simulation runs
/// with the positioned elements pinned, keeping a caption's height clear of
/// the region's top and bottom edges. A fully positioned scene skips
/// placement and only measures distances.
///
/// Labels are sized by the density tier of the element count and must fit
/// inside the region.
#[tracing::instrument(skip_all, fields(mode = %scene.layout_mode, region = scene.region))]
pub fn predict(
    registry: &GeometryRegistry,
    forces: &ForceParams,
    scene: &Scene,
) -> LayoutResult<CollisionReport> {
    let region = registry.region(scene.layout_mode, scene.region)?;
    let spacing = registry.budget(scene.layout_mode).min_spacing;
    let density = registry.density(scene.layout_mode, scene.elements.len());
    let (_, caption_h) = registry.typography().caption_extent_at(density.caption_pt, 1);

    let mut positions: Vec<Option<Point>> = scene.elements.iter().map(|e| e.position).collect();
    let free: Vec<usize> = (0..positions.len())
        .filter(|&i| positions[i].is_none())
        .collect();

    let mut simulation = None;
    if !free.is_empty() {
        let slotted: Vec<Slotted<'_>> = free
            .iter()
            .map(|&i| {
                let e = &scene.elements[i];
                Slotted {
                    id: &e.id,
                    size: e.size,
                    importance: e.importance,
                }
            })
            .collect();
        let largest = slotted.iter().map(|s| s.size).fold(0.0, f64::max);
        let field = label_field(region, caption_h + LABEL_GAP, largest);
        let placed = match scene.placement {
            Placement::Auto => spiral_seeds(field, &slotted, spacing, scene.seed, forces.jitter),
            Placement::Hex => hex_slots(region, &slotted, spacing, scene.seed),
            Placement::Row => row_slots(region, &slotted, spacing),
        };
        for (&i, p) in free.iter().zip(placed) {
            positions[i] = Some(p);
        }

        if scene.placement == Placement::Auto {
            let index: HashMap<&str, usize> = scene
                .elements
                .iter()
                .enumerate()
                .map(|(i, e)| (e.id.as_str(), i))
                .collect();
            let edges: Vec<(usize, usize)> = scene
                .relationships
                .iter()
                .filter_map(|r| {
                    Some((
                        *index.get(r.source.as_str())?,
                        *index.get(r.target.as_str())?,
                    ))
                })
                .collect();
            let mut nodes: Vec<SimNode> = scene
                .elements
                .iter()
                .zip(&positions)
                .map(|(e, p)| SimNode {
                    pos: p.unwrap_or(field.center()),
                    radius: e.size.max(0.0) * 0.5,
                    pinned: e.position.is_some(),
                })
                .collect();
            let ctx = SimContext {
                region: field,
                spacing,
                edges: &edges,
                params: forces,
            };
            simulation = Some(simulate(&mut nodes, &ctx));
            for (slot, node) in positions.iter_mut().zip(&nodes) {
                *slot = Some(node.pos);
            }
        }
    }

    let resolved: Vec<Point> = positions
        .into_iter()
        .map(|p| p.unwrap_or(region.center()))
        .collect();

    let items: Vec<(&str, Point, f64)> = scene
        .elements
        .iter()
        .zip(&resolved)
        .map(|(e, p)| (e.id.as_str(), *p, e.size))
        .collect();
    let collisions = pairwise_collisions(&items, spacing);
    if !collisions.is_empty() {
        tracing::debug!(count = collisions.len(), "predicted collisions");
    }

    let targets: Vec<LabelTarget<'_>> = scene
        .elements
        .iter()
        .zip(&resolved)
        .map(|(e, p)| LabelTarget {
            id: &e.id,
            label: &e.label,
            center: *p,
            size: e.size,
        })
        .collect();
    let labels = place_labels(registry.typography(), density.caption_pt, &targets, region);

    Ok(CollisionReport {
        collisions,
        positions: scene
            .elements
            .iter()
            .zip(resolved)
            .map(|(e, position)| ElementPosition {
                id: e.id.clone(),
                position,
            })
            .collect(),
        labels,
        simulation,
    })
}

/// `region` less a `band` at the top and bottom, or `region` itself when the
/// bands leave no room for the largest element.
fn label_field(region: Rect, band: f64, largest: f64) -> Rect {
    let inset = Rect::new(region.x0, region.y0 + band, region.x1, region.y1 - band);
    if inset.height() >= largest { inset } else { region }
}

/// Every pair with `distance < spacing + size_a/2 + size_b/2`.
pub(crate) fn pairwise_collisions(items: &[(&str, Point, f64)], spacing: f64) -> Vec<Collision> {
    let mut out = Vec::new();
    for (i, &(a, pa, sa)) in items.iter().enumerate() {
        for &(b, pb, sb) in &items[i + 1..] {
            let required = spacing + sa.max(0.0) * 0.5 + sb.max(0.0) * 0.5;
            let overlap = required - pa.distance(pb);
            if overlap > GEOM_EPSILON {
                out.push(Collision {
                    a: a.to_string(),
                    b: b.to_string(),
                    overlap,
                });
            }
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/collide/predict.rs"]
mod tests;
