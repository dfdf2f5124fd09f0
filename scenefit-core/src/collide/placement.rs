//! Initial positions for elements the producer did not place.

use crate::{
    foundation::core::{Point, Rect, Vec2, clamp_point, shrink},
    foundation::math::{GOLDEN_ANGLE, Rng64, element_seed},
};

/// What a placement strategy needs to know about one element.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Slotted<'a> {
    pub(crate) id: &'a str,
    pub(crate) size: f64,
    pub(crate) importance: i32,
}

/// Golden-angle spiral around the region center with seeded jitter.
///
/// Spiral pitch follows the mean element footprint so the seeds start
/// roughly one footprint apart; the simulation refines from there.
pub(crate) fn spiral_seeds(
    region: Rect,
    items: &[Slotted<'_>],
    spacing: f64,
    seed: u64,
    jitter: f64,
) -> Vec<Point> {
    if items.is_empty() {
        return Vec::new();
    }
    let mean = items.iter().map(|i| i.size.max(0.0)).sum::<f64>() / items.len() as f64;
    let pitch = (mean + spacing).max(1.0) * 0.6;
    let center = region.center();
    items
        .iter()
        .enumerate()
        .map(|(k, item)| {
            let r = pitch * ((k as f64) + 0.5).sqrt();
            let angle = (k as f64) * GOLDEN_ANGLE;
            let mut rng = Rng64::new(element_seed(seed, item.id));
            let jx = rng.next_range(-jitter, jitter);
            let jy = rng.next_range(-jitter, jitter);
            let p = center + Vec2::new(r * angle.cos() + jx, r * angle.sin() + jy);
            clamp_point(p, shrink(region, item.size.max(0.0) * 0.5))
        })
        .collect()
}

/// Hexagonal lattice slots nearest the region center.
///
/// The pitch is the largest element size plus `spacing`, so any two slots
/// are at least one required separation apart. Elements are served most
/// important first (stable on input order); overflow falls back to the
/// spiral seeds, leaving the collision to the sanitizer.
pub(crate) fn hex_slots(
    region: Rect,
    items: &[Slotted<'_>],
    spacing: f64,
    seed: u64,
) -> Vec<Point> {
    if items.is_empty() {
        return Vec::new();
    }
    let max_size = items.iter().map(|i| i.size.max(0.0)).fold(0.0, f64::max);
    let pitch = (max_size + spacing).max(1.0);
    let row_h = pitch * 3f64.sqrt() * 0.5;
    let inner = shrink(region, max_size * 0.5);
    let center = region.center();

    let cols = (inner.width() / pitch).floor() as i64 + 1;
    let rows = (inner.height() / row_h).floor() as i64 + 1;
    let mut slots = Vec::<Point>::new();
    for row in -rows..=rows {
        for col in -cols..=cols {
            let mut x = (col as f64) * pitch;
            if row.rem_euclid(2) == 1 {
                x += pitch * 0.5;
            }
            let p = center + Vec2::new(x, (row as f64) * row_h);
            if p.x >= inner.x0 && p.x <= inner.x1 && p.y >= inner.y0 && p.y <= inner.y1 {
                slots.push(p);
            }
        }
    }
    slots.sort_by(|a, b| {
        a.distance(center)
            .total_cmp(&b.distance(center))
            .then(a.y.total_cmp(&b.y))
            .then(a.x.total_cmp(&b.x))
    });

    let fallback = spiral_seeds(region, items, spacing, seed, 0.0);
    let mut out = vec![Point::ZERO; items.len()];
    for (rank, idx) in by_importance(items).into_iter().enumerate() {
        out[idx] = slots.get(rank).copied().unwrap_or(fallback[idx]);
    }
    out
}

/// Left-to-right rows separated by `spacing`, wrapping when a row is full.
///
/// Rows are centered horizontally and the block of rows is centered
/// vertically in the region.
pub(crate) fn row_slots(region: Rect, items: &[Slotted<'_>], spacing: f64) -> Vec<Point> {
    let mut rows: Vec<Vec<usize>> = vec![Vec::new()];
    let mut widths = vec![0.0f64];
    for (idx, item) in items.iter().enumerate() {
        let w = item.size.max(0.0);
        let cur = rows.len() - 1;
        let needed = if rows[cur].is_empty() {
            w
        } else {
            widths[cur] + spacing + w
        };
        if needed > region.width() && !rows[cur].is_empty() {
            rows.push(vec![idx]);
            widths.push(w);
        } else {
            rows[cur].push(idx);
            widths[cur] = needed;
        }
    }

    let heights: Vec<f64> = rows
        .iter()
        .map(|r| r.iter().map(|&i| items[i].size.max(0.0)).fold(0.0, f64::max))
        .collect();
    let block_h =
        heights.iter().sum::<f64>() + (rows.len().saturating_sub(1) as f64) * spacing;
    let mut y = region.y0 + align_center(region.height(), block_h);

    let mut out = vec![Point::ZERO; items.len()];
    for ((row, &row_w), &row_h) in rows.iter().zip(&widths).zip(&heights) {
        let mut x = region.x0 + align_center(region.width(), row_w);
        for &idx in row {
            let w = items[idx].size.max(0.0);
            out[idx] = Point::new(x + w * 0.5, y + row_h * 0.5);
            x += w + spacing;
        }
        y += row_h + spacing;
    }
    out
}

fn align_center(container: f64, content: f64) -> f64 {
    (container - content).max(0.0) * 0.5
}

/// Indices ordered by importance, highest first, stable on input order.
fn by_importance(items: &[Slotted<'_>]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| items[b].importance.cmp(&items[a].importance));
    order
}

#[cfg(test)]
#[path = "../../tests/unit/collide/placement.rs"]
mod tests;
