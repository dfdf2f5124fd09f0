//! Deterministic, rule-ordered auto-fix.
//!
//! Rules run in a fixed order so the same input always yields the same
//! output and the same log:
//!
//! 1. relationship hygiene (self, duplicate, dangling)
//! 2. eviction of the least important elements over budget, with cascade
//! 3. size clamping
//! 4. label truncation
//! 5. placement, containment and bounded push-apart passes, kept only when
//!    they end collision-free
//! 6. fallback truncation of labels no anchor could place
//!
//! Every change is recorded as a [`Correction`]. Anything still wrong after
//! the retry budget is reported in [`SanitizationLog::unresolved`].

use std::collections::HashSet;

use crate::{
    collide::predict::{CollisionReport, predict},
    collide::simulate::ForceParams,
    foundation::core::{Point, Rect, Vec2, clamp_point, shrink},
    foundation::error::{LayoutError, LayoutResult},
    foundation::math::{GEOM_EPSILON, fallback_direction},
    registry::geometry::GeometryRegistry,
    scene::model::Scene,
    transform::coords::CoordinateTransform,
    validate::issue::{Issue, IssueKind},
    validate::validator::ValidationResult,
};

/// Marker appended to truncated labels.
pub const ELLIPSIS: char = '…';

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Sanitizer tuning.
pub struct SanitizeParams {
    /// Push-apart passes before collisions are reported as unresolved.
    pub retry_passes: usize,
    /// Extra clearance added to each push so pairs land strictly apart.
    pub separation_slack: f64,
}

impl Default for SanitizeParams {
    fn default() -> Self {
        Self {
            retry_passes: 3,
            separation_slack: 0.5,
        }
    }
}

impl SanitizeParams {
    /// Reject a negative or non-finite slack.
    pub fn validate(&self) -> LayoutResult<()> {
        if !self.separation_slack.is_finite() || self.separation_slack < 0.0 {
            return Err(LayoutError::config(
                "sanitize.separation_slack must be finite and >= 0",
            ));
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Kind of change applied to the scene.
pub enum CorrectionKind {
    /// Element evicted to meet the element budget.
    DroppedElement,
    /// Relationship removed (dangling, self-referencing or duplicate).
    DroppedRelationship,
    /// Size clamped into range.
    ClampedSize,
    /// Label shortened with an ellipsis.
    TruncatedLabel,
    /// Position assigned to an unpositioned element.
    PlacedElement,
    /// Element moved back inside its region.
    ContainedElement,
    /// Colliding pair pushed apart.
    PushedApart,
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One applied correction.
pub struct Correction {
    /// What was done.
    pub kind: CorrectionKind,
    /// Element concerned, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Second element for pairwise corrections.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
    /// Human-readable detail.
    pub detail: String,
}

impl Correction {
    fn new(kind: CorrectionKind, element: Option<&str>, detail: impl Into<String>) -> Self {
        Self {
            kind,
            element: element.map(str::to_string),
            other: None,
            detail: detail.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Trace of everything the sanitizer did, plus what it could not fix.
pub struct SanitizationLog {
    /// Applied corrections in rule order.
    pub corrections: Vec<Correction>,
    /// Warnings that survived the retry budget.
    pub unresolved: Vec<Issue>,
}

impl SanitizationLog {
    fn record(&mut self, c: Correction) {
        tracing::debug!(kind = ?c.kind, element = ?c.element, detail = %c.detail, "correction");
        self.corrections.push(c);
    }

    fn leave_unresolved(&mut self, issue: Issue) {
        tracing::warn!(kind = ?issue.kind, %issue, "unresolved after sanitization");
        self.unresolved.push(issue);
    }

    /// Number of corrections of `kind`.
    pub fn count(&self, kind: CorrectionKind) -> usize {
        self.corrections.iter().filter(|c| c.kind == kind).count()
    }

    /// `true` if any unresolved issue has error severity.
    pub fn has_unresolved_errors(&self) -> bool {
        self.unresolved
            .iter()
            .any(|i| i.kind.severity() == crate::validate::issue::Severity::Error)
    }
}

/// Correct `scene` using the validator's and predictor's findings.
///
/// The result always validates without errors: eviction and cascade deletes
/// resolve every error-class violation. Warning-class problems are fixed
/// best-effort and reported in the log when they persist.
#[tracing::instrument(
    skip_all,
    fields(mode = %scene.layout_mode, elements = scene.elements.len())
)]
pub fn sanitize(
    registry: &GeometryRegistry,
    forces: &ForceParams,
    params: &SanitizeParams,
    scene: &Scene,
    validation: &ValidationResult,
    report: &CollisionReport,
) -> LayoutResult<(Scene, SanitizationLog)> {
    let budget = registry.budget(scene.layout_mode);
    let region = registry.region(scene.layout_mode, scene.region)?;
    let mut s = scene.clone();
    let mut log = SanitizationLog::default();

    clean_relationships(&mut s, &mut log);

    if validation.has(IssueKind::TooManyElements) || s.elements.len() > budget.max_elements {
        evict(&mut s, budget.max_elements, &mut log);
        clean_relationships(&mut s, &mut log);
    }

    let max_size = budget
        .max_element_size
        .min(region.width())
        .min(region.height());
    let min_size = budget.min_element_size.min(max_size);
    if budget.min_element_size > max_size {
        log.leave_unresolved(Issue::new(
            IssueKind::RegionTooSmall,
            format!(
                "region {:.0}x{:.0} is smaller than the minimum element size {}",
                region.width(),
                region.height(),
                budget.min_element_size
            ),
        ));
    }
    for e in &mut s.elements {
        let clamped = e.size.clamp(min_size, max_size);
        if clamped != e.size {
            log.record(Correction::new(
                CorrectionKind::ClampedSize,
                Some(&e.id),
                format!("size {} -> {}", e.size, clamped),
            ));
            e.size = clamped;
        }
    }

    for e in &mut s.elements {
        if let Some(short) = truncate_label(&e.label, budget.max_label_chars) {
            log.record(Correction::new(
                CorrectionKind::TruncatedLabel,
                Some(&e.id),
                format!("label '{}' -> '{}'", e.label, short),
            ));
            e.label = short;
        }
    }

    place_missing(registry, forces, &mut s, report, &mut log)?;
    contain(&mut s, region, &CoordinateTransform::new(registry), &mut log);

    let mut final_report = resolve_collisions(registry, forces, params, &mut s, region, &mut log)?;
    for c in &final_report.collisions {
        log.leave_unresolved(
            Issue::new(
                IssueKind::Collision,
                format!(
                    "collision unresolved after {} passes: overlap {:.2}px",
                    params.retry_passes, c.overlap
                ),
            )
            .on(&c.a)
            .with_other(&c.b),
        );
    }

    // A shortened label may take another anchor and crowd out a later one;
    // repeat until no flagged label is left to shorten.
    loop {
        let flagged: Vec<String> = final_report.flagged_labels().map(str::to_string).collect();
        let mut shortened = false;
        for id in &flagged {
            if let Some(e) = s.elements.iter_mut().find(|e| &e.id == id)
                && let Some(short) = truncate_label(&e.label, budget.fallback_label_chars)
            {
                log.record(Correction::new(
                    CorrectionKind::TruncatedLabel,
                    Some(&e.id),
                    format!("no free anchor; label '{}' -> '{}'", e.label, short),
                ));
                e.label = short;
                shortened = true;
            }
        }
        if !shortened {
            break;
        }
        final_report = predict(registry, forces, &s)?;
    }
    for id in final_report.flagged_labels() {
        log.leave_unresolved(
            Issue::new(IssueKind::UnplaceableLabel, "no label anchor is free of overlaps").on(id),
        );
    }

    Ok((s, log))
}

/// Cut `label` to `limit` characters ending in [`ELLIPSIS`]; `None` if it fits.
pub fn truncate_label(label: &str, limit: usize) -> Option<String> {
    if label.chars().count() <= limit {
        return None;
    }
    let mut out: String = label.chars().take(limit.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    Some(out)
}

fn clean_relationships(s: &mut Scene, log: &mut SanitizationLog) {
    let ids: HashSet<String> = s.elements.iter().map(|e| e.id.clone()).collect();
    let mut seen = HashSet::<(String, String)>::new();
    let mut kept = Vec::with_capacity(s.relationships.len());
    for r in std::mem::take(&mut s.relationships) {
        let reason = if !ids.contains(&r.source) || !ids.contains(&r.target) {
            Some("dangling endpoint")
        } else if r.source == r.target {
            Some("self relationship")
        } else {
            let (a, b) = r.key();
            if seen.insert((a.to_string(), b.to_string())) {
                None
            } else {
                Some("duplicate relationship")
            }
        };
        match reason {
            Some(why) => log.record(Correction {
                kind: CorrectionKind::DroppedRelationship,
                element: Some(r.source.clone()),
                other: Some(r.target.clone()),
                detail: why.to_string(),
            }),
            None => kept.push(r),
        }
    }
    s.relationships = kept;
}

/// Drop the least important elements until `max` remain. Among equal
/// importance the later-inserted element goes first; survivors keep order.
fn evict(s: &mut Scene, max: usize, log: &mut SanitizationLog) {
    let excess = s.elements.len().saturating_sub(max);
    if excess == 0 {
        return;
    }
    let mut order: Vec<usize> = (0..s.elements.len()).collect();
    order.sort_by(|&a, &b| {
        s.elements[a]
            .importance
            .cmp(&s.elements[b].importance)
            .then(b.cmp(&a))
    });
    let doomed: HashSet<usize> = order.into_iter().take(excess).collect();

    let mut idx = 0;
    s.elements.retain(|e| {
        let drop = doomed.contains(&idx);
        idx += 1;
        if drop {
            log.record(Correction::new(
                CorrectionKind::DroppedElement,
                Some(&e.id),
                format!("evicted over element budget (importance {})", e.importance),
            ));
        }
        !drop
    });
}

fn place_missing(
    registry: &GeometryRegistry,
    forces: &ForceParams,
    s: &mut Scene,
    report: &CollisionReport,
    log: &mut SanitizationLog,
) -> LayoutResult<()> {
    if s.is_fully_positioned() {
        return Ok(());
    }
    // The report was computed before eviction and clamping; re-predict
    // whenever either changed what the simulation would see.
    let stale = [
        CorrectionKind::DroppedElement,
        CorrectionKind::DroppedRelationship,
        CorrectionKind::ClampedSize,
    ]
    .into_iter()
    .any(|k| log.count(k) > 0)
        || s
            .elements
            .iter()
            .any(|e| e.position.is_none() && report.position_of(&e.id).is_none());
    let fresh;
    let source = if stale {
        fresh = predict(registry, forces, s)?;
        &fresh
    } else {
        report
    };
    for e in &mut s.elements {
        if e.position.is_none()
            && let Some(p) = source.position_of(&e.id)
        {
            log.record(Correction::new(
                CorrectionKind::PlacedElement,
                Some(&e.id),
                format!("placed at ({:.1}, {:.1})", p.x, p.y),
            ));
            e.position = Some(p);
        }
    }
    Ok(())
}

fn contain(s: &mut Scene, region: Rect, coords: &CoordinateTransform, log: &mut SanitizationLog) {
    for e in &mut s.elements {
        let Some(p) = e.position else { continue };
        let q = clamp_point(p, shrink(region, e.size * 0.5));
        if p.distance(q) > GEOM_EPSILON {
            let u = coords.to_backend_b(q);
            let b = coords.rect_to_backend_b(region);
            log.record(Correction::new(
                CorrectionKind::ContainedElement,
                Some(&e.id),
                format!(
                    "moved ({:.1}, {:.1}) -> ({:.1}, {:.1}) px; ({:.3}, {:.3}) in region \
                     x {:.3}..{:.3}, y {:.3}..{:.3} units",
                    p.x, p.y, q.x, q.y, u.x, u.y, b.left, b.right, b.bottom, b.top
                ),
            ));
            e.position = Some(q);
        }
    }
}

/// Bounded push-apart passes.
///
/// The moves only stick when the passes end collision-free. Otherwise the
/// pre-push positions come back and nothing is logged, so sanitizing the
/// output again reproduces it unchanged. Returns the report for the
/// positions that were kept.
fn resolve_collisions(
    registry: &GeometryRegistry,
    forces: &ForceParams,
    params: &SanitizeParams,
    s: &mut Scene,
    region: Rect,
    log: &mut SanitizationLog,
) -> LayoutResult<CollisionReport> {
    let spacing = registry.budget(s.layout_mode).min_spacing;
    let before: Vec<Option<Point>> = s.elements.iter().map(|e| e.position).collect();
    let mut staged = Vec::new();

    for pass in 0..params.retry_passes {
        let current = predict(registry, forces, s)?;
        if current.is_collision_free() {
            break;
        }
        tracing::debug!(pass, collisions = current.collisions.len(), "push-apart pass");
        let moves = staged.len();
        for c in &current.collisions {
            staged.extend(push_apart(s, &c.a, &c.b, spacing, params.separation_slack, region));
        }
        if staged.len() == moves {
            break;
        }
    }

    let report = predict(registry, forces, s)?;
    if staged.is_empty() || report.is_collision_free() {
        for c in staged {
            log.record(c);
        }
        return Ok(report);
    }
    tracing::debug!(
        remaining = report.collisions.len(),
        "push-apart passes left collisions, restoring positions"
    );
    for (e, p) in s.elements.iter_mut().zip(before) {
        e.position = p;
    }
    predict(registry, forces, s)
}

/// Minimum-translation push along the center line, split equally, then
/// clamped back inside the region. `None` when neither element moved.
fn push_apart(
    s: &mut Scene,
    a: &str,
    b: &str,
    spacing: f64,
    slack: f64,
    region: Rect,
) -> Option<Correction> {
    let ia = s.elements.iter().position(|e| e.id == a)?;
    let ib = s.elements.iter().position(|e| e.id == b)?;
    let (pa, pb) = (s.elements[ia].position?, s.elements[ib].position?);
    let (sa, sb) = (s.elements[ia].size, s.elements[ib].size);
    let required = spacing + sa * 0.5 + sb * 0.5;
    let d = pb - pa;
    let dist = d.x.hypot(d.y);
    let overlap = required - dist;
    if overlap <= GEOM_EPSILON {
        return None;
    }
    let dir: Vec2 = if dist < 1e-9 {
        fallback_direction(ia, ib)
    } else {
        d / dist
    };
    let half = (overlap + slack) * 0.5;
    let na: Point = clamp_point(pa - dir * half, shrink(region, sa * 0.5));
    let nb: Point = clamp_point(pb + dir * half, shrink(region, sb * 0.5));
    if pa.distance(na) <= GEOM_EPSILON && pb.distance(nb) <= GEOM_EPSILON {
        return None;
    }
    s.elements[ia].position = Some(na);
    s.elements[ib].position = Some(nb);
    Some(Correction {
        kind: CorrectionKind::PushedApart,
        element: Some(a.to_string()),
        other: Some(b.to_string()),
        detail: format!("overlap {overlap:.2}px -> distance {:.2}px", na.distance(nb)),
    })
}

#[cfg(test)]
#[path = "../../tests/unit/sanitize/sanitizer.rs"]
mod tests;
