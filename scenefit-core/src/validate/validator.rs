use std::collections::HashSet;

use crate::{
    foundation::core::{box_around, rect_contains_rect},
    foundation::error::LayoutResult,
    foundation::math::GEOM_EPSILON,
    registry::density::DensityTier,
    registry::geometry::GeometryRegistry,
    scene::model::Scene,
    validate::issue::{Issue, IssueKind, Severity},
};

#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// Outcome of structural validation.
///
/// `valid` is `false` as soon as any error is present. A scene with only
/// warnings is valid but should still go through the sanitizer.
pub struct ValidationResult {
    /// `true` when `errors` is empty.
    pub valid: bool,
    /// Hard violations, in check order.
    pub errors: Vec<Issue>,
    /// Soft violations, in check order.
    pub warnings: Vec<Issue>,
}

impl ValidationResult {
    fn push(&mut self, issue: Issue) {
        match issue.kind.severity() {
            Severity::Error => self.errors.push(issue),
            Severity::Warning => self.warnings.push(issue),
        }
        self.valid = self.errors.is_empty();
    }

    /// `true` if any error or warning has `kind`.
    pub fn has(&self, kind: IssueKind) -> bool {
        self.errors
            .iter()
            .chain(self.warnings.iter())
            .any(|i| i.kind == kind)
    }

    /// `true` when there are neither errors nor warnings.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty() && self.warnings.is_empty()
    }
}

/// Check element count, labels, sizes and relationship endpoints against the
/// scene's layout mode budget.
#[tracing::instrument(
    skip_all,
    fields(mode = %scene.layout_mode, elements = scene.elements.len())
)]
pub fn validate(registry: &GeometryRegistry, scene: &Scene) -> LayoutResult<ValidationResult> {
    let budget = registry.budget(scene.layout_mode);
    let region = registry.region(scene.layout_mode, scene.region)?;
    let mut out = ValidationResult {
        valid: true,
        ..ValidationResult::default()
    };

    if scene.elements.len() > budget.max_elements {
        out.push(Issue::new(
            IssueKind::TooManyElements,
            format!(
                "too many elements: {} > {} allowed in {} mode",
                scene.elements.len(),
                budget.max_elements,
                scene.layout_mode.kind_name()
            ),
        ));
    }

    let density = registry.density(scene.layout_mode, scene.elements.len());
    if density.tier == DensityTier::Overfull {
        out.push(Issue::new(
            IssueKind::Overcrowded,
            format!(
                "density tier {}: {} elements fill {:.0}% of the {} budget; \
                 consider splitting the scene into steps",
                density.tier,
                scene.elements.len(),
                density.fill * 100.0,
                scene.layout_mode.kind_name()
            ),
        ));
    }

    for e in &scene.elements {
        let chars = e.label.chars().count();
        if chars > budget.max_label_chars {
            out.push(
                Issue::new(
                    IssueKind::LabelTooLong,
                    format!(
                        "label too long: {chars} > {} characters",
                        budget.max_label_chars
                    ),
                )
                .on(&e.id),
            );
        }
    }

    for e in &scene.elements {
        if e.size < budget.min_element_size || e.size > budget.max_element_size {
            out.push(
                Issue::new(
                    IssueKind::SizeOutOfRange,
                    format!(
                        "size out of range: {} not in [{}, {}]",
                        e.size, budget.min_element_size, budget.max_element_size
                    ),
                )
                .on(&e.id),
            );
        }
    }

    let ids: HashSet<&str> = scene.elements.iter().map(|e| e.id.as_str()).collect();
    let mut pairs = HashSet::<(&str, &str)>::new();
    for r in &scene.relationships {
        for end in [&r.source, &r.target] {
            if !ids.contains(end.as_str()) {
                out.push(
                    Issue::new(
                        IssueKind::DanglingRelationship,
                        format!(
                            "dangling relationship: {} -> {} references missing '{end}'",
                            r.source, r.target
                        ),
                    )
                    .on(end),
                );
            }
        }
        if r.source == r.target {
            out.push(
                Issue::new(
                    IssueKind::SelfRelationship,
                    "relationship connects an element to itself",
                )
                .on(&r.source),
            );
        } else if !pairs.insert(r.key()) {
            out.push(
                Issue::new(IssueKind::DuplicateRelationship, "duplicate relationship")
                    .on(&r.source)
                    .with_other(&r.target),
            );
        }
    }

    for e in &scene.elements {
        if let Some(p) = e.position
            && !rect_contains_rect(region, box_around(p, e.size), GEOM_EPSILON)
        {
            out.push(
                Issue::new(
                    IssueKind::OutOfRegion,
                    format!("element box at ({:.1}, {:.1}) leaves its region", p.x, p.y),
                )
                .on(&e.id),
            );
        }
    }

    if !out.valid {
        tracing::debug!(errors = out.errors.len(), "scene failed validation");
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/validate/validator.rs"]
mod tests;
