use crate::{
    foundation::core::{Point, Rect, box_around, rect_contains_rect, rects_overlap},
    foundation::math::GEOM_EPSILON,
    registry::geometry::Typography,
};

/// Clear distance between an element box and its label.
pub const LABEL_GAP: f64 = 6.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Side of the element a label is attached to.
pub enum LabelAnchor {
    /// Centered above the element.
    Top,
    /// Centered below the element.
    Bottom,
    /// Vertically centered on the right.
    Right,
    /// Vertically centered on the left.
    Left,
}

impl LabelAnchor {
    /// Preference order tried by the predictor.
    pub const PREFERENCE: [LabelAnchor; 4] = [Self::Top, Self::Bottom, Self::Right, Self::Left];

    /// Label rectangle of extent `(w, h)` anchored to an element at `center`
    /// with diameter `size`.
    pub fn rect(self, center: Point, size: f64, (w, h): (f64, f64)) -> Rect {
        let r = size.max(0.0) * 0.5 + LABEL_GAP;
        match self {
            Self::Top => Rect::new(
                center.x - w * 0.5,
                center.y - r - h,
                center.x + w * 0.5,
                center.y - r,
            ),
            Self::Bottom => Rect::new(
                center.x - w * 0.5,
                center.y + r,
                center.x + w * 0.5,
                center.y + r + h,
            ),
            Self::Right => Rect::new(
                center.x + r,
                center.y - h * 0.5,
                center.x + r + w,
                center.y + h * 0.5,
            ),
            Self::Left => Rect::new(
                center.x - r - w,
                center.y - h * 0.5,
                center.x - r,
                center.y + h * 0.5,
            ),
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Where an element's label ended up.
pub struct LabelPlacement {
    /// Element id.
    pub id: String,
    /// Chosen anchor; `None` for empty labels and flagged ones.
    pub anchor: Option<LabelAnchor>,
    /// Estimated label rectangle at the chosen anchor.
    pub rect: Option<Rect>,
    /// `true` when every anchor collided; the sanitizer shortens these.
    pub flagged: bool,
}

/// Geometry of one labelled element.
#[derive(Clone, Copy, Debug)]
pub(crate) struct LabelTarget<'a> {
    pub(crate) id: &'a str,
    pub(crate) label: &'a str,
    pub(crate) center: Point,
    pub(crate) size: f64,
}

/// Greedy anchor assignment in scene order, with captions set at `caption_pt`.
///
/// An anchor is free when its rectangle stays inside `bounds` and overlaps
/// neither any element box nor a label placed earlier.
pub(crate) fn place_labels(
    typography: &Typography,
    caption_pt: f64,
    targets: &[LabelTarget<'_>],
    bounds: Rect,
) -> Vec<LabelPlacement> {
    let boxes: Vec<Rect> = targets.iter().map(|t| box_around(t.center, t.size)).collect();
    let mut placed = Vec::<Rect>::new();
    let mut out = Vec::with_capacity(targets.len());

    for t in targets {
        let chars = t.label.chars().count();
        if chars == 0 {
            out.push(LabelPlacement {
                id: t.id.to_string(),
                anchor: None,
                rect: None,
                flagged: false,
            });
            continue;
        }
        let extent = typography.caption_extent_at(caption_pt, chars);
        let found = LabelAnchor::PREFERENCE.iter().find_map(|&anchor| {
            let rect = anchor.rect(t.center, t.size, extent);
            let free = rect_contains_rect(bounds, rect, GEOM_EPSILON)
                && !boxes.iter().any(|b| rects_overlap(*b, rect))
                && !placed.iter().any(|p| rects_overlap(*p, rect));
            free.then_some((anchor, rect))
        });
        match found {
            Some((anchor, rect)) => {
                placed.push(rect);
                out.push(LabelPlacement {
                    id: t.id.to_string(),
                    anchor: Some(anchor),
                    rect: Some(rect),
                    flagged: false,
                });
            }
            None => out.push(LabelPlacement {
                id: t.id.to_string(),
                anchor: None,
                rect: None,
                flagged: true,
            }),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/collide/labels.rs"]
mod tests;
