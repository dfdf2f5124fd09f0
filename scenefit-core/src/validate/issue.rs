use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// How a violation affects acceptance.
pub enum Severity {
    /// Must be resolved before the scene is rendered.
    Error,
    /// Recoverable heuristically; reported when it survives sanitization.
    Warning,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Category of a constraint violation.
pub enum IssueKind {
    /// More elements than the budget allows.
    TooManyElements,
    /// Element count past every density band.
    Overcrowded,
    /// A relationship names an element that does not exist.
    DanglingRelationship,
    /// Label longer than the budget allows.
    LabelTooLong,
    /// Size outside the budget's range.
    SizeOutOfRange,
    /// Relationship whose endpoints are the same element.
    SelfRelationship,
    /// Relationship repeating an earlier endpoint pair.
    DuplicateRelationship,
    /// Pre-assigned position whose box leaves the region.
    OutOfRegion,
    /// Two elements closer than the minimum separation.
    Collision,
    /// No label anchor is free of overlaps.
    UnplaceableLabel,
    /// Region smaller than the element's minimum size.
    RegionTooSmall,
}

impl IssueKind {
    /// Severity class of this kind.
    pub fn severity(self) -> Severity {
        match self {
            Self::TooManyElements | Self::DanglingRelationship => Severity::Error,
            _ => Severity::Warning,
        }
    }
}

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One violation with the element(s) it concerns.
pub struct Issue {
    /// Violation category.
    pub kind: IssueKind,
    /// Primary element id, when the issue concerns one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub element: Option<String>,
    /// Second element id for pairwise issues.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub other: Option<String>,
    /// Human-readable description.
    pub message: String,
}

impl Issue {
    pub(crate) fn new(kind: IssueKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            element: None,
            other: None,
            message: message.into(),
        }
    }

    pub(crate) fn on(mut self, id: &str) -> Self {
        self.element = Some(id.to_string());
        self
    }

    pub(crate) fn with_other(mut self, id: &str) -> Self {
        self.other = Some(id.to_string());
        self
    }
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.element, &self.other) {
            (Some(a), Some(b)) => write!(f, "[{a}, {b}] {}", self.message),
            (Some(a), None) => write!(f, "[{a}] {}", self.message),
            _ => write!(f, "{}", self.message),
        }
    }
}
