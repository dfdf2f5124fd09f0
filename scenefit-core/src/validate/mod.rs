//! Structural checks against the mode's budget. Never mutates the scene.

/// Issue kinds and severities.
pub mod issue;
/// The validator.
pub mod validator;
