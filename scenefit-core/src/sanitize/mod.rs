/// Rule-ordered auto-fix.
pub mod sanitizer;
