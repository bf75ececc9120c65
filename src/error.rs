use thiserror::Error;

/// Errors raised at the selection boundary.
///
/// Everything past the boundary is total: an unknown ideology string is not an
/// error, it just produces an empty trend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TrendError {
    /// The selection value was absent or was not a string (e.g. `42`, `null`).
    #[error("invalid selection: expected a string, got {found}")]
    InvalidSelection { found: &'static str },
}
