use thiserror::Error;

/// Errors reported by the clipping engine.
///
/// All input validation happens while the working copies are built; any error
/// raised after that aborts the whole operation and no partial result is
/// returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClipError {
    /// The input ring is not a simple polygon with at least three distinct
    /// vertices.
    #[error("invalid polygon: {reason}")]
    InvalidPolygon { reason: String },

    /// An intersection vertex was inserted with a parametric position outside
    /// `[0, 1)`.
    #[error("intersection alpha {alpha} is outside [0, 1)")]
    InvalidAlpha { alpha: f64 },

    /// A vertex was linked to a second neighbour.
    #[error("vertex {key} is already linked to a neighbour")]
    DuplicateLink { key: usize },

    /// The local configuration at an intersection could not be resolved.
    #[error("unresolved intersection classification: {reason}")]
    UnresolvedClassification { reason: String },
}

impl ClipError {
    pub(crate) fn invalid_polygon(reason: impl Into<String>) -> Self {
        ClipError::InvalidPolygon {
            reason: reason.into(),
        }
    }

    pub(crate) fn unresolved(reason: impl Into<String>) -> Self {
        ClipError::UnresolvedClassification {
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = ClipError> = std::result::Result<T, E>;
