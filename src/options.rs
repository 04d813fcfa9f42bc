use geo::GeoFloat;

/// Tolerances and switches for a clipping operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClipOptions<T: GeoFloat> {
    /// Tolerance used by intersection discovery, both for the parametric
    /// positions along edges and for the parallel/collinear area tests.
    pub intersect_eps: T,
    /// Fuzzy comparison epsilon used for determining if two positions are
    /// equal (duplicate input vertices, output ring cleanup).
    pub pos_equal_eps: T,
    /// If true, input rings with properly crossing edges are rejected while
    /// the working copies are built. Disabling skips an O(n²) scan for input
    /// that is known to be simple.
    pub validate_simple: bool,
}

impl<T: GeoFloat> ClipOptions<T> {
    #[inline]
    pub fn new() -> Self {
        let eps = T::from(1e-9).unwrap_or_else(T::epsilon);
        Self {
            intersect_eps: eps,
            pos_equal_eps: eps,
            validate_simple: true,
        }
    }
}

impl<T: GeoFloat> Default for ClipOptions<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
