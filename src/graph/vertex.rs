use geo::{Coordinate, GeoFloat};

/// Classification of an intersection vertex.
///
/// `LeftOn`, `RightOn`, `OnOn`, `OnLeft` and `OnRight` are intermediate:
/// they describe an intersection where at least one incident edge runs along
/// the other polygon's boundary, and are replaced when collinear runs are
/// resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntersectionLabel {
    None,
    Crossing,
    Bouncing,
    LeftOn,
    RightOn,
    OnOn,
    OnLeft,
    OnRight,
    DelayedCrossing,
    DelayedBouncing,
}

impl IntersectionLabel {
    /// Whether this label belongs to the unresolved collinear family.
    #[inline]
    pub fn is_on(&self) -> bool {
        matches!(
            self,
            IntersectionLabel::LeftOn
                | IntersectionLabel::RightOn
                | IntersectionLabel::OnOn
                | IntersectionLabel::OnLeft
                | IntersectionLabel::OnRight
        )
    }
}

impl Default for IntersectionLabel {
    fn default() -> Self {
        IntersectionLabel::None
    }
}

/// Whether traversal enters or leaves the other polygon at a crossing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryExit {
    Entry,
    Exit,
    Neither,
}

impl EntryExit {
    /// Swap `Entry` and `Exit`; `Neither` is left as is.
    #[inline]
    pub fn toggle(self) -> Self {
        match self {
            EntryExit::Entry => EntryExit::Exit,
            EntryExit::Exit => EntryExit::Entry,
            EntryExit::Neither => EntryExit::Neither,
        }
    }
}

impl Default for EntryExit {
    fn default() -> Self {
        EntryExit::Neither
    }
}

/// A vertex of a [`VertexGraph`](super::VertexGraph).
///
/// `prev`, `next` are keys into the owning graph; `neighbour` is a key into
/// the *other* graph of the clipping operation.
#[derive(Debug, Clone)]
pub struct Vertex<T: GeoFloat> {
    pub(crate) point: Coordinate<T>,
    pub(crate) prev: usize,
    pub(crate) next: usize,
    pub(crate) neighbour: Option<usize>,
    pub(crate) source: bool,
    pub(crate) alpha: Option<T>,
    pub(crate) label: IntersectionLabel,
    pub(crate) entry_exit: EntryExit,
    pub(crate) closes_run: bool,
    pub(crate) splits_run: bool,
}

impl<T: GeoFloat> Vertex<T> {
    pub(crate) fn new(point: Coordinate<T>, source: bool, alpha: Option<T>) -> Self {
        Vertex {
            point,
            prev: 0,
            next: 0,
            neighbour: None,
            source,
            alpha,
            label: IntersectionLabel::None,
            entry_exit: EntryExit::Neither,
            closes_run: false,
            splits_run: false,
        }
    }

    #[inline]
    pub fn point(&self) -> Coordinate<T> {
        self.point
    }

    #[inline]
    pub fn prev(&self) -> usize {
        self.prev
    }

    #[inline]
    pub fn next(&self) -> usize {
        self.next
    }

    /// Key of the linked vertex in the other graph.
    #[inline]
    pub fn neighbour(&self) -> Option<usize> {
        self.neighbour
    }

    /// True for vertices of the input ring.
    #[inline]
    pub fn is_source(&self) -> bool {
        self.source
    }

    #[inline]
    pub fn is_intersection(&self) -> bool {
        self.neighbour.is_some()
    }

    /// Parametric position on the source edge; `None` for source vertices.
    #[inline]
    pub fn alpha(&self) -> Option<T> {
        self.alpha
    }

    #[inline]
    pub fn label(&self) -> IntersectionLabel {
        self.label
    }

    #[inline]
    pub fn entry_exit(&self) -> EntryExit {
        self.entry_exit
    }

    /// True if this vertex is the closing boundary of a collinear run.
    #[inline]
    pub fn closes_run(&self) -> bool {
        self.closes_run
    }

    /// True if traversal switches polygons at this end of a delayed
    /// bouncing run.
    #[inline]
    pub fn splits_run(&self) -> bool {
        self.splits_run
    }

    /// Whether traversal treats this vertex as a crossing.
    ///
    /// A delayed crossing run acts as a single crossing at its closing
    /// boundary; the opening boundary is passed through. A delayed bouncing
    /// run is a crossing at both ends once it has been split.
    #[inline]
    pub fn is_crossing(&self) -> bool {
        self.is_intersection()
            && match self.label {
                IntersectionLabel::Crossing => true,
                IntersectionLabel::DelayedCrossing => self.closes_run,
                IntersectionLabel::DelayedBouncing => self.splits_run,
                _ => false,
            }
    }
}
