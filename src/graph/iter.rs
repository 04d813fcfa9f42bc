use geo::GeoFloat;

use super::{Vertex, VertexGraph};

/// Which vertices a [`Vertices`] view yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    All,
    Source,
    Intersection,
    /// Intersection vertices that traversal treats as crossings (see
    /// [`Vertex::is_crossing`]).
    CrossingIntersection,
}

impl Filter {
    #[inline]
    pub fn accepts<T: GeoFloat>(&self, vertex: &Vertex<T>) -> bool {
        match self {
            Filter::All => true,
            Filter::Source => vertex.is_source(),
            Filter::Intersection => vertex.is_intersection(),
            Filter::CrossingIntersection => vertex.is_crossing(),
        }
    }
}

/// Single pass view over the vertices of a [`VertexGraph`].
///
/// Walks `next` links from a starting vertex, yields `(key, vertex)` for the
/// vertices accepted by the filter and stops on returning to the start. The
/// cursor lives in the view, so any number of views over the same graph may
/// be alive at once.
#[derive(Debug, Clone)]
pub struct Vertices<'a, T: GeoFloat> {
    graph: &'a VertexGraph<T>,
    filter: Filter,
    start: Option<usize>,
    cursor: Option<usize>,
}

impl<'a, T: GeoFloat> Vertices<'a, T> {
    pub(super) fn new(graph: &'a VertexGraph<T>, filter: Filter, start: Option<usize>) -> Self {
        Vertices {
            graph,
            filter,
            start,
            cursor: start,
        }
    }
}

impl<'a, T: GeoFloat> Iterator for Vertices<'a, T> {
    type Item = (usize, &'a Vertex<T>);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.start?;
        while let Some(key) = self.cursor {
            let vertex = &self.graph.vertices[key];
            self.cursor = if vertex.next == start {
                None
            } else {
                Some(vertex.next)
            };
            if self.filter.accepts(vertex) {
                return Some((key, vertex));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.cursor {
            Some(_) => (0, Some(self.graph.len())),
            None => (0, Some(0)),
        }
    }
}

impl<'a, T: GeoFloat> std::iter::FusedIterator for Vertices<'a, T> {}
