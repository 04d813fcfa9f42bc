//! Circular doubly-linked vertex sequences stored in a slab.
//!
//! A [`VertexGraph`] owns the vertices of one polygon. `prev`/`next` links are
//! slab keys of the same graph; the `neighbour` link of an intersection vertex
//! is a key into the graph of the other polygon. Neither graph owns the
//! other's vertices, so linking never creates ownership cycles.
use std::ops::{Index, IndexMut};

use geo::{
    area::Area,
    kernels::Orientation,
    winding_order::{Winding, WindingOrder},
    Coordinate, GeoFloat, LineString, Polygon,
};
use itertools::Itertools;
use log::{debug, trace};
use slab::Slab;

use crate::{
    error::{ClipError, Result},
    kernel::{fuzzy_eq, midpoint, orientation},
    ClipOptions,
};

mod vertex;
pub use vertex::{EntryExit, IntersectionLabel, Vertex};

mod iter;
pub use iter::{Filter, Vertices};

/// The vertex graph of one polygon.
#[derive(Debug, Clone)]
pub struct VertexGraph<T: GeoFloat> {
    vertices: Slab<Vertex<T>>,
    root: Option<usize>,
}

impl<T: GeoFloat> Default for VertexGraph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: GeoFloat> VertexGraph<T> {
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        VertexGraph {
            vertices: Slab::with_capacity(capacity),
            root: None,
        }
    }

    /// Build a graph of source vertices without any validation.
    pub fn from_coords<I: IntoIterator<Item = Coordinate<T>>>(coords: I) -> Self {
        let iter = coords.into_iter();
        let mut graph = Self::with_capacity(iter.size_hint().0);
        for c in iter {
            graph.new_vertex(c, true);
        }
        graph
    }

    /// Build the working copy of an input ring.
    ///
    /// The closing point and consecutive duplicates are dropped and the ring
    /// is re-oriented counter-clockwise. Fails if fewer than three distinct
    /// points remain, if a coordinate is not finite, if the ring encloses no
    /// area, or (with `options.validate_simple`) if two edges meet anywhere but
    /// at their shared vertex.
    pub fn from_ring(coords: &[Coordinate<T>], options: &ClipOptions<T>) -> Result<Self> {
        let eps = options.pos_equal_eps;
        let mut points: Vec<Coordinate<T>> = Vec::with_capacity(coords.len());
        for &c in coords {
            if !c.x.is_finite() || !c.y.is_finite() {
                return Err(ClipError::invalid_polygon("coordinates must be finite"));
            }
            if points.last().map_or(false, |&last| fuzzy_eq(last, c, eps)) {
                continue;
            }
            points.push(c);
        }
        while points.len() > 1 && fuzzy_eq(points[0], points[points.len() - 1], eps) {
            points.pop();
        }
        if points.len() < 3 {
            return Err(ClipError::invalid_polygon(format!(
                "ring has {n} distinct vertices, at least 3 required",
                n = points.len()
            )));
        }

        let mut ring = LineString(points);
        ring.close();
        let area = Polygon::new(ring.clone(), vec![]).unsigned_area();
        if area <= options.intersect_eps {
            return Err(ClipError::invalid_polygon("ring encloses no area"));
        }
        if options.validate_simple {
            check_simple(&ring.0[..ring.0.len() - 1])?;
        }
        match ring.winding_order() {
            Some(WindingOrder::CounterClockwise) => {}
            Some(WindingOrder::Clockwise) => {
                debug!("from_ring: reversing clockwise input ring");
                ring.make_ccw_winding();
            }
            None => return Err(ClipError::invalid_polygon("ring has no winding order")),
        }
        ring.0.pop();
        Ok(Self::from_coords(ring.0))
    }

    #[inline]
    pub fn root(&self) -> Option<usize> {
        self.root
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    #[inline]
    pub fn get(&self, key: usize) -> Option<&Vertex<T>> {
        self.vertices.get(key)
    }

    /// Append a vertex just before `root`, or make it the root of an empty
    /// graph. Returns its key.
    pub fn new_vertex(&mut self, point: Coordinate<T>, source: bool) -> usize {
        let key = self.vertices.insert(Vertex::new(point, source, None));
        match self.root {
            Some(root) => self.attach_before(key, root),
            None => {
                let vertex = &mut self.vertices[key];
                vertex.prev = key;
                vertex.next = key;
                self.root = Some(key);
            }
        }
        key
    }

    /// Splice a vertex out of the sequence and return it.
    ///
    /// If it was the root, the root advances to its successor (or the graph
    /// becomes empty). A linked neighbour in the other graph is left
    /// untouched; callers remove intersection pairs together.
    pub fn remove_vertex(&mut self, key: usize) -> Option<Vertex<T>> {
        if !self.vertices.contains(key) {
            return None;
        }
        let vertex = self.vertices.remove(key);
        if vertex.next == key {
            self.root = None;
            return Some(vertex);
        }
        self.vertices[vertex.prev].next = vertex.next;
        self.vertices[vertex.next].prev = vertex.prev;
        if self.root == Some(key) {
            self.root = Some(vertex.next);
        }
        Some(vertex)
    }

    /// Create an intersection vertex at `point` on the source edge starting at
    /// `edge_start`, at parametric position `alpha`.
    ///
    /// The vertex is placed after the intersection vertices already on that
    /// edge whose `alpha` is not greater, so vertices on an edge stay sorted by
    /// `alpha` and equal positions keep their insertion order.
    ///
    /// # Panics
    ///
    /// If `edge_start` is not a key of this graph.
    pub fn insert_intersection(
        &mut self,
        point: Coordinate<T>,
        edge_start: usize,
        alpha: T,
    ) -> Result<usize> {
        if !(alpha >= T::zero() && alpha < T::one()) {
            return Err(ClipError::InvalidAlpha {
                alpha: alpha.to_f64().unwrap_or(f64::NAN),
            });
        }

        let mut curr = self.vertices[edge_start].next;
        while curr != edge_start {
            let vertex = &self.vertices[curr];
            if vertex.source || vertex.alpha.map_or(true, |a| a > alpha) {
                break;
            }
            curr = vertex.next;
        }

        let key = self.vertices.insert(Vertex::new(point, false, Some(alpha)));
        self.attach_before(key, curr);
        trace!("insert_intersection: {key} at {point:?} (edge {edge_start}, alpha {alpha:?})");
        Ok(key)
    }

    /// View over the vertices accepted by `filter`, starting at the root.
    pub fn vertices(&self, filter: Filter) -> Vertices<'_, T> {
        Vertices::new(self, filter, self.root)
    }

    /// View over the vertices accepted by `filter`, starting at `start`.
    pub fn vertices_from(&self, filter: Filter, start: usize) -> Vertices<'_, T> {
        let start = if self.vertices.contains(start) {
            Some(start)
        } else {
            None
        };
        Vertices::new(self, filter, start)
    }

    /// Coordinates of all vertices in sequence order.
    pub fn points(&self) -> Vec<Coordinate<T>> {
        self.vertices(Filter::All).map(|(_, v)| v.point).collect()
    }

    /// Even-odd containment test (Hormann & Agathos, 2001).
    ///
    /// Only edges straddling the horizontal line through `r` contribute; the
    /// side of `r` is decided by [`orientation`] when `r.x` lies within the
    /// edge's x-extent.
    pub fn contains_point(&self, r: Coordinate<T>) -> bool {
        let mut winding = 0i64;
        for (_, v) in self.vertices(Filter::All) {
            let p0 = v.point;
            let p1 = self.vertices[v.next].point;
            if (p0.y < r.y) == (p1.y < r.y) {
                continue;
            }
            let upward = p1.y > p0.y;
            let delta = if upward { 1 } else { -1 };
            let left_of_edge =
                || (orientation(p0, p1, r) == Orientation::CounterClockwise) == upward;
            if p0.x >= r.x {
                if p1.x > r.x || left_of_edge() {
                    winding += delta;
                }
            } else if p1.x > r.x && left_of_edge() {
                winding += delta;
            }
        }
        winding % 2 != 0
    }

    /// A point of this polygon's boundary that is not an intersection with
    /// `other`, together with the key of the first vertex following it.
    ///
    /// Prefers a vertex without neighbour; otherwise takes the midpoint of an
    /// edge that does not run along `other`. Returns `None` if every edge lies
    /// on the boundary of `other`.
    pub fn representative(&self, other: &VertexGraph<T>) -> Option<(usize, Coordinate<T>)> {
        if let Some((key, vertex)) = self
            .vertices(Filter::All)
            .find(|(_, v)| !v.is_intersection())
        {
            return Some((key, vertex.point));
        }

        self.vertices(Filter::All).find_map(|(_, v)| {
            let next = &self.vertices[v.next];
            let (n, nn) = (v.neighbour?, next.neighbour?);
            let neighbour = other.get(n)?;
            if nn != neighbour.prev && nn != neighbour.next {
                Some((v.next, midpoint(v.point, next.point)))
            } else {
                None
            }
        })
    }

    /// Insert `key` into the sequence just before `at`.
    fn attach_before(&mut self, key: usize, at: usize) {
        let prev = self.vertices[at].prev;
        {
            let vertex = &mut self.vertices[key];
            vertex.prev = prev;
            vertex.next = at;
        }
        self.vertices[prev].next = key;
        self.vertices[at].prev = key;
    }
}

impl<T: GeoFloat> Index<usize> for VertexGraph<T> {
    type Output = Vertex<T>;

    #[inline]
    fn index(&self, key: usize) -> &Vertex<T> {
        &self.vertices[key]
    }
}

impl<T: GeoFloat> IndexMut<usize> for VertexGraph<T> {
    #[inline]
    fn index_mut(&mut self, key: usize) -> &mut Vertex<T> {
        &mut self.vertices[key]
    }
}

/// Link vertex `a` of `a_graph` with vertex `b` of `b_graph`.
///
/// Both become intersection vertices. Linking a vertex twice is an error.
pub fn link<T: GeoFloat>(
    a_graph: &mut VertexGraph<T>,
    a: usize,
    b_graph: &mut VertexGraph<T>,
    b: usize,
) -> Result<()> {
    if a_graph[a].neighbour.is_some() {
        return Err(ClipError::DuplicateLink { key: a });
    }
    if b_graph[b].neighbour.is_some() {
        return Err(ClipError::DuplicateLink { key: b });
    }
    a_graph[a].neighbour = Some(b);
    b_graph[b].neighbour = Some(a);
    trace!("link: {a} <-> {b}");
    Ok(())
}

/// Even-odd containment of `point` in the implicitly closed ring `coords`.
pub fn point_in_polygon<T: GeoFloat>(coords: &[Coordinate<T>], point: Coordinate<T>) -> bool {
    VertexGraph::from_coords(coords.iter().copied()).contains_point(point)
}

/// Reject rings that are not simple.
///
/// Non-adjacent edges may not meet at all, neither crossing nor touching nor
/// overlapping. Adjacent edges only share their common vertex, so an edge may
/// not fold back over its predecessor.
fn check_simple<T: GeoFloat>(points: &[Coordinate<T>]) -> Result<()> {
    let n = points.len();
    let edge = |i: usize| (points[i], points[(i + 1) % n]);
    for (i, j) in (0..n).tuple_combinations() {
        let (a, b) = edge(i);
        let (c, d) = edge(j);
        if j == i + 1 || (i == 0 && j == n - 1) {
            // The shared vertex and the far ends of both edges.
            let (shared, p, q) = if j == i + 1 { (b, a, d) } else { (a, b, c) };
            if folds_back(p, shared, q) {
                return Err(ClipError::invalid_polygon(format!(
                    "edges {i} and {j} overlap at vertex {shared:?}"
                )));
            }
            continue;
        }
        if segments_meet(a, b, c, d) {
            return Err(ClipError::invalid_polygon(format!(
                "edges {i} and {j} meet away from a shared vertex"
            )));
        }
    }
    Ok(())
}

/// Whether `p -> shared -> q` turns back along itself.
fn folds_back<T: GeoFloat>(p: Coordinate<T>, shared: Coordinate<T>, q: Coordinate<T>) -> bool {
    let u = p - shared;
    let v = q - shared;
    orientation(p, shared, q) == Orientation::Collinear && u.x * v.x + u.y * v.y > T::zero()
}

/// Whether `p` lies on the closed segment `a b`.
fn on_segment<T: GeoFloat>(p: Coordinate<T>, a: Coordinate<T>, b: Coordinate<T>) -> bool {
    orientation(a, b, p) == Orientation::Collinear
        && a.x.min(b.x) <= p.x
        && p.x <= a.x.max(b.x)
        && a.y.min(b.y) <= p.y
        && p.y <= a.y.max(b.y)
}

/// Whether the closed segments `a b` and `c d` share any point.
fn segments_meet<T: GeoFloat>(
    a: Coordinate<T>,
    b: Coordinate<T>,
    c: Coordinate<T>,
    d: Coordinate<T>,
) -> bool {
    let straddles = |o1: Orientation, o2: Orientation| {
        matches!(
            (o1, o2),
            (Orientation::CounterClockwise, Orientation::Clockwise)
                | (Orientation::Clockwise, Orientation::CounterClockwise)
        )
    };
    (straddles(orientation(a, b, c), orientation(a, b, d))
        && straddles(orientation(c, d, a), orientation(c, d, b)))
        || on_segment(c, a, b)
        || on_segment(d, a, b)
        || on_segment(a, c, d)
        || on_segment(b, c, d)
}
