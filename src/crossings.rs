//! Discovery of the points where the boundaries of two polygons meet.
//!
//! Every source edge of the subject is tested against every source edge of
//! the clip. Each meeting point becomes an intersection pair: one vertex in
//! each graph, linked through `neighbour`. Source vertices that lie on the
//! other boundary are reused instead of duplicated, so every physical point is
//! linked at most once.
use geo::GeoFloat;
use log::{debug, trace};

use crate::{
    error::Result,
    graph::{link, Filter, VertexGraph},
    kernel::interpolate,
    ClipOptions,
};

mod relation;
pub use relation::Relation;

/// Find all intersections between `subject` and `clip`, inserting and linking
/// intersection vertices in both graphs.
///
/// Returns the number of intersection pairs created.
pub fn discover<T: GeoFloat>(
    subject: &mut VertexGraph<T>,
    clip: &mut VertexGraph<T>,
    options: &ClipOptions<T>,
) -> Result<usize> {
    let eps = options.intersect_eps;
    let p_edges = source_edges(subject);
    let q_edges = source_edges(clip);

    let mut count = 0;
    for &(p1, p2) in &p_edges {
        for &(q1, q2) in &q_edges {
            let (p1_pt, p2_pt) = (subject[p1].point(), subject[p2].point());
            let (q1_pt, q2_pt) = (clip[q1].point(), clip[q2].point());

            let relation = Relation::of(p1_pt, p2_pt, q1_pt, q2_pt, eps);
            if relation != Relation::Disjoint {
                trace!("discover: ({p1}, {p2}) x ({q1}, {q2}): {relation:?}");
            }
            match relation {
                Relation::Disjoint => {}
                Relation::Cross { alpha, beta } => {
                    let point = interpolate(p1_pt, p2_pt, alpha);
                    let i = subject.insert_intersection(point, p1, alpha)?;
                    let j = clip.insert_intersection(point, q1, beta)?;
                    link(subject, i, clip, j)?;
                    count += 1;
                }
                Relation::SubjectStartOnClip { beta } => {
                    count += start_on_edge(subject, p1, clip, q1, beta)?;
                }
                Relation::ClipStartOnSubject { alpha } => {
                    count += start_on_edge(clip, q1, subject, p1, alpha)?;
                }
                Relation::SharedStart => {
                    if subject[p1].is_intersection() || clip[q1].is_intersection() {
                        trace!("discover: {p1} / {q1} already linked");
                        continue;
                    }
                    link(subject, p1, clip, q1)?;
                    count += 1;
                }
                Relation::Overlap { alpha, beta } => {
                    count += start_on_edge(subject, p1, clip, q1, beta)?;
                    count += start_on_edge(clip, q1, subject, p1, alpha)?;
                }
            }
        }
    }

    debug!(
        "discover: {count} intersection pairs ({n} subject, {m} clip vertices)",
        n = subject.len(),
        m = clip.len()
    );
    Ok(count)
}

/// The source edges of a graph as pairs of vertex keys, collected before any
/// intersection vertex is inserted.
fn source_edges<T: GeoFloat>(graph: &VertexGraph<T>) -> Vec<(usize, usize)> {
    let keys: Vec<usize> = graph.vertices(Filter::Source).map(|(k, _)| k).collect();
    let n = keys.len();
    (0..n).map(|i| (keys[i], keys[(i + 1) % n])).collect()
}

/// Insert the point of source vertex `key` of `graph` into `edge` of `other`
/// at `alpha`, and link the two. Returns the number of pairs created.
fn start_on_edge<T: GeoFloat>(
    graph: &mut VertexGraph<T>,
    key: usize,
    other: &mut VertexGraph<T>,
    edge: usize,
    alpha: T,
) -> Result<usize> {
    if graph[key].is_intersection() {
        trace!("discover: {key} already linked");
        return Ok(0);
    }
    let point = graph[key].point();
    let inserted = other.insert_intersection(point, edge, alpha)?;
    link(graph, key, other, inserted)?;
    Ok(1)
}

#[cfg(test)]
pub(crate) mod tests {
    use approx::assert_relative_eq;
    use geo::Coordinate;

    use super::*;

    pub(crate) fn init_log() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    pub(crate) fn graph(coords: &[(f64, f64)]) -> VertexGraph<f64> {
        VertexGraph::from_coords(coords.iter().map(|&c| Coordinate::from(c)))
    }

    fn discovered(
        p: &[(f64, f64)],
        q: &[(f64, f64)],
    ) -> (VertexGraph<f64>, VertexGraph<f64>, usize) {
        init_log();
        let mut p = graph(p);
        let mut q = graph(q);
        let n = discover(&mut p, &mut q, &ClipOptions::default()).unwrap();
        (p, q, n)
    }

    fn check_pairs(p: &VertexGraph<f64>, q: &VertexGraph<f64>, n: usize) {
        let p_int: Vec<_> = p.vertices(Filter::Intersection).collect();
        let q_int: Vec<_> = q.vertices(Filter::Intersection).collect();
        assert_eq!(p_int.len(), n);
        assert_eq!(q_int.len(), n);
        for (key, v) in p_int {
            let nb = v.neighbour().unwrap();
            assert_eq!(q[nb].neighbour(), Some(key));
            assert_eq!(q[nb].point(), v.point());
        }
    }

    #[test]
    fn overlapping_squares() {
        let (p, q, n) = discovered(
            &[(0., 0.), (4., 0.), (4., 4.), (0., 4.)],
            &[(2., 2.), (6., 2.), (6., 6.), (2., 6.)],
        );
        assert_eq!(n, 2);
        check_pairs(&p, &q, n);
        assert_eq!(p.len(), 6);
        assert_eq!(q.len(), 6);

        let pts: Vec<_> = p
            .vertices(Filter::Intersection)
            .map(|(_, v)| v.point().x_y())
            .collect();
        assert_eq!(pts, vec![(4., 2.), (2., 4.)]);
    }

    #[test]
    fn sorted_on_edge() {
        // A zigzag crossing the bottom edge of the square from right to left.
        let (p, q, n) = discovered(
            &[(0., 0.), (10., 0.), (10., 10.), (0., 10.)],
            &[(7., -3.), (7., 1.), (5., -1.), (3., 1.), (1., -1.)],
        );
        assert_eq!(n, 4);
        check_pairs(&p, &q, n);
        let xs: Vec<_> = p
            .vertices(Filter::All)
            .take(6)
            .map(|(_, v)| v.point().x)
            .collect();
        for (x, expected) in xs.into_iter().zip([0., 2., 4., 6., 7., 10.]) {
            assert_relative_eq!(x, expected, epsilon = 1e-12);
        }
        for (_, v) in p.vertices(Filter::Intersection) {
            assert!(!v.is_source());
        }
    }

    #[test]
    fn shared_vertices_linked_once() {
        let square = [(0., 0.), (4., 0.), (4., 4.), (0., 4.)];
        let (p, q, n) = discovered(&square, &square);
        assert_eq!(n, 4);
        check_pairs(&p, &q, n);
        assert_eq!(p.len(), 4);
        assert_eq!(q.len(), 4);
        for (_, v) in p.vertices(Filter::All) {
            assert!(v.is_source() && v.is_intersection());
        }
    }

    #[test]
    fn t_junction_and_overlap() {
        // Clip shares part of the bottom edge and has a vertex on the top.
        let (p, q, n) = discovered(
            &[(0., 0.), (4., 0.), (4., 4.), (0., 4.)],
            &[(2., 0.), (6., 0.), (6., 6.), (3., 4.)],
        );
        check_pairs(&p, &q, n);
        let linked: Vec<_> = p
            .vertices(Filter::Intersection)
            .map(|(_, v)| (v.point().x_y(), v.is_source()))
            .collect();
        assert_eq!(linked[0], ((2., 0.), false));
        assert_eq!(linked[1], ((4., 0.), true));
        assert!(linked.contains(&((3., 4.), false)));
        let on_q: Vec<_> = q
            .vertices(Filter::Intersection)
            .map(|(_, v)| v.point().x_y())
            .collect();
        assert!(on_q.contains(&(4., 0.)));
        assert!(on_q.contains(&(3., 4.)));
    }

    #[test]
    fn disjoint() {
        let (p, q, n) = discovered(
            &[(0., 0.), (1., 0.), (1., 1.), (0., 1.)],
            &[(3., 3.), (4., 3.), (4., 4.)],
        );
        assert_eq!(n, 0);
        assert_eq!(p.vertices(Filter::Intersection).count(), 0);
        assert_eq!(q.vertices(Filter::Intersection).count(), 0);
    }
}
