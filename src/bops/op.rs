use geo::{Coordinate, GeoFloat};
use log::debug;

use super::{trace::trace_rings, Ring};
use crate::{
    classify::{classify, split_runs, RunSharing},
    crossings::discover,
    entry_exit::mark_entry_exit,
    error::Result,
    graph::{Filter, VertexGraph},
    ClipOptions,
};

/// A boolean operation between a subject `A` and a clip `B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum OpType {
    Intersection,
    Union,
    /// `A − B`
    Difference,
    /// `B − A`
    ReverseDifference,
    Xor,
}

/// One clipping invocation.
///
/// Owns validated working copies of both inputs; the caller's coordinates are
/// never modified.
#[derive(Debug, Clone)]
pub struct Op<T: GeoFloat> {
    ty: OpType,
    subject: VertexGraph<T>,
    clip: VertexGraph<T>,
    options: ClipOptions<T>,
}

impl<T: GeoFloat> Op<T> {
    pub fn new(subject: &[Coordinate<T>], clip: &[Coordinate<T>], ty: OpType) -> Result<Self> {
        Self::with_options(subject, clip, ty, ClipOptions::default())
    }

    pub fn with_options(
        subject: &[Coordinate<T>],
        clip: &[Coordinate<T>],
        ty: OpType,
        options: ClipOptions<T>,
    ) -> Result<Self> {
        let subject = VertexGraph::from_ring(subject, &options)?;
        let clip = VertexGraph::from_ring(clip, &options)?;
        debug!(
            "{ty:?}: subject with {n} vertices, clip with {m} vertices",
            n = subject.len(),
            m = clip.len()
        );
        Ok(Op {
            ty,
            subject,
            clip,
            options,
        })
    }

    #[inline]
    pub fn ty(&self) -> OpType {
        self.ty
    }

    /// Compute the result rings.
    ///
    /// Exteriors are counter-clockwise, holes clockwise. An empty result is
    /// an empty vector.
    pub fn run(self) -> Result<Vec<Ring<T>>> {
        let Op {
            ty,
            mut subject,
            mut clip,
            options,
        } = self;

        let pairs = discover(&mut subject, &mut clip, &options)?;
        classify(&mut subject, &mut clip)?;
        if let Some(sharing) = split_sharing(ty) {
            split_runs(&mut subject, &mut clip, sharing)?;
        }

        if subject.vertices(Filter::CrossingIntersection).next().is_none() {
            debug!("run: no crossings among {pairs} intersections");
            return Ok(resolve_without_crossings(ty, &subject, &clip, options.pos_equal_eps));
        }

        mark_entry_exit(&mut subject, &mut clip)?;
        let rings = trace_rings(&subject, &clip, ty, options.pos_equal_eps)?;
        debug!("run: {n} rings", n = rings.len());
        Ok(rings)
    }
}

/// Shared runs that lie inside the result of `ty`, away from its boundary.
///
/// Union drops the runs where the polygons touch from outside. The
/// differences drop runs along which both interiors lie on the same side;
/// there `A − B` is empty on either side of the run.
fn split_sharing(ty: OpType) -> Option<RunSharing> {
    match ty {
        OpType::Intersection => None,
        OpType::Union => Some(RunSharing::Opposed),
        OpType::Difference | OpType::ReverseDifference | OpType::Xor => Some(RunSharing::Aligned),
    }
}

/// Clip `subject` against `clip` with default options.
pub fn clip<T: GeoFloat>(
    subject: &[Coordinate<T>],
    clip: &[Coordinate<T>],
    ty: OpType,
) -> Result<Vec<Ring<T>>> {
    Op::new(subject, clip, ty)?.run()
}

/// Result when the boundaries meet nowhere or only touch.
///
/// Each polygon is then inside the other, or outside, as a whole. Graphs with
/// no point off the other boundary coincide with it and count as inside. Runs
/// shared along the result boundary have been split beforehand, so any ring
/// emitted here meets another only in single points or along edges that
/// bound the result on one side.
fn resolve_without_crossings<T: GeoFloat>(
    ty: OpType,
    subject: &VertexGraph<T>,
    clip: &VertexGraph<T>,
    eps: T,
) -> Vec<Ring<T>> {
    let inside = |g: &VertexGraph<T>, other: &VertexGraph<T>| match g.representative(other) {
        Some((_, point)) => other.contains_point(point),
        None => true,
    };
    let a_in_b = inside(subject, clip);
    let b_in_a = inside(clip, subject);

    let ring = |g: &VertexGraph<T>| {
        let coords = g.vertices(Filter::Source).map(|(_, v)| v.point()).collect();
        Ring::new(coords, eps)
    };
    let a = || ring(subject);
    let b = || ring(clip);

    use OpType::*;
    let rings = match (a_in_b, b_in_a) {
        (true, true) => match ty {
            Intersection | Union => vec![a()],
            Difference | ReverseDifference | Xor => vec![],
        },
        (true, false) => match ty {
            Intersection => vec![a()],
            Union => vec![b()],
            Difference => vec![],
            ReverseDifference | Xor => vec![b(), a().reversed()],
        },
        (false, true) => match ty {
            Intersection => vec![b()],
            Union => vec![a()],
            Difference | Xor => vec![a(), b().reversed()],
            ReverseDifference => vec![],
        },
        (false, false) => match ty {
            Intersection => vec![],
            Union | Xor => vec![a(), b()],
            Difference => vec![a()],
            ReverseDifference => vec![b()],
        },
    };
    debug!(
        "resolve_without_crossings: a_in_b = {a_in_b}, b_in_a = {b_in_a} -> {n} rings",
        n = rings.len()
    );
    rings
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::{crossings::tests::init_log, ClipError};

    fn coords(c: &[(f64, f64)]) -> Vec<Coordinate<f64>> {
        c.iter().map(|&c| c.into()).collect()
    }

    fn areas(p: &[(f64, f64)], q: &[(f64, f64)], ty: OpType) -> Vec<f64> {
        init_log();
        let mut areas: Vec<f64> = clip(&coords(p), &coords(q), ty)
            .unwrap()
            .iter()
            .map(|r| r.signed_area())
            .collect();
        areas.sort_by(|a, b| b.partial_cmp(a).unwrap());
        areas
    }

    fn total(p: &[(f64, f64)], q: &[(f64, f64)], ty: OpType) -> f64 {
        areas(p, q, ty).into_iter().sum()
    }

    const A: [(f64, f64); 4] = [(0., 0.), (4., 0.), (4., 4.), (0., 4.)];
    const B: [(f64, f64); 4] = [(2., 2.), (6., 2.), (6., 6.), (2., 6.)];
    const INNER: [(f64, f64); 4] = [(1., 1.), (3., 1.), (3., 3.), (1., 3.)];
    const FAR: [(f64, f64); 3] = [(10., 10.), (12., 10.), (11., 12.)];

    #[test]
    fn square_scenario() {
        assert_eq!(areas(&A, &B, OpType::Intersection), vec![4.]);
        assert_eq!(areas(&A, &B, OpType::Union), vec![28.]);
        assert_eq!(areas(&A, &B, OpType::Difference), vec![12.]);
        assert_eq!(areas(&A, &B, OpType::ReverseDifference), vec![12.]);
        assert_eq!(areas(&A, &B, OpType::Xor), vec![12., 12.]);
    }

    #[test]
    fn commutative() {
        for ty in [OpType::Intersection, OpType::Union, OpType::Xor] {
            assert_relative_eq!(total(&A, &B, ty), total(&B, &A, ty));
        }
        assert_relative_eq!(
            total(&A, &B, OpType::Difference),
            total(&B, &A, OpType::ReverseDifference)
        );
    }

    #[test]
    fn clockwise_input() {
        let mut cw = A;
        cw.reverse();
        assert_eq!(areas(&cw, &B, OpType::Intersection), vec![4.]);
        assert_eq!(areas(&cw, &B, OpType::Union), vec![28.]);
    }

    #[test]
    fn nested() {
        assert_eq!(areas(&A, &INNER, OpType::Intersection), vec![4.]);
        assert_eq!(areas(&A, &INNER, OpType::Union), vec![16.]);
        assert_eq!(areas(&A, &INNER, OpType::Difference), vec![16., -4.]);
        assert!(areas(&A, &INNER, OpType::ReverseDifference).is_empty());
        assert_eq!(areas(&A, &INNER, OpType::Xor), vec![16., -4.]);

        assert_eq!(areas(&INNER, &A, OpType::Intersection), vec![4.]);
        assert_eq!(areas(&INNER, &A, OpType::Union), vec![16.]);
        assert!(areas(&INNER, &A, OpType::Difference).is_empty());
        assert_eq!(areas(&INNER, &A, OpType::ReverseDifference), vec![16., -4.]);
    }

    #[test]
    fn disjoint() {
        assert!(areas(&A, &FAR, OpType::Intersection).is_empty());
        assert_eq!(areas(&A, &FAR, OpType::Union), vec![16., 2.]);
        assert_eq!(areas(&A, &FAR, OpType::Difference), vec![16.]);
        assert_eq!(areas(&A, &FAR, OpType::ReverseDifference), vec![2.]);
        assert_eq!(areas(&A, &FAR, OpType::Xor), vec![16., 2.]);
    }

    #[test]
    fn identical() {
        assert_eq!(areas(&A, &A, OpType::Intersection), vec![16.]);
        assert_eq!(areas(&A, &A, OpType::Union), vec![16.]);
        assert!(areas(&A, &A, OpType::Difference).is_empty());
        assert!(areas(&A, &A, OpType::ReverseDifference).is_empty());
        assert!(areas(&A, &A, OpType::Xor).is_empty());
    }

    #[test]
    fn touching() {
        // Corner touch and shared edge: no area in common.
        let corner = [(4., 4.), (8., 4.), (8., 8.), (4., 8.)];
        let side = [(4., 0.), (8., 0.), (8., 4.), (4., 4.)];
        for other in [&corner, &side] {
            assert!(areas(&A, other, OpType::Intersection).is_empty());
            assert_relative_eq!(total(&A, other, OpType::Union), 32.);
            assert_eq!(areas(&A, other, OpType::Difference), vec![16.]);
        }
        // A corner touch keeps both squares.
        assert_eq!(areas(&A, &corner, OpType::Union), vec![16., 16.]);
    }

    #[test]
    fn shared_edge_union_merges() {
        init_log();
        let side = [(4., 0.), (8., 0.), (8., 4.), (4., 4.)];
        for (p, q) in [(&A, &side), (&side, &A)] {
            let rings = clip(&coords(p), &coords(q), OpType::Union).unwrap();
            assert_eq!(rings.len(), 1, "{rings:?}");
            assert_relative_eq!(rings[0].signed_area(), 32.);
        }

        // Partly shared edge.
        let top = [(1., 4.), (6., 4.), (6., 7.), (1., 7.)];
        assert_eq!(areas(&A, &top, OpType::Union), vec![31.]);
    }

    #[test]
    fn difference_along_shared_boundary() {
        init_log();
        let left = [(0., 0.), (2., 0.), (2., 4.), (0., 4.)];
        let rings = clip(&coords(&A), &coords(&left), OpType::Difference).unwrap();
        assert_eq!(rings.len(), 1, "{rings:?}");
        let mut points: Vec<_> = rings[0].coords().iter().map(|c| c.x_y()).collect();
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(points, vec![(2., 0.), (2., 4.), (4., 0.), (4., 4.)]);
        assert_relative_eq!(rings[0].signed_area(), 8.);

        assert!(areas(&A, &left, OpType::ReverseDifference).is_empty());
        assert_eq!(areas(&A, &left, OpType::Xor), vec![8.]);
        assert_eq!(areas(&A, &left, OpType::Intersection), vec![8.]);
        assert_eq!(areas(&A, &left, OpType::Union), vec![16.]);

        // Square touching the bottom edge from inside: a notch, not a hole.
        let notch = [(1., 0.), (3., 0.), (3., 2.), (1., 2.)];
        assert_eq!(areas(&A, &notch, OpType::Difference), vec![12.]);
        assert!(areas(&A, &notch, OpType::ReverseDifference).is_empty());
        assert!(areas(&notch, &A, OpType::Difference).is_empty());
        assert_eq!(areas(&notch, &A, OpType::ReverseDifference), vec![12.]);
        assert_eq!(areas(&notch, &A, OpType::Xor), vec![12.]);
    }

    #[test]
    fn delayed_crossing() {
        let l_shape = [(2., 1.), (4., 1.), (4., 3.), (8., 3.), (8., -2.), (2., -2.)];
        // L-shape area: 6 x 3 + 4 x 2 = 26; overlap with A: 2 x 1 = 2.
        assert_relative_eq!(total(&A, &l_shape, OpType::Intersection), 2.);
        assert_relative_eq!(total(&A, &l_shape, OpType::Union), 16. + 26. - 2.);
        assert_relative_eq!(total(&A, &l_shape, OpType::Difference), 14.);
        assert_relative_eq!(total(&A, &l_shape, OpType::ReverseDifference), 24.);
    }

    #[test]
    fn invalid_input() {
        init_log();
        let line = coords(&[(0., 0.), (1., 1.)]);
        match clip(&line, &coords(&A), OpType::Union) {
            Err(ClipError::InvalidPolygon { .. }) => {}
            other => panic!("expected InvalidPolygon, got {:?}", other),
        }
        let bowtie = coords(&[(0., 0.), (4., 4.), (4., 0.), (0., 4.), (-1., 2.)]);
        assert!(clip(&coords(&A), &bowtie, OpType::Union).is_err());
    }
}
