use geo::{Coordinate, GeoFloat};

use crate::kernel::oriented_area;

/// How the edge `P1P2` of the subject meets the edge `Q1Q2` of the clip.
///
/// Only the start points of the two edges are ever reported as touching
/// points; an edge whose *end* touches the other edge is reported by the pair
/// starting there. `alpha` is a position along `P1P2`, `beta` a position along
/// `Q1Q2`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Relation<T: GeoFloat> {
    /// The edges cross at interior points of both.
    Cross { alpha: T, beta: T },
    /// `P1` lies in the interior of `Q1Q2`, at `beta`.
    SubjectStartOnClip { beta: T },
    /// `Q1` lies in the interior of `P1P2`, at `alpha`.
    ClipStartOnSubject { alpha: T },
    /// `P1` and `Q1` coincide.
    SharedStart,
    /// The edges are collinear and each start point lies in the interior of
    /// the other edge.
    Overlap { alpha: T, beta: T },
    Disjoint,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Param {
    Zero,
    Inside,
    Outside,
}

fn classify_param<T: GeoFloat>(t: T, eps: T) -> Param {
    if t > eps && t < T::one() - eps {
        Param::Inside
    } else if t.abs() <= eps {
        Param::Zero
    } else {
        Param::Outside
    }
}

fn dot<T: GeoFloat>(u: Coordinate<T>, v: Coordinate<T>) -> T {
    u.x * v.x + u.y * v.y
}

impl<T: GeoFloat> Relation<T> {
    /// Classify the pair of edges `p1 → p2` and `q1 → q2`.
    ///
    /// Non-parallel edges are resolved with the oriented areas of each end
    /// point against the other edge. Collinear edges are resolved by
    /// projecting each start point onto the other edge. Parallel edges that
    /// are not collinear are disjoint.
    pub fn of(
        p1: Coordinate<T>,
        p2: Coordinate<T>,
        q1: Coordinate<T>,
        q2: Coordinate<T>,
        eps: T,
    ) -> Self {
        use Param::*;

        let ap1 = oriented_area(p1, q1, q2);
        let ap2 = oriented_area(p2, q1, q2);

        if (ap1 - ap2).abs() > eps {
            let aq1 = oriented_area(q1, p1, p2);
            let aq2 = oriented_area(q2, p1, p2);
            let alpha = ap1 / (ap1 - ap2);
            let beta = aq1 / (aq1 - aq2);
            return match (classify_param(alpha, eps), classify_param(beta, eps)) {
                (Inside, Inside) => Relation::Cross { alpha, beta },
                (Zero, Inside) => Relation::SubjectStartOnClip { beta },
                (Inside, Zero) => Relation::ClipStartOnSubject { alpha },
                (Zero, Zero) => Relation::SharedStart,
                _ => Relation::Disjoint,
            };
        }

        if ap1.abs() < eps {
            let dp = p2 - p1;
            let dq = q2 - q1;
            let alpha = dot(q1 - p1, dp) / dot(dp, dp);
            let beta = dot(p1 - q1, dq) / dot(dq, dq);
            return match (classify_param(alpha, eps), classify_param(beta, eps)) {
                (Inside, Inside) => Relation::Overlap { alpha, beta },
                (Zero, Zero) => Relation::SharedStart,
                (_, Inside) => Relation::SubjectStartOnClip { beta },
                (Inside, _) => Relation::ClipStartOnSubject { alpha },
                _ => Relation::Disjoint,
            };
        }

        Relation::Disjoint
    }
}
