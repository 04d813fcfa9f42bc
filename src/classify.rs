//! Labeling of intersection vertices.
//!
//! Each subject intersection vertex is labeled by where its two neighbouring
//! subject vertices lie relative to the clip boundary through the linked clip
//! vertex. Sequences of vertices along which both boundaries coincide
//! (collinear runs) are then collapsed into a single delayed crossing or
//! bouncing, and the final labels are copied to the clip.
//!
//! Whether a delayed bouncing run belongs to the result boundary depends on
//! the operation; [`split_runs`] turns the ends of the runs that do not into
//! crossings.
use geo::{kernels::Orientation, GeoFloat};
use log::{debug, trace};
use smallvec::SmallVec;

use crate::{
    error::{ClipError, Result},
    graph::{Filter, IntersectionLabel, VertexGraph},
    kernel::orientation,
};

/// Position of a vertex relative to the clip boundary near an intersection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Left,
    Right,
    On,
}

/// Side of subject vertex `u` relative to the clip chain
/// `(n.prev, n, n.next)`.
///
/// `On` if `u` is linked to either end of the chain, so the subject edge
/// between `u` and the intersection runs along the clip boundary. Otherwise a
/// left turning chain needs `u` strictly left of both legs to be `Left`, and
/// any other chain needs `u` strictly right of both legs to be `Right`.
fn side_of<T: GeoFloat>(
    subject: &VertexGraph<T>,
    u: usize,
    clip: &VertexGraph<T>,
    n: usize,
) -> Side {
    let u = &subject[u];
    let chain = &clip[n];
    if let Some(un) = u.neighbour() {
        if un == chain.prev() || un == chain.next() {
            return Side::On;
        }
    }

    let a = clip[chain.prev()].point();
    let b = chain.point();
    let c = clip[chain.next()].point();
    let p = u.point();

    let s1 = orientation(a, b, p);
    let s2 = orientation(b, c, p);
    if orientation(a, b, c) == Orientation::CounterClockwise {
        if s1 == Orientation::CounterClockwise && s2 == Orientation::CounterClockwise {
            Side::Left
        } else {
            Side::Right
        }
    } else if s1 == Orientation::Clockwise && s2 == Orientation::Clockwise {
        Side::Right
    } else {
        Side::Left
    }
}

fn initial_label(before: Side, after: Side) -> IntersectionLabel {
    use IntersectionLabel::*;
    use Side::*;
    match (before, after) {
        (Left, Right) | (Right, Left) => Crossing,
        (Left, Left) | (Right, Right) => Bouncing,
        (Left, On) => LeftOn,
        (Right, On) => RightOn,
        (On, Left) => OnLeft,
        (On, Right) => OnRight,
        (On, On) => OnOn,
    }
}

/// Label every intersection vertex of `subject` and `clip`.
///
/// On return both vertices of every intersection pair carry the same label,
/// and no label of the collinear family remains. If the subject boundary
/// lies entirely on the clip boundary, all labels are cleared.
pub fn classify<T: GeoFloat>(
    subject: &mut VertexGraph<T>,
    clip: &mut VertexGraph<T>,
) -> Result<()> {
    label_vertices(subject, clip);

    if !subject.is_empty()
        && subject
            .vertices(Filter::All)
            .all(|(_, v)| v.label() == IntersectionLabel::OnOn)
    {
        debug!("classify: subject coincides with clip");
        let keys: Vec<usize> = subject.vertices(Filter::All).map(|(k, _)| k).collect();
        for key in keys {
            subject[key].label = IntersectionLabel::None;
        }
    } else {
        resolve_runs(subject)?;
    }

    mirror_labels(subject, clip);

    if log::log_enabled!(log::Level::Debug) {
        let crossings = subject.vertices(Filter::CrossingIntersection).count();
        let intersections = subject.vertices(Filter::Intersection).count();
        debug!("classify: {crossings} crossings among {intersections} intersections");
    }
    Ok(())
}

/// Assign the initial label of every subject intersection vertex.
fn label_vertices<T: GeoFloat>(subject: &mut VertexGraph<T>, clip: &VertexGraph<T>) {
    let linked: Vec<(usize, usize)> = subject
        .vertices(Filter::Intersection)
        .filter_map(|(k, v)| Some((k, v.neighbour()?)))
        .collect();

    for (key, n) in linked {
        let before = side_of(subject, subject[key].prev(), clip, n);
        let after = side_of(subject, subject[key].next(), clip, n);
        let label = initial_label(before, after);
        trace!("label_vertices: {key} ({before:?}, {after:?}) -> {label:?}");
        subject[key].label = label;
    }
}

/// Collapse each collinear run into a delayed crossing or bouncing.
///
/// A run opens at a `LeftOn`/`RightOn` vertex, continues through `OnOn`
/// vertices and closes at an `OnLeft`/`OnRight` vertex. Both boundary
/// vertices get the delayed label; the closing one is marked `closes_run`.
pub(crate) fn resolve_runs<T: GeoFloat>(subject: &mut VertexGraph<T>) -> Result<()> {
    use IntersectionLabel::*;

    let openers: Vec<usize> = subject
        .vertices(Filter::Intersection)
        .filter(|(_, v)| matches!(v.label(), LeftOn | RightOn))
        .map(|(k, _)| k)
        .collect();

    for start in openers {
        let start_left = subject[start].label() == LeftOn;

        let mut members: SmallVec<[usize; 8]> = SmallVec::new();
        let mut end = subject[start].next();
        while subject[end].label() == OnOn && end != start {
            members.push(end);
            end = subject[end].next();
        }
        let end_left = match subject[end].label() {
            OnLeft => true,
            OnRight => false,
            label => {
                return Err(ClipError::unresolved(format!(
                    "collinear run from vertex {start} ends at vertex {end} labeled {label:?}"
                )))
            }
        };

        let delayed = if start_left == end_left {
            DelayedBouncing
        } else {
            DelayedCrossing
        };
        trace!(
            "resolve_runs: {start} .. {end} ({n} inner) -> {delayed:?}",
            n = members.len()
        );
        for key in members {
            subject[key].label = IntersectionLabel::None;
        }
        subject[start].label = delayed;
        subject[end].label = delayed;
        subject[end].closes_run = true;
    }

    if let Some((key, v)) = subject
        .vertices(Filter::Intersection)
        .find(|(_, v)| v.label().is_on())
    {
        return Err(ClipError::unresolved(format!(
            "vertex {key} left with label {label:?}",
            label = v.label()
        )));
    }
    Ok(())
}

/// Copy the final labels of the subject onto the linked clip vertices.
/// How both boundaries pass along a shared run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunSharing {
    /// Same direction: the interiors lie on the same side of the run.
    Aligned,
    /// Opposite directions: the polygons touch from either side.
    Opposed,
}

/// Make traversal switch polygons at both ends of every delayed bouncing run
/// shared as `sharing`, in both graphs. Returns the number of runs split.
///
/// Such a run then contributes two crossings; the result boundary leaves the
/// run at either end instead of following it.
pub fn split_runs<T: GeoFloat>(
    subject: &mut VertexGraph<T>,
    clip: &mut VertexGraph<T>,
    sharing: RunSharing,
) -> Result<usize> {
    let openers: Vec<(usize, usize)> = subject
        .vertices(Filter::Intersection)
        .filter(|(_, v)| v.label() == IntersectionLabel::DelayedBouncing && !v.closes_run())
        .filter_map(|(k, v)| Some((k, v.neighbour()?)))
        .collect();

    let mut split = 0;
    for (start, n) in openers {
        let along = subject[subject[start].next()].neighbour();
        let run = if along == Some(clip[n].next()) {
            RunSharing::Aligned
        } else if along == Some(clip[n].prev()) {
            RunSharing::Opposed
        } else {
            return Err(ClipError::unresolved(format!(
                "delayed bouncing at vertex {start} does not open a shared run"
            )));
        };
        if run != sharing {
            continue;
        }

        let mut end = subject[start].next();
        while !subject[end].closes_run() {
            end = subject[end].next();
            if end == start {
                return Err(ClipError::unresolved(format!(
                    "run from vertex {start} never closes"
                )));
            }
        }
        let end_n = subject[end]
            .neighbour()
            .ok_or_else(|| ClipError::unresolved(format!("run end {end} is not linked")))?;

        trace!("split_runs: {run:?} run {start} .. {end}");
        subject[start].splits_run = true;
        subject[end].splits_run = true;
        clip[n].splits_run = true;
        clip[end_n].splits_run = true;
        split += 1;
    }
    if split > 0 {
        debug!("split_runs: split {split} {sharing:?} runs");
    }
    Ok(split)
}

fn mirror_labels<T: GeoFloat>(subject: &VertexGraph<T>, clip: &mut VertexGraph<T>) {
    for (_, v) in subject.vertices(Filter::Intersection) {
        if let Some(n) = v.neighbour() {
            let other = &mut clip[n];
            other.label = v.label();
            other.closes_run = v.closes_run();
        }
    }
}
