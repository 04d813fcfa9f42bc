//! Entry/exit flags on crossing vertices.
use geo::GeoFloat;
use log::{debug, trace};

use crate::{
    error::{ClipError, Result},
    graph::{EntryExit, Filter, VertexGraph},
};

/// Flag the crossing vertices of both graphs.
pub fn mark_entry_exit<T: GeoFloat>(
    subject: &mut VertexGraph<T>,
    clip: &mut VertexGraph<T>,
) -> Result<()> {
    assign(subject, clip)?;
    assign(clip, subject)
}

/// Walk the crossings of `graph` from a point off the boundary of `other`,
/// alternating between `Entry` and `Exit`.
///
/// The walk starts with `Exit` if that point is inside `other`. A graph whose
/// every edge runs along `other` has no crossings and is left unchanged.
pub fn assign<T: GeoFloat>(graph: &mut VertexGraph<T>, other: &VertexGraph<T>) -> Result<()> {
    let (start, point) = match graph.representative(other) {
        Some(rep) => rep,
        None => {
            debug!("assign: boundary lies on the other polygon, nothing to mark");
            return Ok(());
        }
    };

    let crossings: Vec<usize> = graph
        .vertices_from(Filter::CrossingIntersection, start)
        .map(|(k, _)| k)
        .collect();
    if crossings.len() % 2 != 0 {
        return Err(ClipError::unresolved(format!(
            "odd number of crossings ({n})",
            n = crossings.len()
        )));
    }

    let mut status = if other.contains_point(point) {
        EntryExit::Exit
    } else {
        EntryExit::Entry
    };
    debug!(
        "assign: {n} crossings, starting at {start} with {status:?}",
        n = crossings.len()
    );
    for key in crossings {
        trace!("assign: {key} -> {status:?}");
        graph[key].entry_exit = status;
        status = status.toggle();
    }
    Ok(())
}
