//! Tracing of result rings through the two vertex graphs.
use std::collections::HashSet;

use geo::GeoFloat;
use log::{debug, trace};

use super::{OpType, Ring};
use crate::{
    error::{ClipError, Result},
    graph::{EntryExit, Filter, VertexGraph},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Direction {
    Forward,
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Subject,
    Clip,
}

impl Role {
    fn other(self) -> Self {
        match self {
            Role::Subject => Role::Clip,
            Role::Clip => Role::Subject,
        }
    }
}

/// Whether traversal goes forward at an `Entry` crossing, for the subject and
/// for the clip. `None` for operations that are traced as a combination of
/// others.
fn forward_on_entry(ty: OpType) -> Option<(bool, bool)> {
    match ty {
        OpType::Intersection => Some((true, true)),
        OpType::Union => Some((false, false)),
        OpType::Difference => Some((false, true)),
        OpType::ReverseDifference => Some((true, false)),
        OpType::Xor => None,
    }
}

/// Trace all result rings of `ty`.
///
/// Both graphs must be counter-clockwise, classified and marked. The
/// symmetric difference is traced as both differences.
pub(crate) fn trace_rings<T: GeoFloat>(
    subject: &VertexGraph<T>,
    clip: &VertexGraph<T>,
    ty: OpType,
    eps: T,
) -> Result<Vec<Ring<T>>> {
    let (subject_rule, clip_rule) = match forward_on_entry(ty) {
        Some(rule) => rule,
        None => {
            let mut rings = trace_rings(subject, clip, OpType::Difference, eps)?;
            rings.extend(trace_rings(subject, clip, OpType::ReverseDifference, eps)?);
            return Ok(rings);
        }
    };
    let start_role = if ty == OpType::ReverseDifference {
        Role::Clip
    } else {
        Role::Subject
    };
    Tracer {
        subject,
        clip,
        subject_rule,
        clip_rule,
        consumed: HashSet::new(),
        budget: subject.len() + clip.len(),
    }
    .run(start_role, eps)
}

struct Tracer<'a, T: GeoFloat> {
    subject: &'a VertexGraph<T>,
    clip: &'a VertexGraph<T>,
    subject_rule: bool,
    clip_rule: bool,
    /// Half-flags: (subject key of the pair, direction of departure).
    consumed: HashSet<(usize, Direction)>,
    budget: usize,
}

impl<'a, T: GeoFloat> Tracer<'a, T> {
    fn graph(&self, role: Role) -> &'a VertexGraph<T> {
        match role {
            Role::Subject => self.subject,
            Role::Clip => self.clip,
        }
    }

    fn direction(&self, role: Role, key: usize) -> Direction {
        let rule = match role {
            Role::Subject => self.subject_rule,
            Role::Clip => self.clip_rule,
        };
        let entry = self.graph(role)[key].entry_exit() == EntryExit::Entry;
        if entry == rule {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }

    /// Pairs are identified by their subject vertex.
    fn pair(&self, role: Role, key: usize) -> Result<usize> {
        match role {
            Role::Subject => Ok(key),
            Role::Clip => self.clip[key]
                .neighbour()
                .ok_or_else(|| ClipError::unresolved(format!("clip vertex {key} is not linked"))),
        }
    }

    fn run(mut self, start_role: Role, eps: T) -> Result<Vec<Ring<T>>> {
        let starts: Vec<usize> = self
            .graph(start_role)
            .vertices(Filter::CrossingIntersection)
            .map(|(k, _)| k)
            .collect();

        let mut rings = vec![];
        for start in starts {
            if self.direction(start_role, start) != Direction::Forward {
                continue;
            }
            let start_pair = self.pair(start_role, start)?;
            if self.consumed.contains(&(start_pair, Direction::Forward)) {
                continue;
            }
            let ring = Ring::new(self.walk(start_role, start, start_pair)?, eps);
            if ring.is_degenerate() {
                trace!("run: dropping degenerate ring {:?}", ring.coords());
                continue;
            }
            rings.push(ring);
        }
        debug!("run: traced {n} rings", n = rings.len());
        Ok(rings)
    }

    /// Collect the points of one ring, starting at crossing `start`.
    fn walk(
        &mut self,
        mut role: Role,
        start: usize,
        start_pair: usize,
    ) -> Result<Vec<geo::Coordinate<T>>> {
        let mut points = vec![];
        let mut key = start;
        let mut steps = 0;
        loop {
            let direction = self.direction(role, key);
            let pair = self.pair(role, key)?;
            if !self.consumed.insert((pair, direction)) {
                return Err(ClipError::unresolved(format!(
                    "crossing {pair} left {direction:?} twice"
                )));
            }
            trace!("walk: leave {pair} on {role:?} {direction:?}");

            let graph = self.graph(role);
            points.push(graph[key].point());
            loop {
                key = match direction {
                    Direction::Forward => graph[key].next(),
                    Direction::Backward => graph[key].prev(),
                };
                steps += 1;
                if steps > self.budget {
                    return Err(ClipError::unresolved(format!(
                        "ring from crossing {start_pair} does not close"
                    )));
                }
                if graph[key].is_crossing() {
                    break;
                }
                points.push(graph[key].point());
            }

            if self.pair(role, key)? == start_pair {
                return Ok(points);
            }
            key = graph[key]
                .neighbour()
                .ok_or_else(|| ClipError::unresolved(format!("crossing {key} is not linked")))?;
            role = role.other();
        }
    }
}
