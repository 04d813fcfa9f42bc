use geo::{kernels::Orientation, Coordinate, GeoFloat, LineString, MultiPolygon, Polygon};
use log::{debug, warn};

use crate::{
    graph::point_in_polygon,
    kernel::{fuzzy_eq, midpoint, orientation, ring_area},
};

/// A closed output boundary.
///
/// The closing point is implicit. Counter-clockwise rings bound the interior
/// of a result polygon, clockwise rings are its holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring<T: GeoFloat> {
    coords: Vec<Coordinate<T>>,
    area: T,
}

impl<T: GeoFloat> Ring<T> {
    /// Build a ring, dropping repeated points and zero-width spikes.
    ///
    /// A spike is a vertex where the boundary turns back on itself along the
    /// same line, as left behind when a traced path runs along a shared edge
    /// and returns. Removal is repeated until no spike or duplicate remains.
    pub fn new(mut coords: Vec<Coordinate<T>>, eps: T) -> Self {
        loop {
            let before = coords.len();

            coords.dedup_by(|a, b| fuzzy_eq(*a, *b, eps));
            while coords.len() > 1 && fuzzy_eq(coords[0], coords[coords.len() - 1], eps) {
                coords.pop();
            }

            let n = coords.len();
            if n >= 3 {
                let spike = (0..n).find(|&i| {
                    let a = coords[(i + n - 1) % n];
                    let b = coords[i];
                    let c = coords[(i + 1) % n];
                    let (ab, bc) = (b - a, c - b);
                    orientation(a, b, c) == Orientation::Collinear
                        && ab.x * bc.x + ab.y * bc.y < T::zero()
                });
                if let Some(i) = spike {
                    coords.remove(i);
                }
            }

            if coords.len() == before {
                break;
            }
        }
        let area = ring_area(&coords);
        Ring { coords, area }
    }

    /// The points of the ring, without the closing point.
    #[inline]
    pub fn coords(&self) -> &[Coordinate<T>] {
        &self.coords
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.coords.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    /// Signed area; negative for holes.
    #[inline]
    pub fn signed_area(&self) -> T {
        self.area
    }

    #[inline]
    pub fn is_hole(&self) -> bool {
        self.signed_area() < T::zero()
    }

    /// True if the ring cannot bound any area.
    pub fn is_degenerate(&self) -> bool {
        self.coords.len() < 3 || self.signed_area() == T::zero()
    }

    pub fn reversed(mut self) -> Self {
        self.coords.reverse();
        self.area = -self.area;
        self
    }

    /// Closed line string of the ring.
    pub fn into_line_string(self) -> LineString<T> {
        let mut ls = LineString(self.coords);
        ls.close();
        ls
    }

    /// Whether `other` lies inside this ring.
    ///
    /// Points of `other` may touch this boundary, so vertices and edge
    /// midpoints are all tested; any strictly inside one decides.
    fn encloses(&self, other: &Ring<T>) -> bool {
        let n = other.coords.len();
        (0..n).any(|i| {
            let a = other.coords[i];
            let b = other.coords[(i + 1) % n];
            point_in_polygon(&self.coords, a) || point_in_polygon(&self.coords, midpoint(a, b))
        })
    }
}

/// Group rings into polygons.
///
/// Every hole is attached to the smallest exterior that encloses it.
pub fn assemble<T: GeoFloat>(rings: Vec<Ring<T>>) -> MultiPolygon<T> {
    let (holes, exteriors): (Vec<_>, Vec<_>) = rings.into_iter().partition(|r| r.is_hole());
    let mut polygons: Vec<(Ring<T>, Vec<Ring<T>>)> =
        exteriors.into_iter().map(|r| (r, vec![])).collect();

    for hole in holes {
        let outer = hole.clone().reversed();
        let parent = polygons
            .iter()
            .enumerate()
            .filter(|(_, (ext, _))| ext.encloses(&outer))
            .min_by(|(_, (a, _)), (_, (b, _))| {
                a.signed_area()
                    .partial_cmp(&b.signed_area())
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(idx, _)| idx);
        match parent {
            Some(idx) => polygons[idx].1.push(hole),
            None => warn!("assemble: dropping hole without exterior: {:?}", hole.coords()),
        }
    }

    debug!("assemble: {n} polygons", n = polygons.len());
    polygons
        .into_iter()
        .map(|(ext, holes)| {
            Polygon::new(
                ext.into_line_string(),
                holes.into_iter().map(Ring::into_line_string).collect(),
            )
        })
        .collect()
}
