//! Geometric primitives shared by all clipping phases.
//!
//! Every decision the engine makes about the relative position of points is
//! derived from [`oriented_area`]. [`orientation`] returns its sign, evaluated
//! with the robust kernel of the scalar type.
use geo::{
    area::Area,
    kernels::{Kernel, Orientation},
    Coordinate, GeoFloat, LineString, Polygon,
};

/// Twice the signed area of the triangle `(p, q, r)`.
///
/// Positive if `r` lies to the left of the directed line `p → q`, negative if
/// it lies to the right and zero if the three points are collinear.
#[inline]
pub fn oriented_area<T: GeoFloat>(p: Coordinate<T>, q: Coordinate<T>, r: Coordinate<T>) -> T {
    (q.x - p.x) * (r.y - p.y) - (q.y - p.y) * (r.x - p.x)
}

/// Sign of [`oriented_area`] as an [`Orientation`].
#[inline]
pub fn orientation<T: GeoFloat>(
    p: Coordinate<T>,
    q: Coordinate<T>,
    r: Coordinate<T>,
) -> Orientation {
    T::Ker::orient2d(p, q, r)
}

/// The point `p + alpha * (q - p)`.
#[inline]
pub fn interpolate<T: GeoFloat>(p: Coordinate<T>, q: Coordinate<T>, alpha: T) -> Coordinate<T> {
    Coordinate {
        x: p.x + alpha * (q.x - p.x),
        y: p.y + alpha * (q.y - p.y),
    }
}

#[inline]
pub fn midpoint<T: GeoFloat>(p: Coordinate<T>, q: Coordinate<T>) -> Coordinate<T> {
    let two = T::one() + T::one();
    interpolate(p, q, T::one() / two)
}

/// Signed area enclosed by an implicitly closed ring, positive for
/// counter-clockwise rings.
pub fn ring_area<T: GeoFloat>(coords: &[Coordinate<T>]) -> T {
    Polygon::new(LineString(coords.to_vec()), vec![]).signed_area()
}

/// Fuzzy equality of two points (component-wise within `eps`).
#[inline]
pub fn fuzzy_eq<T: GeoFloat>(p: Coordinate<T>, q: Coordinate<T>, eps: T) -> bool {
    (p.x - q.x).abs() <= eps && (p.y - q.y).abs() <= eps
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coordinate<f64> {
        Coordinate { x, y }
    }

    #[test]
    fn oriented_area_sign() {
        let p = c(0., 0.);
        let q = c(2., 0.);
        assert_relative_eq!(oriented_area(p, q, c(1., 1.)), 2.);
        assert_relative_eq!(oriented_area(p, q, c(1., -1.)), -2.);
        assert_eq!(oriented_area(p, q, c(5., 0.)), 0.);

        assert_eq!(orientation(p, q, c(1., 1.)), Orientation::CounterClockwise);
        assert_eq!(orientation(p, q, c(1., -1.)), Orientation::Clockwise);
        assert_eq!(orientation(p, q, c(-3., 0.)), Orientation::Collinear);
    }

    #[test]
    fn interpolation() {
        let p = c(1., 1.);
        let q = c(3., 5.);
        assert_eq!(interpolate(p, q, 0.), p);
        assert_eq!(interpolate(p, q, 0.25), c(1.5, 2.));
        assert_eq!(midpoint(p, q), c(2., 3.));
    }

    #[test]
    fn signed_ring_areas() {
        let square = [c(0., 0.), c(4., 0.), c(4., 4.), c(0., 4.)];
        assert_relative_eq!(ring_area(&square), 16.);

        let mut reversed = square;
        reversed.reverse();
        assert_relative_eq!(ring_area(&reversed), -16.);
        assert_eq!(ring_area::<f64>(&[]), 0.);
        assert_eq!(ring_area(&[c(0., 0.), c(1., 1.), c(2., 2.)]), 0.);
    }
}
