use std::f64::consts::PI;

use geo::{map_coords::MapCoords, Coordinate, LineString, Polygon, Rect};

use rand::Rng;
use rand_distr::{Distribution, Uniform};

/// A star-shaped polygon around the origin with `steps` vertices.
///
/// Vertex angles are strictly increasing and radii lie in `[0.5, 1)`, so the
/// polygon is simple and counter-clockwise.
pub fn circular_polygon<R: Rng>(mut rng: R, steps: usize) -> Polygon<f64> {
    let ang_step = 2. * PI / steps as f64;
    let jitter = Uniform::new(0., 0.9);
    let radius = Uniform::new(0.5, 1.);

    let ring: LineString<f64> = (0..steps)
        .map(|i| {
            let angle = (i as f64 + jitter.sample(&mut rng)) * ang_step;
            let r = radius.sample(&mut rng);
            Coordinate {
                x: r * angle.cos(),
                y: r * angle.sin(),
            }
        })
        .collect();
    Polygon::new(ring, vec![])
}

/// [`circular_polygon`] scaled by `scale` and snapped to the integer grid.
///
/// Snapping produces repeated and collinear points and may leave the ring
/// self-touching or self-crossing.
#[allow(dead_code)]
pub fn grid_polygon<R: Rng>(rng: R, steps: usize, scale: f64) -> Polygon<f64> {
    circular_polygon(rng, steps).map_coords(|&(x, y)| ((x * scale).round(), (y * scale).round()))
}

/// A rectangle with integer corners in `[0, size]` and positive area.
#[allow(dead_code)]
pub fn grid_rect<R: Rng>(mut rng: R, size: i32) -> Rect<f64> {
    let coord = Uniform::new_inclusive(0, size);
    let mut span = || loop {
        let (a, b) = (coord.sample(&mut rng), coord.sample(&mut rng));
        if a != b {
            return (a.min(b) as f64, a.max(b) as f64);
        }
    };
    let (x0, x1) = span();
    let (y0, y1) = span();
    Rect::new(Coordinate { x: x0, y: y0 }, Coordinate { x: x1, y: y1 })
}

/// A fixed set of inputs cycled through by benchmarks.
#[allow(dead_code)]
pub struct Samples<T>(Vec<T>);

#[allow(dead_code)]
impl<T> Samples<T> {
    pub fn from_fn<F: FnMut() -> T>(size: usize, mut proc: F) -> Self {
        Self((0..size).map(|_| proc()).collect())
    }

    pub fn sampler<'a>(&'a self) -> impl FnMut() -> &'a T {
        let mut curr = 0;
        move || {
            let sample = &self.0[curr];
            curr = (curr + 1) % self.0.len();
            sample
        }
    }
}
