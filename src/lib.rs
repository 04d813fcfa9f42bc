//! Boolean operations on simple polygons, robust to degenerate input.
//!
//! Computes the intersection, union, differences and symmetric difference of
//! two simple polygons with the vertex-graph approach of Greiner & Hormann,
//! extended to degenerate intersections following Foster, Hormann & Popa
//! (2019). Shared vertices, vertices lying on the other polygon's edges,
//! overlapping collinear edges and coincident polygons need no perturbation.
//!
//! # Usage
//!
//! The simplest entry point is the [`BooleanOp`] trait on [`geo::Polygon`]:
//!
//! ```rust
//! use geo::{polygon, algorithm::area::Area};
//! use geo_polyclip::BooleanOp;
//!
//! let a = polygon![(x: 0., y: 0.), (x: 4., y: 0.), (x: 4., y: 4.), (x: 0., y: 4.)];
//! let b = polygon![(x: 2., y: 2.), (x: 6., y: 2.), (x: 6., y: 6.), (x: 2., y: 6.)];
//! let union = a.union(&b).unwrap();
//! assert_eq!(union.unsigned_area(), 28.);
//! ```
//!
//! [`clip`] and [`Op`] work on coordinate slices and return [`Ring`]s. Rings
//! are counter-clockwise, except for holes which are clockwise; [`assemble`]
//! groups them into polygons.
//!
//! # Algorithm
//!
//! Each input is copied into a [`VertexGraph`]. The phases are:
//!
//! 1. [`crossings::discover`] inserts and links a vertex pair for every point
//!    where the boundaries meet.
//! 1. [`classify::classify`] labels every pair as a crossing or bouncing,
//!    collapsing runs of overlapping edges. [`classify::split_runs`] then
//!    turns the ends of shared runs that the result does not follow into
//!    crossings.
//! 1. [`entry_exit::mark_entry_exit`] flags crossings as entering or leaving
//!    the other polygon.
//! 1. The result rings are traced, switching graphs at crossings.
//!
//! If the boundaries never cross, the result follows from a single
//! point-in-polygon test per input.
pub mod error;
pub use error::ClipError;

mod options;
pub use options::ClipOptions;

pub mod kernel;

pub mod graph;
pub use graph::{point_in_polygon, Filter, Vertex, VertexGraph};

pub mod crossings;
pub mod classify;
pub mod entry_exit;

pub mod bops;
pub use bops::{assemble, clip, BooleanOp, Op, OpType, Ring};

#[cfg(test)]
#[path = "../benches/utils/random.rs"]
pub mod random;
