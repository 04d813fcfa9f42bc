//! Boolean operations on polygons.
//!
//! [`Op`] runs one operation on two coordinate rings and yields [`Ring`]s;
//! [`BooleanOp`] wraps it for `geo` polygons, assembling the rings into a
//! [`MultiPolygon`].
use geo::{Coordinate, GeoFloat, MultiPolygon, Polygon};

use crate::error::{ClipError, Result};

mod op;
pub use op::{clip, Op, OpType};

mod rings;
pub use rings::{assemble, Ring};

mod trace;

/// Boolean operations between two polygons without holes.
pub trait BooleanOp<T: GeoFloat> {
    fn boolean(&self, other: &Self, ty: OpType) -> Result<MultiPolygon<T>>;

    fn intersection(&self, other: &Self) -> Result<MultiPolygon<T>> {
        self.boolean(other, OpType::Intersection)
    }
    fn union(&self, other: &Self) -> Result<MultiPolygon<T>> {
        self.boolean(other, OpType::Union)
    }
    fn difference(&self, other: &Self) -> Result<MultiPolygon<T>> {
        self.boolean(other, OpType::Difference)
    }
    fn xor(&self, other: &Self) -> Result<MultiPolygon<T>> {
        self.boolean(other, OpType::Xor)
    }
}

impl<T: GeoFloat> BooleanOp<T> for Polygon<T> {
    fn boolean(&self, other: &Self, ty: OpType) -> Result<MultiPolygon<T>> {
        let rings = Op::new(exterior(self)?, exterior(other)?, ty)?.run()?;
        Ok(assemble(rings))
    }
}

fn exterior<T: GeoFloat>(poly: &Polygon<T>) -> Result<&[Coordinate<T>]> {
    if !poly.interiors().is_empty() {
        return Err(ClipError::invalid_polygon("polygons with holes are not supported"));
    }
    Ok(&poly.exterior().0)
}
