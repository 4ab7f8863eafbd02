// Copyright 2023 John Nunley
//
// This file is part of blood-geometry.
//
// blood-geometry is free software: you can redistribute it and/or modify it
// under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or (at your
// option) any later version.
//
// blood-geometry is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE. See the GNU General Public License
// for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with blood-geometry. If not, see <https://www.gnu.org/licenses/>.

//! Numerical primitives for 2D Bézier path segments.
//!
//! `bezier-kernel` operates on lines, quadratic Béziers and cubic Béziers:
//! it solves for real roots, converts between control-point and
//! power-basis representations, measures arc length, computes bounding
//! boxes, splits segments at a parameter or at an axis-aligned
//! coordinate, and finds intersections between segments of any degree
//! combination.
//!
//! This is a numerical kernel, not a rendering or path-building toolkit:
//! pen/outline event streams, affine transforms, and I/O live elsewhere.
//! Every operation here is a pure function of its inputs.

mod error;
mod intersect;
mod point;
mod solve;
mod split;

pub mod curve;

pub use curve::{
    approximate_cubic_arc_length, approximate_quadratic_arc_length, calc_cubic_arc_length,
    calc_cubic_bounds, calc_quadratic_arc_length, calc_quadratic_bounds, cubic_point_at_t,
    line_point_at_t, quadratic_point_at_t, segment_point_at_t, Bounds,
};
pub use error::GeometryError;
pub use intersect::{
    curve_curve_intersections, curve_line_intersections, line_line_intersections,
    segment_segment_intersections, Intersection,
};
pub use point::{Point, Vector};
pub use solve::{solve_cubic, solve_quadratic};
pub use split::{
    split_cubic, split_cubic_at_t, split_line, split_quadratic, split_quadratic_at_t, Axis,
};

/// Threshold below which a polynomial leading coefficient is treated as zero.
///
/// Used throughout the solver and the arc-length routines to fall through
/// to a lower-degree case instead of dividing by something that should be
/// zero but isn't quite, due to rounding.
pub const EPSILON: f64 = 1e-10;

/// Decimal digits kept when quantising [`solve_cubic`] roots.
///
/// This is what makes the splitter tolerant of cusps and near-tangencies:
/// two roots that differ only in the 7th digit are the same root with
/// rounding noise on it, and get merged rather than treated as distinct
/// split points.
pub const EPSILON_DIGITS: i32 = 6;

/// Default flatness tolerance for [`curve::calc_cubic_arc_length`].
pub const DEFAULT_ARC_TOLERANCE: f64 = 0.005;

/// Default bounding-box area threshold for [`curve_curve_intersections`].
pub const DEFAULT_INTERSECTION_PRECISION: f64 = 1e-3;

/// A segment of a 2D path: a line, a quadratic Bézier, or a cubic Bézier.
///
/// The variant is the segment's degree (1, 2, or 3). This is the
/// in-memory shape the recursive algorithms (bounds, split, intersect)
/// pass around internally; the free functions in [`curve`], [`split`] and
/// [`intersect`] are the public surface and operate on bare points so
/// callers don't need to construct a `Segment` for a one-off call.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Segment {
    /// A straight line between two points.
    Line(Point, Point),
    /// A quadratic Bézier: start, control, end.
    Quadratic(Point, Point, Point),
    /// A cubic Bézier: start, control, control, end.
    Cubic(Point, Point, Point, Point),
}

impl Segment {
    /// Build a segment from a point slice, per the length-is-degree
    /// convention used throughout this crate's external interface.
    ///
    /// # Errors
    ///
    /// Returns [`GeometryError::InvalidDegree`] if `points.len()` is not
    /// 2, 3, or 4.
    pub fn from_points(points: &[Point]) -> Result<Self, GeometryError> {
        match points {
            [a, b] => Ok(Segment::Line(*a, *b)),
            [a, b, c] => Ok(Segment::Quadratic(*a, *b, *c)),
            [a, b, c, d] => Ok(Segment::Cubic(*a, *b, *c, *d)),
            _ => Err(GeometryError::InvalidDegree(points.len())),
        }
    }

    /// The degree of this segment: 1 for a line, 2 for a quadratic, 3 for
    /// a cubic.
    pub fn degree(&self) -> usize {
        match self {
            Segment::Line(..) => 1,
            Segment::Quadratic(..) => 2,
            Segment::Cubic(..) => 3,
        }
    }

    /// The control points of this segment, in order.
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Segment::Line(a, b) => vec![a, b],
            Segment::Quadratic(a, b, c) => vec![a, b, c],
            Segment::Cubic(a, b, c, d) => vec![a, b, c, d],
        }
    }
}

/// `a` and `b` agree to within a relative tolerance of `1e-9` (absolute
/// tolerance `0`), mirroring Python's `math.isclose` with its defaults.
/// [`crate::intersect::line_line_intersections`] uses this for its
/// degeneracy checks.
pub(crate) fn isclose(a: f64, b: f64) -> bool {
    const REL_TOL: f64 = 1e-9;
    (a - b).abs() <= REL_TOL * a.abs().max(b.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_from_points_dispatches_on_length() {
        let p = Point::new(0.0, 0.0);
        assert_eq!(Segment::from_points(&[p, p]).unwrap().degree(), 1);
        assert_eq!(Segment::from_points(&[p, p, p]).unwrap().degree(), 2);
        assert_eq!(Segment::from_points(&[p, p, p, p]).unwrap().degree(), 3);
        assert!(matches!(
            Segment::from_points(&[p]),
            Err(GeometryError::InvalidDegree(1))
        ));
        assert!(matches!(
            Segment::from_points(&[p, p, p, p, p]),
            Err(GeometryError::InvalidDegree(5))
        ));
    }

    #[test]
    fn isclose_matches_python_defaults() {
        assert!(isclose(1.0, 1.0 + 1e-12));
        assert!(!isclose(1.0, 1.1));
        assert!(isclose(0.0, 0.0));
    }
}
