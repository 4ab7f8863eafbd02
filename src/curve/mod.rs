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

//! Bounding boxes and point evaluation for lines, quadratics, and cubics,
//! plus the curve-specific numerics (power-basis conversion, arc length)
//! that [`crate::split`] and [`crate::intersect`] build on.

use crate::error::GeometryError;
use crate::point::Point;
use crate::Segment;

pub(crate) mod cubic;
pub(crate) mod quad;

pub use cubic::{
    approximate_cubic_arc_length, calc_cubic_arc_length, calc_cubic_bounds, cubic_point_at_t,
};
pub use quad::{
    approximate_quadratic_arc_length, calc_quadratic_arc_length, calc_quadratic_bounds,
    quadratic_point_at_t,
};

/// The axis-aligned extent of a segment.
///
/// A `Bounds` returned by [`calc_quadratic_bounds`] or [`calc_cubic_bounds`]
/// contains every point of the segment for `t` in `[0, 1]`, up to
/// floating-point error at the extrema.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bounds {
    pub x_min: f64,
    pub y_min: f64,
    pub x_max: f64,
    pub y_max: f64,
}

impl Bounds {
    pub(crate) fn of_points(points: &[Point]) -> Self {
        let mut x_min = f64::INFINITY;
        let mut y_min = f64::INFINITY;
        let mut x_max = f64::NEG_INFINITY;
        let mut y_max = f64::NEG_INFINITY;
        for p in points {
            x_min = x_min.min(p.x);
            y_min = y_min.min(p.y);
            x_max = x_max.max(p.x);
            y_max = y_max.max(p.y);
        }
        Bounds {
            x_min,
            y_min,
            x_max,
            y_max,
        }
    }

    /// The area of this bounding box. Used by [`crate::intersect`] as the
    /// curve/curve subdivision's flatness threshold.
    pub fn area(&self) -> f64 {
        (self.x_max - self.x_min) * (self.y_max - self.y_min)
    }

    /// Whether this bounding box overlaps or touches `other`.
    pub fn intersects(&self, other: &Bounds) -> bool {
        !(self.x_min > other.x_max
            || other.x_min > self.x_max
            || self.y_min > other.y_max
            || other.y_min > self.y_max)
    }

    /// This bounds as an `(xMin, yMin, xMax, yMax)` tuple.
    pub fn as_tuple(&self) -> (f64, f64, f64, f64) {
        (self.x_min, self.y_min, self.x_max, self.y_max)
    }
}

/// Evaluate a line at parameter `t`.
pub fn line_point_at_t(p0: Point, p1: Point, t: f64) -> Point {
    p0.lerp(p1, t)
}

/// Evaluate a segment given as a point slice (length 2, 3, or 4) at `t`
///, dispatching on its length the way every slice-based operation
/// in this crate determines degree.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidDegree`] if `points.len()` is not 2,
/// 3, or 4.
pub fn segment_point_at_t(points: &[Point], t: f64) -> Result<Point, GeometryError> {
    Ok(match Segment::from_points(points)? {
        Segment::Line(p0, p1) => line_point_at_t(p0, p1, t),
        Segment::Quadratic(p0, p1, p2) => quadratic_point_at_t(p0, p1, p2, t),
        Segment::Cubic(p0, p1, p2, p3) => cubic_point_at_t(p0, p1, p2, p3, t),
    })
}

/// The bounding box of a quadratic or cubic curve given as a point slice,
/// dispatched by length. Used internally by the curve/curve intersection
/// recursion, which works in bare point slices rather than `Segment`.
///
/// Panics if `points` isn't length 3 or 4; callers within this crate only
/// ever reach this after already validating the segment's degree.
pub(crate) fn curve_bounds(points: &[Point]) -> Bounds {
    match points {
        [p0, p1, p2] => calc_quadratic_bounds(*p0, *p1, *p2),
        [p0, p1, p2, p3] => calc_cubic_bounds(*p0, *p1, *p2, *p3),
        _ => unreachable!("curve_bounds called with a non-curve point count"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn segment_point_at_t_dispatches_by_length() {
        let line = [p(0.0, 0.0), p(10.0, 0.0)];
        assert_eq!(segment_point_at_t(&line, 0.5).unwrap(), p(5.0, 0.0));

        let quad = [p(0.0, 0.0), p(50.0, 100.0), p(100.0, 0.0)];
        assert_eq!(
            segment_point_at_t(&quad, 0.5).unwrap(),
            quadratic_point_at_t(quad[0], quad[1], quad[2], 0.5)
        );
    }

    #[test]
    fn segment_point_at_t_rejects_bad_degree() {
        let bad = [p(0.0, 0.0)];
        assert!(matches!(
            segment_point_at_t(&bad, 0.5),
            Err(GeometryError::InvalidDegree(1))
        ));
    }

    #[test]
    fn bounds_intersects_is_symmetric_and_inclusive_of_touching() {
        let a = Bounds::of_points(&[p(0.0, 0.0), p(10.0, 10.0)]);
        let b = Bounds::of_points(&[p(10.0, 10.0), p(20.0, 20.0)]);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }
}
