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

//! Splitting a segment at a list of parameter values, and at an
//! axis-aligned coordinate.

use crate::curve::cubic::{self, Power as CubicPower};
use crate::curve::quad::{self, Power as QuadPower};
use crate::point::{Point, Vector};
use crate::solve::{solve_cubic, solve_quadratic};

/// Which coordinate [`split_line`]/[`split_quadratic`]/[`split_cubic`]
/// measure `where_` against.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Axis {
    /// `where_` is an X coordinate; the splitting ray runs vertically.
    Vertical,
    /// `where_` is a Y coordinate; the splitting ray runs horizontally.
    Horizontal,
}

fn ts_with_bounds(ts: &[f64]) -> Vec<f64> {
    let mut all = Vec::with_capacity(ts.len() + 2);
    all.push(0.0);
    all.extend_from_slice(ts);
    all.push(1.0);
    all
}

/// Split a line at one or more values of `t`.
///
/// Not exposed publicly: there's no published `splitLineAtT` operation
/// for a degree this trivial, but the curve/curve recursion needs a line
/// to bisect the same way it bisects a quadratic or cubic.
pub(crate) fn split_line_at_t(p0: Point, p1: Point, ts: &[f64]) -> Vec<(Point, Point)> {
    ts_with_bounds(ts)
        .windows(2)
        .map(|w| (p0.lerp(p1, w[0]), p0.lerp(p1, w[1])))
        .collect()
}

/// Split a quadratic Bezier at one or more values of `t`.
///
/// Reparameterises the power-basis coefficients for each sub-interval
/// rather than lerping control points, so a split at a cusp or
/// near-tangent `t` still produces a geometrically faithful sub-curve.
pub fn split_quadratic_at_t(
    p0: Point,
    p1: Point,
    p2: Point,
    ts: &[f64],
) -> Vec<(Point, Point, Point)> {
    let power = quad::to_power(p0, p1, p2);
    ts_with_bounds(ts)
        .windows(2)
        .map(|w| {
            let (t1, delta) = (w[0], w[1] - w[0]);
            let sub = QuadPower {
                a: power.a * (delta * delta),
                b: (power.a * (2.0 * t1) + power.b) * delta,
                c: power.a * (t1 * t1) + power.b * t1 + power.c,
            };
            quad::to_points(sub)
        })
        .collect()
}

/// Split a cubic Bezier at one or more values of `t`.
pub fn split_cubic_at_t(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    ts: &[f64],
) -> Vec<(Point, Point, Point, Point)> {
    let power = cubic::to_power(p0, p1, p2, p3);
    ts_with_bounds(ts)
        .windows(2)
        .map(|w| {
            let (t1, delta) = (w[0], w[1] - w[0]);
            let t1_2 = t1 * t1;
            let sub = CubicPower {
                a: power.a * (delta * delta * delta),
                b: (power.a * (3.0 * t1) + power.b) * (delta * delta),
                c: (power.b * (2.0 * t1) + power.c + power.a * (3.0 * t1_2)) * delta,
                d: power.a * (t1_2 * t1) + power.b * t1_2 + power.c * t1 + power.d,
            };
            cubic::to_points(sub)
        })
        .collect()
}

fn axis_components_2(a: Vector, b: Vector, c: Vector, axis: Axis) -> (f64, f64, f64) {
    match axis {
        Axis::Vertical => (a.x, b.x, c.x),
        Axis::Horizontal => (a.y, b.y, c.y),
    }
}

fn axis_components_3(a: Vector, b: Vector, c: Vector, d: Vector, axis: Axis) -> (f64, f64, f64, f64) {
    match axis {
        Axis::Vertical => (a.x, b.x, c.x, d.x),
        Axis::Horizontal => (a.y, b.y, c.y, d.y),
    }
}

/// Split a line where it crosses the axis-aligned ray at `where_`.
///
/// Returns the segment unchanged, as a single-element list, if the line
/// is parallel to the ray.
pub fn split_line(p0: Point, p1: Point, where_: f64, axis: Axis) -> Vec<(Point, Point)> {
    let (a, b) = match axis {
        Axis::Horizontal => (p1.y - p0.y, p0.y),
        Axis::Vertical => (p1.x - p0.x, p0.x),
    };
    if a == 0.0 {
        return vec![(p0, p1)];
    }
    let t = (where_ - b) / a;
    if (0.0..1.0).contains(&t) {
        let mid = p0.lerp(p1, t);
        vec![(p0, mid), (mid, p1)]
    } else {
        vec![(p0, p1)]
    }
}

/// Split a quadratic Bezier where it crosses the axis-aligned ray at
/// `where_`. Returns the segment unchanged if no crossing falls
/// in `[0, 1)`.
pub fn split_quadratic(
    p0: Point,
    p1: Point,
    p2: Point,
    where_: f64,
    axis: Axis,
) -> Vec<(Point, Point, Point)> {
    let power = quad::to_power(p0, p1, p2);
    let (a, b, c) = axis_components_2(power.a, power.b, power.c, axis);
    let mut ts: Vec<f64> = solve_quadratic(a, b, c - where_)
        .into_iter()
        .filter(|t| (0.0..1.0).contains(t))
        .collect();
    if ts.is_empty() {
        return vec![(p0, p1, p2)];
    }
    ts.sort_by(|x, y| x.partial_cmp(y).unwrap());
    split_quadratic_at_t(p0, p1, p2, &ts)
}

/// Split a cubic Bezier where it crosses the axis-aligned ray at
/// `where_`. Returns the segment unchanged if no crossing falls
/// in `[0, 1)`.
pub fn split_cubic(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
    where_: f64,
    axis: Axis,
) -> Vec<(Point, Point, Point, Point)> {
    let power = cubic::to_power(p0, p1, p2, p3);
    let (a, b, c, d) = axis_components_3(power.a, power.b, power.c, power.d, axis);
    let mut ts: Vec<f64> = solve_cubic(a, b, c, d - where_)
        .into_iter()
        .filter(|t| (0.0..1.0).contains(t))
        .collect();
    if ts.is_empty() {
        return vec![(p0, p1, p2, p3)];
    }
    ts.sort_by(|x, y| x.partial_cmp(y).unwrap());
    split_cubic_at_t(p0, p1, p2, p3, &ts)
}

/// Split a curve given as a point slice (length 2, 3, or 4) in half at
/// `t = 0.5`, returning each half as its own point vector. Used by the
/// curve/curve intersection recursion, which needs to bisect whichever
/// degree of segment it was handed without committing to a type.
pub(crate) fn split_segment_in_half(points: &[Point]) -> (Vec<Point>, Vec<Point>) {
    match points {
        [p0, p1] => {
            let parts = split_line_at_t(*p0, *p1, &[0.5]);
            (vec![parts[0].0, parts[0].1], vec![parts[1].0, parts[1].1])
        }
        [p0, p1, p2] => {
            let parts = split_quadratic_at_t(*p0, *p1, *p2, &[0.5]);
            (
                vec![parts[0].0, parts[0].1, parts[0].2],
                vec![parts[1].0, parts[1].1, parts[1].2],
            )
        }
        [p0, p1, p2, p3] => {
            let parts = split_cubic_at_t(*p0, *p1, *p2, *p3, &[0.5]);
            (
                vec![parts[0].0, parts[0].1, parts[0].2, parts[0].3],
                vec![parts[1].0, parts[1].1, parts[1].2, parts[1].3],
            )
        }
        _ => unreachable!("split_segment_in_half called with invalid point count"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn split_quadratic_at_t_chains_endpoints() {
        let (p0, p1, p2) = (p(0.0, 0.0), p(50.0, 100.0), p(100.0, 0.0));
        let parts = split_quadratic_at_t(p0, p1, p2, &[0.5]);
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0].0, p0);
        assert_eq!(parts[0].2, parts[1].0);
        assert_eq!(parts[1].2, p2);
    }

    #[test]
    fn split_cubic_at_t_matches_published_values() {
        let (p0, p1, p2, p3) = (p(0.0, 0.0), p(25.0, 100.0), p(75.0, 100.0), p(100.0, 0.0));
        let parts = split_cubic_at_t(p0, p1, p2, p3, &[0.5]);
        assert_eq!(parts.len(), 2);
        let left = parts[0];
        assert!((left.1.x - 12.5).abs() < 1e-9 && (left.1.y - 50.0).abs() < 1e-9);
        assert!((left.2.x - 31.25).abs() < 1e-9 && (left.2.y - 75.0).abs() < 1e-9);
        assert!((left.3.x - 50.0).abs() < 1e-9 && (left.3.y - 75.0).abs() < 1e-9);
    }

    #[test]
    fn split_line_unchanged_when_ray_is_parallel() {
        let (p0, p1) = (p(0.0, 0.0), p(100.0, 0.0));
        let parts = split_line(p0, p1, 50.0, Axis::Horizontal);
        assert_eq!(parts, vec![(p0, p1)]);
    }

    #[test]
    fn split_line_at_a_crossing() {
        let (p0, p1) = (p(0.0, 0.0), p(100.0, 100.0));
        let parts = split_line(p0, p1, 50.0, Axis::Horizontal);
        assert_eq!(parts, vec![(p0, p(50.0, 50.0)), (p(50.0, 50.0), p1)]);
    }

    #[test]
    fn split_quadratic_unchanged_when_no_crossing_in_range() {
        let (p0, p1, p2) = (p(0.0, 0.0), p(50.0, 100.0), p(100.0, 0.0));
        let parts = split_quadratic(p0, p1, p2, 150.0, Axis::Horizontal);
        assert_eq!(parts, vec![(p0, p1, p2)]);
    }
}
