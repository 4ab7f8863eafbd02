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

//! Cubic Bezier curve operations: power-basis conversion, point
//! evaluation, bounding box, and arc length.

use crate::point::{Point, Vector};
use crate::solve::solve_quadratic;

use super::Bounds;

/// Power-basis coefficients of a cubic: `P(t) = a*t^3 + b*t^2 + c*t + d`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Power {
    pub a: Vector,
    pub b: Vector,
    pub c: Vector,
    pub d: Vector,
}

/// Convert control points to power-basis coefficients.
pub(crate) fn to_power(p0: Point, p1: Point, p2: Point, p3: Point) -> Power {
    let d = p0.into_vector();
    let c = (p1 - p0) * 3.0;
    let b = (p2 - p1) * 3.0 - c;
    let a = (p3 - p0) - c - b;
    Power { a, b, c, d }
}

/// Convert power-basis coefficients back to control points.
pub(crate) fn to_points(power: Power) -> (Point, Point, Point, Point) {
    let p0 = power.d.into_point();
    let p1 = (power.d + power.c / 3.0).into_point();
    let p2 = (p1.into_vector() + (power.b + power.c) / 3.0).into_point();
    let p3 = (power.a + power.b + power.c + power.d).into_point();
    (p0, p1, p2, p3)
}

fn eval_power(power: &Power, t: f64) -> Point {
    (power.a * (t * t * t) + power.b * (t * t) + power.c * t + power.d).into_point()
}

/// Evaluate a cubic Bezier at parameter `t` using its Bernstein form,
/// which stays numerically well-behaved near the endpoints.
pub fn cubic_point_at_t(p0: Point, p1: Point, p2: Point, p3: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    let mt2 = mt * mt;
    let t2 = t * t;
    Point::new(
        mt2 * mt * p0.x + 3.0 * mt2 * t * p1.x + 3.0 * mt * t2 * p2.x + t2 * t * p3.x,
        mt2 * mt * p0.y + 3.0 * mt2 * t * p1.y + 3.0 * mt * t2 * p2.y + t2 * t * p3.y,
    )
}

/// The axis-aligned bounding box of a cubic Bezier.
///
/// Collects the real roots of the derivative (a quadratic) per axis,
/// evaluates the power-basis cubic at every root in `[0, 1)` (from
/// either axis, not just the one it came from), and takes the extent of
/// those points together with both endpoints.
pub fn calc_cubic_bounds(p0: Point, p1: Point, p2: Point, p3: Point) -> Bounds {
    let power = to_power(p0, p1, p2, p3);

    let x_roots = solve_quadratic(3.0 * power.a.x, 2.0 * power.b.x, power.c.x);
    let y_roots = solve_quadratic(3.0 * power.a.y, 2.0 * power.b.y, power.c.y);

    let mut points: Vec<Point> = x_roots
        .into_iter()
        .chain(y_roots)
        .filter(|t| (0.0..1.0).contains(t))
        .map(|t| eval_power(&power, t))
        .collect();
    points.push(p0);
    points.push(p3);
    Bounds::of_points(&points)
}

/// Empirical slack added to the flatness multiplier in
/// [`calc_cubic_arc_length`]'s recursion. Not derived from anything; it's
/// tuned so the recursion bottoms out a little earlier than a strict
/// chord/control-polygon comparison would allow.
const ARC_LENGTH_MULT_SLACK: f64 = 1.5;

/// The arc length of a cubic Bezier, via adaptive recursive subdivision.
/// Splits the curve in half until the control polygon is within
/// `tolerance` of the chord, then approximates each flat-enough piece as
/// the average of the chord and control-polygon lengths.
pub fn calc_cubic_arc_length(p0: Point, p1: Point, p2: Point, p3: Point, tolerance: f64) -> f64 {
    let mult = 1.0 + ARC_LENGTH_MULT_SLACK * tolerance;
    recurse_arc_length(mult, p0, p1, p2, p3)
}

fn recurse_arc_length(mult: f64, p0: Point, p1: Point, p2: Point, p3: Point) -> f64 {
    let arch = (p3 - p0).length();
    let control_polygon = (p1 - p0).length() + (p2 - p1).length() + (p3 - p2).length();
    if arch * mult >= control_polygon {
        (arch + control_polygon) * 0.5
    } else {
        let (left, right) = split_cubic_in_half(p0, p1, p2, p3);
        recurse_arc_length(mult, left.0, left.1, left.2, left.3)
            + recurse_arc_length(mult, right.0, right.1, right.2, right.3)
    }
}

/// Closed-form split of a cubic at `t = 0.5`, used by the arc-length
/// recursion in place of the general [`crate::split::split_cubic_at_t`]
/// since the midpoint is all this recursion ever needs.
pub(crate) fn split_cubic_in_half(
    p0: Point,
    p1: Point,
    p2: Point,
    p3: Point,
) -> ((Point, Point, Point, Point), (Point, Point, Point, Point)) {
    let mid = ((p0.into_vector() + (p1.into_vector() + p2.into_vector()) * 3.0)
        + p3.into_vector())
        / 8.0;
    let deriv3 = (p3.into_vector() + p2.into_vector() - p1.into_vector() - p0.into_vector()) / 8.0;
    let mid = mid.into_point();

    (
        (p0, p0.midpoint(p1), mid - deriv3, mid),
        (mid, mid + deriv3, p2.midpoint(p3), p3),
    )
}

/// A branch-free approximation of cubic arc length using fixed-weight
/// 5-point Gauss-Lobatto quadrature on the derivative's magnitude.
/// The literal coefficients reproduce published test vectors bit-for-bit
/// and must not be simplified or re-derived.
pub fn approximate_cubic_arc_length(p0: Point, p1: Point, p2: Point, p3: Point) -> f64 {
    let v0 = (p1 - p0).length() * 0.15;
    let v1 = (p0.into_vector() * -0.558983582205757
        + p1.into_vector() * 0.325650248872424
        + p2.into_vector() * 0.208983582205757
        + p3.into_vector() * 0.024349751127576)
        .length();
    let v2 = (p3.into_vector() - p0.into_vector() + p2.into_vector() - p1.into_vector()).length()
        * 0.26666666666666666;
    let v3 = (p0.into_vector() * -0.024349751127576
        - p1.into_vector() * 0.208983582205757
        - p2.into_vector() * 0.325650248872424
        + p3.into_vector() * 0.558983582205757)
        .length();
    let v4 = (p3 - p2).length() * 0.15;
    v0 + v1 + v2 + v3 + v4
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn basis_round_trip() {
        let (p0, p1, p2, p3) = (p(0.0, 0.0), p(25.0, 100.0), p(75.0, 100.0), p(100.0, 0.0));
        let power = to_power(p0, p1, p2, p3);
        let (q0, q1, q2, q3) = to_points(power);
        assert!(q0.approx_eq(p0, 1e-9));
        assert!(q1.approx_eq(p1, 1e-9));
        assert!(q2.approx_eq(p2, 1e-9));
        assert!(q3.approx_eq(p3, 1e-9));
    }

    #[test]
    fn eval_matches_bernstein_at_endpoints() {
        let (p0, p1, p2, p3) = (p(0.0, 0.0), p(25.0, 100.0), p(75.0, 100.0), p(100.0, 0.0));
        assert_eq!(cubic_point_at_t(p0, p1, p2, p3, 0.0), p0);
        assert_eq!(cubic_point_at_t(p0, p1, p2, p3, 1.0), p3);
    }

    #[test]
    fn bounds_of_a_symmetric_hump() {
        let bounds = calc_cubic_bounds(p(0.0, 0.0), p(25.0, 100.0), p(75.0, 100.0), p(100.0, 0.0));
        assert_eq!(bounds.as_tuple(), (0.0, 0.0, 100.0, 75.0));
    }

    #[test]
    fn arc_length_of_a_straight_line_converges_to_chord() {
        let len = calc_cubic_arc_length(
            p(0.0, 0.0),
            p(50.0, 0.0),
            p(100.0, 0.0),
            p(150.0, 0.0),
            1e-6,
        );
        assert!((len - 150.0).abs() < 1e-6);
    }

    #[test]
    fn arc_length_tolerance_tightens_the_estimate() {
        let (p0, p1, p2, p3) = (p(0.0, 0.0), p(25.0, 100.0), p(75.0, 100.0), p(100.0, 0.0));
        let loose = calc_cubic_arc_length(p0, p1, p2, p3, 0.1);
        let tight = calc_cubic_arc_length(p0, p1, p2, p3, 1e-6);
        // A tighter tolerance always gives an estimate at least as close
        // to the control-polygon/chord lower-upper bracket.
        assert!(tight <= loose + 1e-6);
    }

    #[test]
    fn approximate_agrees_with_exact_on_smooth_curves() {
        let (p0, p1, p2, p3) = (p(0.0, 0.0), p(25.0, 100.0), p(75.0, 100.0), p(100.0, 0.0));
        let exact = calc_cubic_arc_length(p0, p1, p2, p3, 0.005);
        let approx = approximate_cubic_arc_length(p0, p1, p2, p3);
        assert!((exact - approx).abs() / exact < 0.01);
    }

    #[test]
    fn approximate_line_is_nearly_exact() {
        let len = approximate_cubic_arc_length(
            p(0.0, 0.0),
            p(50.0, 0.0),
            p(100.0, 0.0),
            p(150.0, 0.0),
        );
        assert!((len - 150.0).abs() < 1e-6);
    }
}
