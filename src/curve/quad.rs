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

//! Quadratic Bezier curve operations: power-basis conversion, point
//! evaluation, bounding box, and arc length.

use crate::point::{Point, Vector};

use super::Bounds;

/// Power-basis coefficients of a quadratic: `P(t) = a*t^2 + b*t + c`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub(crate) struct Power {
    pub a: Vector,
    pub b: Vector,
    pub c: Vector,
}

/// Convert control points to power-basis coefficients.
pub(crate) fn to_power(p0: Point, p1: Point, p2: Point) -> Power {
    let c = p0.into_vector();
    let b = (p1 - p0) * 2.0;
    let a = (p2 - p0) - b;
    Power { a, b, c }
}

/// Convert power-basis coefficients back to control points.
pub(crate) fn to_points(power: Power) -> (Point, Point, Point) {
    let p0 = power.c.into_point();
    let p1 = (power.c + power.b / 2.0).into_point();
    let p2 = (power.a + power.b + power.c).into_point();
    (p0, p1, p2)
}

fn eval_power(power: &Power, t: f64) -> Point {
    (power.a * (t * t) + power.b * t + power.c).into_point()
}

/// Evaluate a quadratic Bezier at parameter `t` using its Bernstein form,
/// which stays numerically well-behaved near the endpoints.
pub fn quadratic_point_at_t(p0: Point, p1: Point, p2: Point, t: f64) -> Point {
    let mt = 1.0 - t;
    Point::new(
        mt * mt * p0.x + 2.0 * mt * t * p1.x + t * t * p2.x,
        mt * mt * p0.y + 2.0 * mt * t * p1.y + t * t * p2.y,
    )
}

/// The axis-aligned bounding box of a quadratic Bezier.
///
/// Finds the roots of the derivative per axis, evaluates the curve's
/// power-basis polynomial at each root that falls in `[0, 1)`, and takes
/// the extent of those points together with both endpoints.
pub fn calc_quadratic_bounds(p0: Point, p1: Point, p2: Point) -> Bounds {
    let power = to_power(p0, p1, p2);

    let mut roots = Vec::with_capacity(2);
    if power.a.x != 0.0 {
        roots.push(-power.b.x / (2.0 * power.a.x));
    }
    if power.a.y != 0.0 {
        roots.push(-power.b.y / (2.0 * power.a.y));
    }

    let mut points: Vec<Point> = roots
        .into_iter()
        .filter(|t| (0.0..1.0).contains(t))
        .map(|t| eval_power(&power, t))
        .collect();
    points.push(p0);
    points.push(p2);
    Bounds::of_points(&points)
}

/// `x*sqrt(x^2 + 1)/2 + asinh(x)/2`, the antiderivative of `sec(atan(x))`
/// that the exact quadratic arc-length formula integrates.
fn int_sec_atan(x: f64) -> f64 {
    x * (x * x + 1.0).sqrt() / 2.0 + x.asinh() / 2.0
}

/// The exact arc length of a quadratic Bezier, in closed form.
///
/// Represents the curve's control polygon as displacement vectors and
/// rotates by 90 degrees to get the normal direction; falls through two
/// degenerate cases (a straight, evenly-spaced control polygon; a cusp
/// where the tangent direction reverses) before the general formula.
pub fn calc_quadratic_arc_length(p0: Point, p1: Point, p2: Point) -> f64 {
    let d0 = p1 - p0;
    let d1 = p2 - p1;
    let d = d1 - d0;
    let n = d.rotate90();
    let scale = n.length();

    if scale == 0.0 {
        return (p2 - p0).length();
    }

    let orig_dist = n.dot(d0);
    if orig_dist.abs() < crate::EPSILON {
        if d0.dot(d1) >= 0.0 {
            return (p2 - p0).length();
        }
        let (a, b) = (d0.length(), d1.length());
        return (a * a + b * b) / (a + b);
    }

    let x0 = d.dot(d0) / orig_dist;
    let x1 = d.dot(d1) / orig_dist;
    (2.0 * (int_sec_atan(x1) - int_sec_atan(x0)) * orig_dist / (scale * (x1 - x0))).abs()
}

/// A branch-free approximation of quadratic arc length using fixed-weight
/// 3-point Gauss-Legendre quadrature on the derivative's magnitude.
pub fn approximate_quadratic_arc_length(p0: Point, p1: Point, p2: Point) -> f64 {
    let v0 = (p0.into_vector() * -0.492943519233745
        + p1.into_vector() * 0.430331482911935
        + p2.into_vector() * 0.0626120363218102)
        .length();
    let v1 = (p2 - p0).length() * 0.4444444444444444;
    let v2 = (p0.into_vector() * -0.0626120363218102 - p1.into_vector() * 0.430331482911935
        + p2.into_vector() * 0.492943519233745)
        .length();
    v0 + v1 + v2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn basis_round_trip() {
        let (p0, p1, p2) = (p(10.0, 20.0), p(50.0, 90.0), p(100.0, 0.0));
        let power = to_power(p0, p1, p2);
        let (q0, q1, q2) = to_points(power);
        assert!(q0.approx_eq(p0, 1e-9));
        assert!(q1.approx_eq(p1, 1e-9));
        assert!(q2.approx_eq(p2, 1e-9));
    }

    #[test]
    fn eval_matches_bernstein_at_endpoints() {
        let (p0, p1, p2) = (p(0.0, 0.0), p(50.0, 100.0), p(100.0, 0.0));
        assert_eq!(quadratic_point_at_t(p0, p1, p2, 0.0), p0);
        assert_eq!(quadratic_point_at_t(p0, p1, p2, 1.0), p2);
    }

    #[test]
    fn bounds_of_a_symmetric_hump() {
        let bounds = calc_quadratic_bounds(p(0.0, 0.0), p(50.0, 100.0), p(100.0, 0.0));
        assert_eq!(bounds.as_tuple(), (0.0, 0.0, 100.0, 50.0));
    }

    #[test]
    fn arc_length_of_collinear_points_is_chord_length() {
        let len = calc_quadratic_arc_length(p(0.0, 0.0), p(50.0, 0.0), p(80.0, 0.0));
        assert_eq!(len, 80.0);
    }

    #[test]
    fn arc_length_of_a_curved_segment() {
        let len = calc_quadratic_arc_length(p(0.0, 0.0), p(0.0, 50.0), p(100.0, 0.0));
        assert!((len - 120.2158124).abs() < 1e-6);
    }

    #[test]
    fn arc_length_cusp_case() {
        // Control point placed so the tangent direction reverses partway
        // through (d0 . d1 < 0), exercising the cusp formula branch.
        let len = calc_quadratic_arc_length(p(0.0, 0.0), p(40.0, 0.0), p(-40.0, 0.0));
        assert!((len - 66.66666666666667).abs() < 1e-9);
    }

    #[test]
    fn approximate_agrees_with_exact_on_smooth_curves() {
        let (p0, p1, p2) = (p(0.0, 0.0), p(50.0, 100.0), p(100.0, 0.0));
        let exact = calc_quadratic_arc_length(p0, p1, p2);
        let approx = approximate_quadratic_arc_length(p0, p1, p2);
        assert!((exact - approx).abs() / exact < 0.01);
    }
}
