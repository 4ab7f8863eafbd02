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

//! Intersections between lines, quadratics, and cubics in any degree
//! combination.

use crate::curve::{cubic_point_at_t, curve_bounds, quadratic_point_at_t};
use crate::error::GeometryError;
use crate::isclose;
use crate::point::Point;
use crate::solve::{solve_cubic, solve_quadratic};
use crate::split::split_segment_in_half;
use crate::{Segment, DEFAULT_INTERSECTION_PRECISION};

/// A point where two segments cross, with the parameter at which each
/// segment reaches it.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Intersection {
    pub pt: Point,
    pub t1: f64,
    pub t2: f64,
}

/// The parameter at which a line reaches `pt`, using whichever axis has
/// more spread between `s` and `e` (both give the same answer on an
/// exact line; this just avoids dividing by a near-zero span).
fn line_t_of_pt(s: Point, e: Point, pt: Point) -> f64 {
    if !isclose(s.x, e.x) {
        (pt.x - s.x) / (e.x - s.x)
    } else if !isclose(s.y, e.y) {
        (pt.y - s.y) / (e.y - s.y)
    } else {
        -1.0
    }
}

fn same_side_of_origin(a: Point, b: Point, origin: Point) -> bool {
    let x_diff = (a.x - origin.x) * (b.x - origin.x);
    let y_diff = (a.y - origin.y) * (b.y - origin.y);
    !(x_diff <= 0.0 && y_diff <= 0.0)
}

/// Intersections between two line segments.
///
/// A closed-form solve with an early return for every way two lines can
/// fail to cross exactly once: either one degenerate to a point, both
/// vertical, or truly parallel. Two near-parallel lines whose crossing
/// point falls outside both segments are filtered out by the
/// same-side-of-origin check.
pub fn line_line_intersections(s1: Point, e1: Point, s2: Point, e2: Point) -> Vec<Intersection> {
    let (ax, ay) = (s1.x, s1.y);
    let (bx, by) = (e1.x, e1.y);
    let (cx, cy) = (s2.x, s2.y);
    let (dx, dy) = (e2.x, e2.y);

    if isclose(cx, dx) && isclose(ax, bx) {
        return Vec::new();
    }
    if isclose(cy, dy) && isclose(ay, by) {
        return Vec::new();
    }
    if isclose(cx, dx) && isclose(cy, dy) {
        return Vec::new();
    }
    if isclose(ax, bx) && isclose(ay, by) {
        return Vec::new();
    }

    if isclose(bx, ax) {
        let x = ax;
        let slope34 = (dy - cy) / (dx - cx);
        let y = slope34 * (x - cx) + cy;
        let pt = Point::new(x, y);
        return vec![Intersection {
            pt,
            t1: line_t_of_pt(s1, e1, pt),
            t2: line_t_of_pt(s2, e2, pt),
        }];
    }
    if isclose(cx, dx) {
        let x = cx;
        let slope12 = (by - ay) / (bx - ax);
        let y = slope12 * (x - ax) + ay;
        let pt = Point::new(x, y);
        return vec![Intersection {
            pt,
            t1: line_t_of_pt(s1, e1, pt),
            t2: line_t_of_pt(s2, e2, pt),
        }];
    }

    let slope12 = (by - ay) / (bx - ax);
    let slope34 = (dy - cy) / (dx - cx);
    if isclose(slope12, slope34) {
        return Vec::new();
    }
    let x = (slope12 * ax - ay - slope34 * cx + cy) / (slope12 - slope34);
    let y = slope12 * (x - ax) + ay;
    let pt = Point::new(x, y);

    if same_side_of_origin(pt, e1, s1) && same_side_of_origin(pt, s2, e2) {
        vec![Intersection {
            pt,
            t1: line_t_of_pt(s1, e1, pt),
            t2: line_t_of_pt(s2, e2, pt),
        }]
    } else {
        Vec::new()
    }
}

/// Rotate and translate `curve` into the frame where `line` runs from
/// the origin along the positive X axis, so the curve/line crossings
/// become curve/X-axis crossings.
fn align_to_line(curve: &[Point], line_start: Point, line_end: Point) -> Vec<Point> {
    let end = line_end - line_start;
    let angle = end.y.atan2(end.x);
    let (sin_a, cos_a) = angle.sin_cos();
    curve
        .iter()
        .map(|p| {
            let d = *p - line_start;
            Point::new(d.x * cos_a + d.y * sin_a, -d.x * sin_a + d.y * cos_a)
        })
        .collect()
}

fn curve_line_intersections_t(curve: &[Point], line_start: Point, line_end: Point) -> Vec<f64> {
    let aligned = align_to_line(curve, line_start, line_end);
    let mut ts = match aligned.as_slice() {
        [p0, p1, p2] => {
            let power = crate::curve::quad::to_power(*p0, *p1, *p2);
            let mut ts = solve_quadratic(power.a.x, power.b.x, power.c.x);
            ts.extend(solve_quadratic(power.a.y, power.b.y, power.c.y));
            ts
        }
        [p0, p1, p2, p3] => {
            let power = crate::curve::cubic::to_power(*p0, *p1, *p2, *p3);
            let mut ts = solve_cubic(power.a.x, power.b.x, power.c.x, power.d.x);
            ts.extend(solve_cubic(power.a.y, power.b.y, power.c.y, power.d.y));
            ts
        }
        _ => Vec::new(),
    };
    ts.retain(|t| (0.0..=1.0).contains(t));
    ts.sort_by(|a, b| a.partial_cmp(b).unwrap());
    ts
}

/// Intersections between a quadratic or cubic curve and a line.
///
/// Solves in the line's own frame (aligned so the line runs along the X
/// axis from the origin) by finding roots of both the X and Y
/// power-basis polynomials and concatenating them, then maps each
/// surviving root back through the curve's own point evaluator so the
/// returned point matches what [`crate::curve::quadratic_point_at_t`]/
/// [`crate::curve::cubic_point_at_t`] would report at that `t`.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidDegree`] if `curve.len()` is not 3 or 4.
pub fn curve_line_intersections(
    curve: &[Point],
    line_start: Point,
    line_end: Point,
) -> Result<Vec<Intersection>, GeometryError> {
    if curve.len() != 3 && curve.len() != 4 {
        return Err(GeometryError::InvalidDegree(curve.len()));
    }
    let ts = curve_line_intersections_t(curve, line_start, line_end);
    Ok(ts
        .into_iter()
        .map(|t| {
            let pt = match curve {
                [p0, p1, p2] => quadratic_point_at_t(*p0, *p1, *p2, t),
                [p0, p1, p2, p3] => cubic_point_at_t(*p0, *p1, *p2, *p3, t),
                _ => unreachable!(),
            };
            Intersection {
                pt,
                t1: t,
                t2: line_t_of_pt(line_start, line_end, pt),
            }
        })
        .collect())
}

fn unique_key(t: f64, precision: f64) -> i64 {
    (t / precision).floor() as i64
}

fn curve_curve_intersections_t(
    curve1: &[Point],
    curve2: &[Point],
    precision: f64,
    range1: (f64, f64),
    range2: (f64, f64),
) -> Vec<(f64, f64)> {
    let bounds1 = curve_bounds(curve1);
    let bounds2 = curve_bounds(curve2);

    if !bounds1.intersects(&bounds2) {
        return Vec::new();
    }

    let mid = |r: (f64, f64)| 0.5 * (r.0 + r.1);

    if bounds1.area() < precision && bounds2.area() < precision {
        tracing::debug!(t1 = mid(range1), t2 = mid(range2), "bottomed out");
        return vec![(mid(range1), mid(range2))];
    }

    tracing::trace!(?range1, ?range2, "splitting curve/curve pair");

    let (c11, c12) = split_segment_in_half(curve1);
    let c11_range = (range1.0, mid(range1));
    let c12_range = (mid(range1), range1.1);

    let (c21, c22) = split_segment_in_half(curve2);
    let c21_range = (range2.0, mid(range2));
    let c22_range = (mid(range2), range2.1);

    let mut found = Vec::new();
    found.extend(curve_curve_intersections_t(
        &c11, &c21, precision, c11_range, c21_range,
    ));
    found.extend(curve_curve_intersections_t(
        &c12, &c21, precision, c12_range, c21_range,
    ));
    found.extend(curve_curve_intersections_t(
        &c11, &c22, precision, c11_range, c22_range,
    ));
    found.extend(curve_curve_intersections_t(
        &c12, &c22, precision, c12_range, c22_range,
    ));

    let mut seen = std::collections::HashSet::new();
    found
        .into_iter()
        .filter(|ts| seen.insert(unique_key(ts.0, precision)))
        .collect()
}

/// Intersections between two curves (each a quadratic or cubic), via
/// recursive bounding-box subdivision.
///
/// Bisects both curves together at every level, discarding any of the
/// four resulting quadrant pairs whose bounding boxes don't overlap,
/// until a surviving pair's boxes are both smaller than `precision`
/// (at which point the midpoint of each curve's remaining parameter
/// range is reported as the crossing). Candidate crossings are
/// deduplicated by bucketing `t1` into `precision`-wide bins and keeping
/// the first one seen per bucket.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidDegree`] if either curve isn't length
/// 3 or 4.
pub fn curve_curve_intersections(
    curve1: &[Point],
    curve2: &[Point],
    precision: f64,
) -> Result<Vec<Intersection>, GeometryError> {
    for curve in [curve1, curve2] {
        if curve.len() != 3 && curve.len() != 4 {
            return Err(GeometryError::InvalidDegree(curve.len()));
        }
    }
    let ts = curve_curve_intersections_t(curve1, curve2, precision, (0.0, 1.0), (0.0, 1.0));
    Ok(ts
        .into_iter()
        .map(|(t1, t2)| {
            let pt = match curve1 {
                [p0, p1, p2] => quadratic_point_at_t(*p0, *p1, *p2, t1),
                [p0, p1, p2, p3] => cubic_point_at_t(*p0, *p1, *p2, *p3, t1),
                _ => unreachable!("curve1 degree already validated"),
            };
            Intersection { pt, t1, t2 }
        })
        .collect())
}

/// Intersections between two segments of any degree combination.
///
/// Dispatches by arranging the pair by degree (lowest first) and routing
/// to [`line_line_intersections`], [`curve_line_intersections`], or
/// [`curve_curve_intersections`], using [`DEFAULT_INTERSECTION_PRECISION`]
/// for the curve/curve case.
///
/// # Errors
///
/// Returns [`GeometryError::InvalidDegree`] if either slice isn't length
/// 2, 3, or 4.
pub fn segment_segment_intersections(
    seg1: &[Point],
    seg2: &[Point],
) -> Result<Vec<Intersection>, GeometryError> {
    for seg in [seg1, seg2] {
        if seg.len() != 2 && seg.len() != 3 && seg.len() != 4 {
            return Err(GeometryError::InvalidDegree(seg.len()));
        }
    }
    let (lo, hi) = if seg2.len() > seg1.len() {
        (seg1, seg2)
    } else {
        (seg2, seg1)
    };
    match (Segment::from_points(hi)?, lo.len()) {
        (Segment::Line(s1, e1), 2) => {
            let Segment::Line(s2, e2) = Segment::from_points(lo)? else {
                unreachable!()
            };
            Ok(line_line_intersections(s1, e1, s2, e2))
        }
        (_, 2) => {
            let Segment::Line(s, e) = Segment::from_points(lo)? else {
                unreachable!()
            };
            curve_line_intersections(hi, s, e)
        }
        _ => curve_curve_intersections(hi, lo, DEFAULT_INTERSECTION_PRECISION),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn line_line_crossing() {
        let hits = line_line_intersections(
            p(310.0, 389.0),
            p(453.0, 222.0),
            p(289.0, 251.0),
            p(447.0, 367.0),
        );
        assert_eq!(hits.len(), 1);
        assert!((hits[0].pt.x - 374.44882952482897).abs() < 1e-6);
        assert!((hits[0].pt.y - 313.73458370177315).abs() < 1e-6);
        assert!((hits[0].t1 - 0.45069111555824454).abs() < 1e-6);
        assert!((hits[0].t2 - 0.5408153767394238).abs() < 1e-6);
    }

    #[test]
    fn line_line_parallel_lines_do_not_cross() {
        let hits = line_line_intersections(p(0.0, 0.0), p(10.0, 0.0), p(0.0, 5.0), p(10.0, 5.0));
        assert!(hits.is_empty());
    }

    #[test]
    fn curve_line_finds_three_crossings() {
        let curve = [p(100.0, 240.0), p(30.0, 60.0), p(210.0, 230.0), p(160.0, 30.0)];
        let hits = curve_line_intersections(&curve, p(25.0, 260.0), p(230.0, 20.0)).unwrap();
        assert_eq!(hits.len(), 3);
        assert!((hits[0].pt.x - 84.90010344084885).abs() < 1e-4);
    }

    #[test]
    fn curve_curve_finds_three_crossings() {
        let curve1 = [p(10.0, 100.0), p(90.0, 30.0), p(40.0, 140.0), p(220.0, 220.0)];
        let curve2 = [p(5.0, 150.0), p(180.0, 20.0), p(80.0, 250.0), p(210.0, 190.0)];
        let hits = curve_curve_intersections(&curve1, &curve2, 1e-3).unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn segment_segment_dispatches_curve_and_line() {
        let curve = [p(100.0, 240.0), p(30.0, 60.0), p(210.0, 230.0), p(160.0, 30.0)];
        let line = [p(25.0, 260.0), p(230.0, 20.0)];
        let hits = segment_segment_intersections(&curve, &line).unwrap();
        assert_eq!(hits.len(), 3);
        let hits_rev = segment_segment_intersections(&line, &curve).unwrap();
        assert_eq!(hits_rev.len(), 3);
    }

    #[test]
    fn segment_segment_rejects_bad_degree() {
        let bad = [p(0.0, 0.0)];
        let line = [p(0.0, 0.0), p(1.0, 1.0)];
        assert!(matches!(
            segment_segment_intersections(&bad, &line),
            Err(GeometryError::InvalidDegree(1))
        ));
    }
}
