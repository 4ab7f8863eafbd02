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

//! Real-root solvers for quadratic and cubic equations, tuned for the
//! near-degenerate cases that show up constantly when a curve's
//! derivative is taken (flat segments, cusps, near-tangent crossings).

use crate::{EPSILON, EPSILON_DIGITS};

/// Solve `a*x^2 + b*x + c = 0` for real `x`.
///
/// Falls through to the linear case when `a` is negligible, and to "no
/// solution" when both `a` and `b` are. Complex roots (negative
/// discriminant) are silently discarded. An empty result is a valid
/// answer, not an error. The returned roots are **not** sorted and may
/// contain a duplicate when the discriminant is zero.
pub fn solve_quadratic(a: f64, b: f64, c: f64) -> Vec<f64> {
    if a.abs() < EPSILON {
        if b.abs() < EPSILON {
            return Vec::new();
        }
        return vec![-c / b];
    }

    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Vec::new();
    }

    let root = discriminant.sqrt();
    vec![(-b + root) / (2.0 * a), (-b - root) / (2.0 * a)]
}

/// Solve `a*x^3 + b*x^2 + c*x + d = 0` for real `x`.
///
/// Delegates to [`solve_quadratic`] when `a` is negligible. Otherwise
/// uses the trigonometric form of Cardano's method: three real roots are
/// merged (averaged) and rounded to [`EPSILON_DIGITS`] decimal digits
/// when they fall within `EPSILON` of each other, so near-tangencies and
/// triple roots collapse cleanly instead of producing three nearly-equal
/// but distinct split points. The returned roots are **not** sorted in
/// the single-real-root case.
pub fn solve_cubic(a: f64, b: f64, c: f64, d: f64) -> Vec<f64> {
    if a.abs() < EPSILON {
        // For very small `a`, the cubic formula below is numerically
        // unreliable, so fall back to the quadratic solver rather than
        // just testing for exact zero.
        return crate::solve_quadratic(b, c, d);
    }

    let a1 = b / a;
    let a2 = c / a;
    let a3 = d / a;

    let q = (a1 * a1 - 3.0 * a2) / 9.0;
    let r = (2.0 * a1 * a1 * a1 - 9.0 * a1 * a2 + 27.0 * a3) / 54.0;

    let mut r2 = r * r;
    let mut q3 = q * q * q;
    if r2 < EPSILON {
        r2 = 0.0;
    }
    if q3.abs() < EPSILON {
        q3 = 0.0;
    }

    let r2_q3 = r2 - q3;

    if r2 == 0.0 && q3 == 0.0 {
        let x = round_to_epsilon_digits(-a1 / 3.0);
        return vec![x, x, x];
    }

    if r2_q3 <= EPSILON * 0.5 {
        // Three real roots (the `EPSILON * 0.5` margin guarantees `q3`
        // isn't zero here, so the division below is safe).
        let theta = (r / q3.sqrt()).clamp(-1.0, 1.0).acos();
        let r_q2 = -2.0 * q.sqrt();
        let a1_3 = a1 / 3.0;

        let mut roots = [
            r_q2 * (theta / 3.0).cos() - a1_3,
            r_q2 * ((theta + 2.0 * core::f64::consts::PI) / 3.0).cos() - a1_3,
            r_q2 * ((theta + 4.0 * core::f64::consts::PI) / 3.0).cos() - a1_3,
        ];
        roots.sort_by(|x, y| x.partial_cmp(y).unwrap());
        let [x0, x1, x2] = roots;

        if x1 - x0 < EPSILON && x2 - x1 < EPSILON {
            let merged = round_to_epsilon_digits((x0 + x1 + x2) / 3.0);
            return vec![merged, merged, merged];
        }
        if x1 - x0 < EPSILON {
            let merged = round_to_epsilon_digits((x0 + x1) / 2.0);
            return vec![merged, merged, round_to_epsilon_digits(x2)];
        }
        if x2 - x1 < EPSILON {
            let merged = round_to_epsilon_digits((x1 + x2) / 2.0);
            return vec![round_to_epsilon_digits(x0), merged, merged];
        }
        return vec![
            round_to_epsilon_digits(x0),
            round_to_epsilon_digits(x1),
            round_to_epsilon_digits(x2),
        ];
    }

    // One real root.
    let mut x = (r2_q3.sqrt() + r.abs()).powf(1.0 / 3.0);
    x += q / x;
    if r >= 0.0 {
        x = -x;
    }
    vec![round_to_epsilon_digits(x - a1 / 3.0)]
}

fn round_to_epsilon_digits(x: f64) -> f64 {
    let scale = 10f64.powi(EPSILON_DIGITS);
    (x * scale).round() / scale
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadratic_linear_fallback() {
        assert_eq!(solve_quadratic(0.0, 2.0, -4.0), vec![2.0]);
    }

    #[test]
    fn quadratic_degenerate_has_no_roots() {
        assert!(solve_quadratic(0.0, 0.0, 5.0).is_empty());
    }

    #[test]
    fn quadratic_negative_discriminant_has_no_roots() {
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_empty());
    }

    #[test]
    fn quadratic_two_real_roots() {
        let mut roots = solve_quadratic(1.0, -3.0, 2.0);
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(roots, vec![1.0, 2.0]);
    }

    #[test]
    fn cubic_three_distinct_real_roots() {
        let mut roots = solve_cubic(1.0, 1.0, -6.0, 0.0);
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(roots, vec![-3.0, 0.0, 2.0]);
    }

    #[test]
    fn cubic_triple_root() {
        let roots = solve_cubic(1.0, -4.5, 6.75, -3.375);
        assert_eq!(roots, vec![1.5, 1.5, 1.5]);
    }

    #[test]
    fn cubic_falls_back_to_quadratic_for_negligible_leading_term() {
        let roots = solve_cubic(0.0, 1.0, -3.0, 2.0);
        let mut quad = solve_quadratic(1.0, -3.0, 2.0);
        quad.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mut roots = roots;
        roots.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(roots, quad);
    }
}
