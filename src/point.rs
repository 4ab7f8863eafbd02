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

//! A 2D point and the vector type describing the displacement between two
//! of them.
//!
//! `blood-geometry`, the crate this kernel grew out of, keeps `Point<T>`
//! generic over its scalar type so it can interoperate with `euclid`,
//! `kurbo`, and friends. This kernel only ever operates on `f64`, so
//! `Point` and `Vector` are concrete instead, but keep the same split: a
//! `Point` is a location, a `Vector` is a displacement, and subtracting
//! two points gives you the vector between them.

use core::ops;

/// A point in the 2D plane.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

/// A displacement between two points.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vector {
    pub x: f64,
    pub y: f64,
}

impl Point {
    /// Create a new point from its coordinates.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// The point at the origin.
    #[inline]
    pub fn zero() -> Self {
        Point { x: 0.0, y: 0.0 }
    }

    /// Convert this point to the vector from the origin to it.
    #[inline]
    pub fn into_vector(self) -> Vector {
        Vector { x: self.x, y: self.y }
    }

    /// Linearly interpolate between this point and another.
    ///
    /// `t = 0` returns `self`, `t = 1` returns `other`.
    #[inline]
    pub fn lerp(self, other: Self, t: f64) -> Self {
        Point {
            x: self.x + (other.x - self.x) * t,
            y: self.y + (other.y - self.y) * t,
        }
    }

    /// The midpoint between this point and another.
    #[inline]
    pub fn midpoint(self, other: Self) -> Self {
        self.lerp(other, 0.5)
    }

    /// The Euclidean distance between this point and another.
    #[inline]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).length()
    }

    /// All coordinates are finite (not NaN or infinite).
    ///
    /// A segment built from non-finite points violates this crate's
    /// input invariant; this is provided so callers can check it.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// This point and `other` agree on both axes to within `epsilon`.
    #[inline]
    pub fn approx_eq(self, other: Self, epsilon: f64) -> bool {
        (self.x - other.x).abs() < epsilon && (self.y - other.y).abs() < epsilon
    }
}

impl Vector {
    /// Create a new vector from its components.
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Vector { x, y }
    }

    /// The zero vector.
    #[inline]
    pub fn zero() -> Self {
        Vector { x: 0.0, y: 0.0 }
    }

    /// Convert this vector back to a point (displacement from the origin).
    #[inline]
    pub fn into_point(self) -> Point {
        Point { x: self.x, y: self.y }
    }

    /// The dot product of this vector with another.
    #[inline]
    pub fn dot(self, other: Self) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// The 2D cross product (the scalar z-component of the 3D cross
    /// product of the two vectors extended into the plane).
    #[inline]
    pub fn cross(self, other: Self) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// This vector rotated 90 degrees counter-clockwise.
    ///
    /// Equivalent to multiplying by the imaginary unit if this were a
    /// complex number instead of a 2D vector; [`crate::curve::calc_quadratic_arc_length`]
    /// uses it to get the curve's normal direction from its tangent.
    #[inline]
    pub fn rotate90(self) -> Self {
        Vector { x: -self.y, y: self.x }
    }

    /// The squared length of this vector. Cheaper than [`Vector::length`]
    /// when only comparing magnitudes.
    #[inline]
    pub fn length_squared(self) -> f64 {
        self.dot(self)
    }

    /// The length (magnitude) of this vector.
    #[inline]
    pub fn length(self) -> f64 {
        self.length_squared().sqrt()
    }
}

impl ops::Add<Vector> for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Vector) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl ops::Sub<Vector> for Point {
    type Output = Point;
    #[inline]
    fn sub(self, rhs: Vector) -> Point {
        Point { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl ops::Sub<Point> for Point {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Point) -> Vector {
        Vector { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl ops::Add for Vector {
    type Output = Vector;
    #[inline]
    fn add(self, rhs: Vector) -> Vector {
        Vector { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl ops::Sub for Vector {
    type Output = Vector;
    #[inline]
    fn sub(self, rhs: Vector) -> Vector {
        Vector { x: self.x - rhs.x, y: self.y - rhs.y }
    }
}

impl ops::Mul<f64> for Vector {
    type Output = Vector;
    #[inline]
    fn mul(self, rhs: f64) -> Vector {
        Vector { x: self.x * rhs, y: self.y * rhs }
    }
}

impl ops::Div<f64> for Vector {
    type Output = Vector;
    #[inline]
    fn div(self, rhs: f64) -> Vector {
        Vector { x: self.x / rhs, y: self.y / rhs }
    }
}

impl ops::Neg for Vector {
    type Output = Vector;
    #[inline]
    fn neg(self) -> Vector {
        Vector { x: -self.x, y: -self.y }
    }
}

impl ops::Mul<f64> for Point {
    type Output = Point;
    #[inline]
    fn mul(self, rhs: f64) -> Point {
        Point { x: self.x * rhs, y: self.y * rhs }
    }
}

impl ops::Add for Point {
    type Output = Point;
    #[inline]
    fn add(self, rhs: Point) -> Point {
        Point { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Point { x, y }
    }
}

impl From<Point> for (f64, f64) {
    #[inline]
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Point::new(1.0, 2.0);
        let b = Point::new(4.0, 6.0);
        assert_eq!(a.distance(b), 5.0);
        assert_eq!(a.distance(b), b.distance(a));
    }

    #[test]
    fn midpoint_averages_coordinates() {
        let a = Point::new(0.0, 0.0);
        let b = Point::new(2.0, 4.0);
        assert_eq!(a.midpoint(b), Point::new(1.0, 2.0));
    }

    #[test]
    fn rotate90_is_counter_clockwise() {
        let v = Vector::new(1.0, 0.0);
        assert_eq!(v.rotate90(), Vector::new(0.0, 1.0));
    }

    #[test]
    fn cross_of_perpendicular_unit_vectors_is_one() {
        let a = Vector::new(1.0, 0.0);
        let b = Vector::new(0.0, 1.0);
        assert_eq!(a.cross(b), 1.0);
    }

    #[test]
    fn sub_of_points_gives_displacement_vector() {
        let a = Point::new(5.0, 5.0);
        let b = Point::new(2.0, 1.0);
        assert_eq!(a - b, Vector::new(3.0, 4.0));
    }
}
