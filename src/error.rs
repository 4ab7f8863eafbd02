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

//! Error type for this crate's one fallible condition.

/// The only error this crate's operations surface.
///
/// Every other failure mode (a degenerate solver equation, a line
/// parallel to the one it's being checked against, an empty intersection
/// result) is a valid outcome represented by an empty `Vec` or a
/// narrower return type, not an `Err`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    /// A segment of unsupported arity was supplied.
    ///
    /// Carries the point-slice length that was rejected; valid lengths
    /// are 2 (line), 3 (quadratic), and 4 (cubic).
    #[error("segment has unsupported degree: expected 2, 3, or 4 points, got {0}")]
    InvalidDegree(usize),
}
