//! Grid coordinates.
//!
//! This module defines [`Point`], an immutable integer position on the map grid.

use alloc::string::{String, ToString};
use core::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A position on the map grid, in grid units.
///
/// Coordinates may be negative (e.g. on a grid relative to some reference
/// point). A `Point` cannot be changed once built; move a solver's origin or
/// target by replacing the whole point.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    x: i32,
    y: i32,
}

impl Point {
    /// Creates a new `Point`.
    ///
    /// # Arguments
    ///
    /// * `x`: Easting in grid units.
    /// * `y`: Northing in grid units.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns the x (easting) coordinate.
    pub const fn x(&self) -> i32 {
        self.x
    }

    /// Returns the y (northing) coordinate.
    pub const fn y(&self) -> i32 {
        self.y
    }

    /// Returns both coordinates as a pair, ordered `(x, y)`.
    ///
    /// With the `serde` feature enabled a `Point` serializes as the keyed map
    /// `{ "x": .., "y": .. }` instead.
    pub const fn as_pair(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    /// Human readable label in the form `(x, y)`.
    pub fn label(&self) -> String {
        self.to_string()
    }
}

impl From<Point> for (i32, i32) {
    fn from(point: Point) -> Self {
        point.as_pair()
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
