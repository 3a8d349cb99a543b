//! Firing-solution calculations.
//!
//! This module defines the [`Solver`], which turns an origin, a target and a
//! grid size into range and bearing, and the [`FiringSolution`] it produces.

use core::f64::consts::PI;
use core::fmt;
use libm::{acos, round, sqrt};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::SolverError;
use crate::point::Point;

/// Grid size used when none is given: one kilometre map square split into
/// 100 m cells.
pub const DEFAULT_GRID_SIZE: u32 = 100;

/// Range and bearing from the origin to the target, as computed by
/// [`Solver::solve`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FiringSolution {
    /// Straight-line ground distance (m).
    pub range: u64,
    /// Compass bearing, clockwise from north (°).
    pub bearing_degrees: u32,
    /// Compass bearing, clockwise from north (mrad).
    pub bearing_mils: u32,
}

impl fmt::Display for FiringSolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(range: {} m, bearing: {}° / {} mil)",
            self.range, self.bearing_degrees, self.bearing_mils
        )
    }
}

/// Firing-solution calculator.
///
/// Holds an origin (the firing position), an optional target (the impact
/// position) and the grid size, i.e. how many meters one unit of coordinate
/// difference represents. Range and bearing are computed on demand from the
/// current state.
///
/// Bearings follow the compass convention: 0 is north (+y), increasing
/// clockwise, so east (+x) is a quarter turn.
#[derive(Debug, Clone, PartialEq)]
pub struct Solver {
    /// Meters per grid unit, always positive.
    grid_size: u32,
    origin: Point,
    target: Option<Point>,
}

impl Solver {
    /// Construct a solver with the default grid size of
    /// [`DEFAULT_GRID_SIZE`] meters and no target.
    pub const fn new(origin: Point) -> Self {
        Solver {
            grid_size: DEFAULT_GRID_SIZE,
            origin,
            target: None,
        }
    }

    /// Construct a solver with an explicit grid size and no target.
    ///
    /// # Arguments
    ///
    /// * `origin`: The firing position.
    /// * `grid_size`: Meters per grid unit.
    ///
    /// # Errors
    ///
    /// Returns `Err(SolverError::InvalidConfiguration)` if `grid_size` is not positive.
    pub fn with_grid_size(origin: Point, grid_size: i64) -> Result<Self, SolverError> {
        Ok(Solver {
            grid_size: validate_grid_size(grid_size)?,
            origin,
            target: None,
        })
    }

    /// Returns the grid size in meters.
    pub fn grid_size(&self) -> u32 {
        self.grid_size
    }

    /// Returns the origin.
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Returns the target, or `None` if no target has been set yet.
    pub fn target(&self) -> Option<Point> {
        self.target
    }

    /// Sets the grid size in meters.
    ///
    /// # Errors
    ///
    /// Returns `Err(SolverError::InvalidConfiguration)` if `grid_size` is not
    /// positive. The previous grid size is kept in that case.
    pub fn set_grid_size(&mut self, grid_size: i64) -> Result<(), SolverError> {
        self.grid_size = validate_grid_size(grid_size)?;
        Ok(())
    }

    /// Replaces the origin.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Replaces the target.
    pub fn set_target(&mut self, target: Point) {
        self.target = Some(target);
    }

    /// Coordinate differences `(dx, dy)` from origin to target, in grid units.
    fn deltas(&self) -> Result<(i64, i64), SolverError> {
        let target = self
            .target
            .ok_or(SolverError::NoTarget("target must be set before solving"))?;
        let dx = i64::from(target.x()) - i64::from(self.origin.x());
        let dy = i64::from(target.y()) - i64::from(self.origin.y());
        Ok((dx, dy))
    }

    /// Straight-line distance between origin and target, in grid units.
    ///
    /// # Errors
    ///
    /// Returns `Err(SolverError::NoTarget)` if no target is set.
    pub(crate) fn hypotenuse(&self) -> Result<f64, SolverError> {
        let (dx, dy) = self.deltas()?;
        let (dx, dy) = (dx as f64, dy as f64);
        Ok(sqrt(dx * dx + dy * dy))
    }

    /// Calculates the range from origin to target in meters.
    ///
    /// The grid distance is scaled by the grid size and rounded to the
    /// nearest meter, halves away from zero.
    ///
    /// # Errors
    ///
    /// Returns `Err(SolverError::NoTarget)` if no target is set.
    pub fn range(&self) -> Result<u64, SolverError> {
        let hypotenuse = self.hypotenuse()?;
        Ok(round(hypotenuse * f64::from(self.grid_size)) as u64)
    }

    /// Calculates the bearing from origin to target in radians, within `[0, 2π)`.
    ///
    /// A target on top of the origin has a bearing of 0.
    ///
    /// # Errors
    ///
    /// Returns `Err(SolverError::NoTarget)` if no target is set.
    pub fn bearing_radians(&self) -> Result<f64, SolverError> {
        let (dx, dy) = self.deltas()?;

        let angle = match (dx, dy) {
            (0, 0) => 0.0,
            (0, dy) if dy > 0 => 0.0,
            (0, _) => PI,
            (dx, 0) if dx > 0 => PI / 2.0,
            (_, 0) => 3.0 * PI / 2.0,
            (dx, dy) => {
                // Law of cosines on the triangle formed by the north ray, the
                // line of fire and the x offset. Rounding can push the ratio
                // just outside acos' domain on near-axis targets.
                let h = self.hypotenuse()?;
                let (fdx, fdy) = (dx as f64, dy as f64);
                let cos_angle =
                    ((fdx * fdx - h * h - fdy * fdy) / (-2.0 * h * fdy)).clamp(-1.0, 1.0);
                let base_angle = acos(cos_angle);
                if dx < 0 {
                    2.0 * PI - base_angle
                } else {
                    base_angle
                }
            }
        };

        Ok(angle)
    }

    /// Calculates the bearing in whole degrees.
    ///
    /// Bearings within half a degree of north on the west side round up to
    /// 360 rather than wrapping to 0.
    ///
    /// # Errors
    ///
    /// Returns `Err(SolverError::NoTarget)` if no target is set.
    pub fn bearing_degrees(&self) -> Result<u32, SolverError> {
        let radians = self.bearing_radians()?;
        Ok(round(radians * 180.0 / PI) as u32)
    }

    /// Calculates the bearing in whole milliradians.
    ///
    /// # Errors
    ///
    /// Returns `Err(SolverError::NoTarget)` if no target is set.
    pub fn bearing_mils(&self) -> Result<u32, SolverError> {
        let radians = self.bearing_radians()?;
        Ok(round(radians * 1000.0) as u32)
    }

    /// Convenience function computing range and both bearing units at once.
    ///
    /// # Errors
    ///
    /// Returns `Err(SolverError::NoTarget)` if no target is set.
    pub fn solve(&self) -> Result<FiringSolution, SolverError> {
        Ok(FiringSolution {
            range: self.range()?,
            bearing_degrees: self.bearing_degrees()?,
            bearing_mils: self.bearing_mils()?,
        })
    }
}

impl fmt::Display for Solver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.target {
            Some(target) => write!(
                f,
                "Solver (origin: {}, target: {}, grid: {} m)",
                self.origin, target, self.grid_size
            ),
            None => write!(
                f,
                "Solver (origin: {}, no target, grid: {} m)",
                self.origin, self.grid_size
            ),
        }
    }
}

fn validate_grid_size(grid_size: i64) -> Result<u32, SolverError> {
    if grid_size <= 0 {
        return Err(SolverError::InvalidConfiguration(
            "grid size must be a positive integer",
        ));
    }
    u32::try_from(grid_size)
        .map_err(|_| SolverError::InvalidConfiguration("grid size is too large"))
}
