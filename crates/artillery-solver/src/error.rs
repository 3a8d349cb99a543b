//! Error types for the artillery solver.
//!
//! This module defines the errors that can occur while configuring a
//! [`Solver`](crate::Solver) or computing a firing solution with it.

use core::fmt;

/// Errors that can occur in firing-solution calculations.
#[derive(Debug, Clone, PartialEq)]
pub enum SolverError {
    /// Error for an invalid solver configuration.
    /// This variant is returned when a grid size is provided that is not a positive integer.
    InvalidConfiguration(&'static str),
    /// Error for a missing target.
    /// This variant is returned when range or bearing is requested before a target is set.
    NoTarget(&'static str),
}

impl fmt::Display for SolverError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            SolverError::NoTarget(msg) => write!(f, "No target: {}", msg),
        }
    }
}

impl core::error::Error for SolverError {}
