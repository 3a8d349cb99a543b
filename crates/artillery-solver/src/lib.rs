#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for computing artillery firing solutions on a 2D map grid."]
#![doc = ""]
#![doc = "This crate provides grid points and a solver that converts the offset between"]
#![doc = "an origin and a target into range (meters) and compass bearing (degrees or milliradians)."]

extern crate alloc;

pub mod error;
pub mod point;
pub mod solver;

pub use error::SolverError;
pub use point::Point;
pub use solver::{DEFAULT_GRID_SIZE, FiringSolution, Solver};
