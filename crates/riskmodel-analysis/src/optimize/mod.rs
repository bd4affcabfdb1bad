//! Nonlinear least squares, delegated to the `levenberg-marquardt` crate.

pub mod least_squares;

pub use least_squares::{FitReport, LeastSquaresOptions, Termination};
