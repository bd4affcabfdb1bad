//! Impact-to-severity utility curves.
//!
//! A curve is built from a discrete severity table (`SeverityScheme`) and
//! carries a smooth logistic approximation fitted to that table by least
//! squares. Severities can be read from the step table, the logistic, or a
//! caller-supplied function.

pub mod curve;
pub mod logistic;
pub mod mode;

pub use curve::{UtilityCurve, UtilityPoint};
pub use logistic::LogisticParams;
pub use mode::UtilityMode;
