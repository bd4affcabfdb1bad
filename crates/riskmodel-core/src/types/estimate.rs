//! Three-point (PERT) estimates.

use serde::{Deserialize, Serialize};

use crate::errors::EstimateError;

/// Expert judgment of an uncertain impact: minimum, most likely, maximum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThreePointEstimate {
    pub minimum: f64,
    pub most_likely: f64,
    pub maximum: f64,
}

impl ThreePointEstimate {
    pub fn new(minimum: f64, most_likely: f64, maximum: f64) -> Self {
        Self {
            minimum,
            most_likely,
            maximum,
        }
    }

    /// All-zero estimate written into blank tables.
    pub fn zero() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }

    /// Check finiteness and `minimum <= most_likely <= maximum`.
    ///
    /// Degeneracy (zero width) is not checked here; it is a property of the
    /// distribution built from the estimate, not of the estimate itself.
    pub fn validate(&self) -> Result<(), EstimateError> {
        if !(self.minimum.is_finite() && self.most_likely.is_finite() && self.maximum.is_finite())
        {
            return Err(EstimateError::NonFinite {
                minimum: self.minimum,
                most_likely: self.most_likely,
                maximum: self.maximum,
            });
        }
        if self.minimum > self.most_likely || self.most_likely > self.maximum {
            return Err(EstimateError::InvalidEstimate {
                minimum: self.minimum,
                most_likely: self.most_likely,
                maximum: self.maximum,
            });
        }
        Ok(())
    }

    /// Width of the estimate range.
    pub fn range(&self) -> f64 {
        self.maximum - self.minimum
    }
}

/// Placeholder used before an estimate is populated: 0 / 0.5 / 1.
impl Default for ThreePointEstimate {
    fn default() -> Self {
        Self::new(0.0, 0.5, 1.0)
    }
}
