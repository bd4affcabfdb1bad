//! Evaluation mode for utility curves.

use std::fmt;

use super::logistic::LogisticParams;

/// How a curve maps impact to severity.
#[derive(Clone, Copy)]
pub enum UtilityMode<'a> {
    /// Step function over the severity table.
    Discrete,
    /// Logistic `L / (1 + exp(-k (x - x0)))`. `None` uses the fitted
    /// parameters; `Some` overrides them for this call.
    Logistic(Option<LogisticParams>),
    /// Caller-supplied mapping.
    Custom(&'a dyn Fn(f64) -> f64),
}

impl UtilityMode<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Discrete => "discrete",
            Self::Logistic(_) => "logistic",
            Self::Custom(_) => "custom",
        }
    }
}

impl Default for UtilityMode<'_> {
    fn default() -> Self {
        Self::Logistic(None)
    }
}

impl fmt::Debug for UtilityMode<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Discrete => f.write_str("Discrete"),
            Self::Logistic(params) => f.debug_tuple("Logistic").field(params).finish(),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
