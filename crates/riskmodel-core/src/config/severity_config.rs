//! Severity scheme: the discrete table a utility curve is built from.
//!
//! Schemes are plain values supplied at construction. Two curves with
//! different schemes never share state.

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_BREAKPOINTS, DEFAULT_LEVEL_NAMES, DEFAULT_PROBABILITY_LEVELS,
    DEFAULT_PROBABILITY_NAMES, DEFAULT_UTILITIES,
};
use crate::errors::UtilityError;

/// Named severity scheme with its companion probability scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeverityScheme {
    /// Scheme name. For technical dimensions this is the dimension label.
    pub name: String,
    /// Units of the impact axis, e.g. "months".
    pub units: String,
    /// Impact magnitudes where the severity level changes, strictly ascending.
    pub breakpoints: Vec<f64>,
    /// Utility of each level, one per breakpoint.
    pub utilities: Vec<f64>,
    /// Label of each level, one per breakpoint.
    pub level_names: Vec<String>,
    /// Qualitative probability scale, strictly increasing within [0, 1].
    pub probability_levels: Vec<f64>,
    /// Label of each probability level.
    pub probability_names: Vec<String>,
}

impl Default for SeverityScheme {
    fn default() -> Self {
        Self {
            name: "Default".to_string(),
            units: String::new(),
            breakpoints: DEFAULT_BREAKPOINTS.to_vec(),
            utilities: DEFAULT_UTILITIES.to_vec(),
            level_names: DEFAULT_LEVEL_NAMES.iter().map(|s| s.to_string()).collect(),
            probability_levels: DEFAULT_PROBABILITY_LEVELS.to_vec(),
            probability_names: DEFAULT_PROBABILITY_NAMES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl SeverityScheme {
    /// Default five-level scheme under a new name and unit.
    pub fn named(name: impl Into<String>, units: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            units: units.into(),
            ..Self::default()
        }
    }

    /// Replace the severity levels.
    pub fn with_levels(
        mut self,
        breakpoints: Vec<f64>,
        utilities: Vec<f64>,
        level_names: Vec<String>,
    ) -> Self {
        self.breakpoints = breakpoints;
        self.utilities = utilities;
        self.level_names = level_names;
        self
    }

    /// Replace the probability scale.
    pub fn with_probability_scale(mut self, levels: Vec<f64>, names: Vec<String>) -> Self {
        self.probability_levels = levels;
        self.probability_names = names;
        self
    }

    /// Validate the severity table and probability scale.
    pub fn validate(&self) -> Result<(), UtilityError> {
        self.validate_levels()?;
        self.validate_probability_scale()
    }

    /// Breakpoints non-empty, finite, strictly ascending; utilities and
    /// level names the same length.
    pub fn validate_levels(&self) -> Result<(), UtilityError> {
        if self.breakpoints.is_empty() {
            return Err(self.invalid("breakpoints", "must not be empty"));
        }
        if self.breakpoints.iter().chain(&self.utilities).any(|v| !v.is_finite()) {
            return Err(self.invalid("breakpoints", "breakpoints and utilities must be finite"));
        }
        if self.breakpoints.windows(2).any(|w| w[1] <= w[0]) {
            return Err(self.invalid("breakpoints", "must be strictly ascending"));
        }
        if self.utilities.len() != self.breakpoints.len() {
            return Err(self.invalid(
                "utilities",
                &format!(
                    "has {} entries, breakpoints has {}",
                    self.utilities.len(),
                    self.breakpoints.len()
                ),
            ));
        }
        if self.level_names.len() != self.breakpoints.len() {
            return Err(self.invalid(
                "level_names",
                &format!(
                    "has {} entries, breakpoints has {}",
                    self.level_names.len(),
                    self.breakpoints.len()
                ),
            ));
        }
        Ok(())
    }

    /// Probability levels within [0, 1] and strictly increasing; one name each.
    pub fn validate_probability_scale(&self) -> Result<(), UtilityError> {
        if self.probability_levels.len() != self.probability_names.len() {
            return Err(self.invalid(
                "probability_names",
                &format!(
                    "has {} entries, probability_levels has {}",
                    self.probability_names.len(),
                    self.probability_levels.len()
                ),
            ));
        }
        if self
            .probability_levels
            .iter()
            .any(|p| !(0.0..=1.0).contains(p))
        {
            return Err(self.invalid("probability_levels", "must be within [0, 1]"));
        }
        if self.probability_levels.windows(2).any(|w| w[1] <= w[0]) {
            return Err(self.invalid("probability_levels", "must be strictly increasing"));
        }
        Ok(())
    }

    fn invalid(&self, field: &str, message: &str) -> UtilityError {
        UtilityError::InvalidScheme {
            scheme: self.name.clone(),
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}
