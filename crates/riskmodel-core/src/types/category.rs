//! Impact categories a risk is estimated against.

use std::fmt;

use serde::{Deserialize, Serialize};

/// One impact category: schedule, cost, or a named technical dimension.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImpactCategory {
    Schedule,
    Cost,
    Technical(String),
}

impl ImpactCategory {
    /// Label used in table names, column headers and model node names.
    pub fn label(&self) -> &str {
        match self {
            Self::Schedule => "Schedule",
            Self::Cost => "Cost",
            Self::Technical(name) => name,
        }
    }

    /// Name of the system-level total for this category.
    pub fn total_name(&self) -> String {
        format!("Total {} Impact", self.label())
    }
}

impl fmt::Display for ImpactCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
