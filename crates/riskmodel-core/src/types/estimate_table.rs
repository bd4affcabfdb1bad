//! Schema of a persisted per-category estimate table.
//!
//! One table per (system, category). Row index is the risk name; columns are
//! `Minimum <Category> Impact`, `Maximum <Category> Impact`,
//! `Most Likely <Category> Impact`, in that order.

use super::collections::FxHashSet;
use super::{ImpactCategory, ThreePointEstimate};
use crate::errors::StorageError;

/// One row: a risk name and its estimate for the table's category.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateRow {
    pub risk: String,
    pub estimate: ThreePointEstimate,
}

/// An in-memory estimate table for one system and category.
#[derive(Debug, Clone, PartialEq)]
pub struct EstimateTable {
    pub system: String,
    pub category: ImpactCategory,
    pub rows: Vec<EstimateRow>,
}

impl EstimateTable {
    pub fn new(system: impl Into<String>, category: ImpactCategory) -> Self {
        Self {
            system: system.into(),
            category,
            rows: Vec::new(),
        }
    }

    /// A table with one all-zero row per risk name.
    pub fn blank<'a>(
        system: impl Into<String>,
        category: ImpactCategory,
        risks: impl IntoIterator<Item = &'a str>,
    ) -> Self {
        let mut table = Self::new(system, category);
        for risk in risks {
            table.push(risk, ThreePointEstimate::zero());
        }
        table
    }

    pub fn push(&mut self, risk: impl Into<String>, estimate: ThreePointEstimate) {
        self.rows.push(EstimateRow {
            risk: risk.into(),
            estimate,
        });
    }

    /// `<system> <category label> Risks`. File stem or SQL table name.
    pub fn name(&self) -> String {
        Self::table_name(&self.system, &self.category)
    }

    pub fn table_name(system: &str, category: &ImpactCategory) -> String {
        format!("{} {} Risks", system, category.label())
    }

    /// Column headers in persisted order: minimum, maximum, most likely.
    pub fn column_names(category: &ImpactCategory) -> [String; 3] {
        let label = category.label();
        [
            format!("Minimum {label} Impact"),
            format!("Maximum {label} Impact"),
            format!("Most Likely {label} Impact"),
        ]
    }

    /// Look up the row for `risk`, failing with a schema error naming the
    /// table, category and risk.
    pub fn estimate_for(&self, risk: &str) -> Result<ThreePointEstimate, StorageError> {
        self.rows
            .iter()
            .find(|row| row.risk == risk)
            .map(|row| row.estimate)
            .ok_or_else(|| StorageError::MissingRow {
                table: self.name(),
                category: self.category.label().to_string(),
                risk: risk.to_string(),
            })
    }

    /// Reject duplicate risk names; the row index must be unique.
    pub fn check_unique(&self) -> Result<(), StorageError> {
        let mut seen = FxHashSet::default();
        for row in &self.rows {
            if !seen.insert(row.risk.as_str()) {
                return Err(StorageError::DuplicateRow {
                    table: self.name(),
                    risk: row.risk.clone(),
                });
            }
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
