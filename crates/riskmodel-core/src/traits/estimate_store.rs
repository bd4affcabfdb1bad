//! EstimateStore trait: the read/write contract for per-category estimate
//! tables.
//!
//! The analysis crate only talks to this trait. `riskmodel-storage` provides
//! CSV-directory and SQLite implementations; the storage medium is theirs.

use crate::errors::StorageError;
use crate::types::{EstimateTable, ImpactCategory};

/// Durable store of estimate tables keyed by (system, category).
pub trait EstimateStore {
    /// Create or replace the table. Existing contents are not read first.
    fn write_table(&self, table: &EstimateTable) -> Result<(), StorageError>;

    /// Read a table back. A missing table is `StorageError::TableNotFound`;
    /// missing columns and unparseable cells are schema errors.
    fn read_table(
        &self,
        system: &str,
        category: &ImpactCategory,
    ) -> Result<EstimateTable, StorageError>;

    /// Human-readable location of the table, for diagnostics.
    fn location(&self, system: &str, category: &ImpactCategory) -> String {
        EstimateTable::table_name(system, category)
    }
}
