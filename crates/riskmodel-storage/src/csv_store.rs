//! CSV-directory estimate store.
//!
//! Layout: `<root>/<system>/<system> <category> Risks.csv`. The header row
//! is `,Minimum X Impact,Maximum X Impact,Most Likely X Impact`: the first
//! cell names the index column and is written empty, as dataframe exports do.
//! Columns are matched by name on read, so their order is free.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;

use riskmodel_core::errors::StorageError;
use riskmodel_core::traits::EstimateStore;
use riskmodel_core::types::{EstimateTable, ImpactCategory, ThreePointEstimate};

#[derive(Debug, Clone)]
pub struct CsvEstimateStore {
    root: PathBuf,
}

impl CsvEstimateStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every table of `system`.
    pub fn system_dir(&self, system: &str) -> PathBuf {
        self.root.join(system)
    }

    pub fn table_path(&self, system: &str, category: &ImpactCategory) -> PathBuf {
        self.system_dir(system)
            .join(format!("{}.csv", EstimateTable::table_name(system, category)))
    }
}

impl EstimateStore for CsvEstimateStore {
    fn write_table(&self, table: &EstimateTable) -> Result<(), StorageError> {
        table.check_unique()?;
        let dir = self.system_dir(&table.system);
        std::fs::create_dir_all(&dir).map_err(|e| io_error(&dir, e))?;

        let path = self.table_path(&table.system, &table.category);
        let mut writer = csv::Writer::from_path(&path).map_err(|e| csv_error(&path, table, e))?;

        let [minimum, maximum, most_likely] = EstimateTable::column_names(&table.category);
        writer
            .write_record(["", minimum.as_str(), maximum.as_str(), most_likely.as_str()])
            .map_err(|e| csv_error(&path, table, e))?;

        for row in &table.rows {
            let e = &row.estimate;
            writer
                .write_record([
                    row.risk.clone(),
                    format_value(e.minimum),
                    format_value(e.maximum),
                    format_value(e.most_likely),
                ])
                .map_err(|err| csv_error(&path, table, err))?;
        }
        writer.flush().map_err(|e| io_error(&path, e))?;

        debug!(path = %path.display(), row_count = table.len(), "csv table written");
        Ok(())
    }

    fn read_table(
        &self,
        system: &str,
        category: &ImpactCategory,
    ) -> Result<EstimateTable, StorageError> {
        let path = self.table_path(system, category);
        let mut table = EstimateTable::new(system, category.clone());
        let table_name = table.name();

        let mut reader = match csv::Reader::from_path(&path) {
            Ok(reader) => reader,
            Err(e) => {
                if let csv::ErrorKind::Io(io) = e.kind() {
                    if io.kind() == ErrorKind::NotFound {
                        return Err(StorageError::TableNotFound {
                            table: table_name,
                            location: path.display().to_string(),
                        });
                    }
                }
                return Err(csv_error(&path, &table, e));
            }
        };

        let headers = reader
            .headers()
            .map_err(|e| csv_error(&path, &table, e))?
            .clone();
        let columns = EstimateTable::column_names(category);
        let mut positions = [0usize; 3];
        for (slot, column) in positions.iter_mut().zip(&columns) {
            // Position 0 is the row index, whatever its header says.
            *slot = headers
                .iter()
                .skip(1)
                .position(|h| h == column.as_str())
                .map(|p| p + 1)
                .ok_or_else(|| StorageError::MissingColumn {
                    table: table_name.clone(),
                    column: column.clone(),
                })?;
        }

        for record in reader.records() {
            let record = record.map_err(|e| csv_error(&path, &table, e))?;
            let risk = record.get(0).unwrap_or_default().to_string();
            let mut values = [0.0f64; 3];
            for ((value, &pos), column) in values.iter_mut().zip(&positions).zip(&columns) {
                let raw = record.get(pos).unwrap_or_default();
                *value = parse_value(raw).ok_or_else(|| StorageError::InvalidValue {
                    table: table_name.clone(),
                    risk: risk.clone(),
                    column: column.clone(),
                    value: raw.to_string(),
                })?;
            }
            let [minimum, maximum, most_likely] = values;
            table.push(risk, ThreePointEstimate::new(minimum, most_likely, maximum));
        }

        debug!(path = %path.display(), row_count = table.len(), "csv table read");
        Ok(table)
    }

    fn location(&self, system: &str, category: &ImpactCategory) -> String {
        self.table_path(system, category).display().to_string()
    }
}

/// Shortest representation that parses back to the same bits.
fn format_value(v: f64) -> String {
    if v.is_nan() {
        String::new()
    } else {
        format!("{v:?}")
    }
}

/// An empty cell is a missing value (NaN), as dataframe readers treat it.
fn parse_value(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(f64::NAN);
    }
    raw.parse().ok()
}

fn io_error(path: &Path, e: std::io::Error) -> StorageError {
    StorageError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn csv_error(path: &Path, table: &EstimateTable, e: csv::Error) -> StorageError {
    if e.is_io_error() {
        StorageError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        }
    } else {
        StorageError::Malformed {
            table: table.name(),
            message: e.to_string(),
        }
    }
}
