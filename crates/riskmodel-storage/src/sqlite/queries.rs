//! Queries against per-category estimate tables.
//!
//! Table and column names contain spaces and come from user-supplied system
//! and dimension names, so every identifier is double-quoted with embedded
//! quotes doubled.

use rusqlite::{params, Connection, OptionalExtension};

use riskmodel_core::constants::RISK_COLUMN;
use riskmodel_core::errors::StorageError;
use riskmodel_core::types::{EstimateTable, ImpactCategory, ThreePointEstimate};

use super::sqlite_error;

pub fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Drop and recreate the table, then insert every row, in one transaction.
pub fn replace_table(conn: &mut Connection, table: &EstimateTable) -> Result<(), StorageError> {
    let name = quote_ident(&table.name());
    let [minimum, maximum, most_likely] = EstimateTable::column_names(&table.category);
    let (minimum, maximum, most_likely) = (
        quote_ident(&minimum),
        quote_ident(&maximum),
        quote_ident(&most_likely),
    );
    let risk = quote_ident(RISK_COLUMN);

    let tx = conn.transaction().map_err(sqlite_error)?;
    tx.execute_batch(&format!(
        "DROP TABLE IF EXISTS {name};
         CREATE TABLE {name} (
             {risk} TEXT PRIMARY KEY,
             {minimum} REAL,
             {maximum} REAL,
             {most_likely} REAL
         );"
    ))
    .map_err(sqlite_error)?;
    {
        let mut stmt = tx
            .prepare(&format!(
                "INSERT INTO {name} ({risk}, {minimum}, {maximum}, {most_likely})
                 VALUES (?1, ?2, ?3, ?4)"
            ))
            .map_err(sqlite_error)?;
        for row in &table.rows {
            let e = &row.estimate;
            stmt.execute(params![row.risk, e.minimum, e.maximum, e.most_likely])
                .map_err(sqlite_error)?;
        }
    }
    tx.commit().map_err(sqlite_error)
}

pub fn table_exists(conn: &Connection, table: &str) -> Result<bool, StorageError> {
    conn.query_row(
        "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1",
        params![table],
        |_| Ok(()),
    )
    .optional()
    .map(|found| found.is_some())
    .map_err(sqlite_error)
}

pub fn column_names(conn: &Connection, table: &str) -> Result<Vec<String>, StorageError> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({})", quote_ident(table)))
        .map_err(sqlite_error)?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(1))
        .map_err(sqlite_error)?
        .collect::<Result<Vec<_>, _>>()
        .map_err(sqlite_error)?;
    Ok(names)
}

/// Read a table back in insertion order. NULL cells read as NaN.
pub fn read_table(
    conn: &Connection,
    system: &str,
    category: &ImpactCategory,
    location: &str,
) -> Result<EstimateTable, StorageError> {
    let mut table = EstimateTable::new(system, category.clone());
    let table_name = table.name();

    if !table_exists(conn, &table_name)? {
        return Err(StorageError::TableNotFound {
            table: table_name,
            location: location.to_string(),
        });
    }

    let present = column_names(conn, &table_name)?;
    let [minimum, maximum, most_likely] = EstimateTable::column_names(category);
    for column in [RISK_COLUMN, minimum.as_str(), maximum.as_str(), most_likely.as_str()] {
        if !present.iter().any(|p| p == column) {
            return Err(StorageError::MissingColumn {
                table: table_name.clone(),
                column: column.to_string(),
            });
        }
    }

    let mut stmt = conn
        .prepare(&format!(
            "SELECT {}, {}, {}, {} FROM {} ORDER BY rowid",
            quote_ident(RISK_COLUMN),
            quote_ident(&minimum),
            quote_ident(&maximum),
            quote_ident(&most_likely),
            quote_ident(&table_name),
        ))
        .map_err(sqlite_error)?;
    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, Option<f64>>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<f64>>(3)?,
            ))
        })
        .map_err(sqlite_error)?;

    for row in rows {
        let (risk, min, max, likely) = row.map_err(|e| StorageError::Malformed {
            table: table_name.clone(),
            message: e.to_string(),
        })?;
        table.push(
            risk,
            ThreePointEstimate::new(
                min.unwrap_or(f64::NAN),
                likely.unwrap_or(f64::NAN),
                max.unwrap_or(f64::NAN),
            ),
        );
    }
    Ok(table)
}
