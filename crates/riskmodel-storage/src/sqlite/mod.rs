//! SQLite estimate store.
//!
//! One table per (system, category), named like the CSV file stem:
//! `"<system> <category> Risks"`, with a `Risk` text primary key and the
//! three estimate columns.

pub mod pragmas;
pub mod queries;

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rusqlite::Connection;
use tracing::debug;

use riskmodel_core::errors::StorageError;
use riskmodel_core::traits::EstimateStore;
use riskmodel_core::types::{EstimateTable, ImpactCategory};

use self::pragmas::apply_pragmas;

/// Estimate store over a single serialized SQLite connection.
pub struct SqliteEstimateStore {
    conn: Mutex<Connection>,
    path: Option<PathBuf>,
}

impl SqliteEstimateStore {
    /// Open (or create) the database file at `path`.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| StorageError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        apply_pragmas(&conn, true)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(sqlite_error)?;
        apply_pragmas(&conn, false)?;
        Ok(Self {
            conn: Mutex::new(conn),
            path: None,
        })
    }

    /// Database file path (None for in-memory).
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run `f` with the connection held.
    pub fn with_conn<F, T>(&self, f: F) -> Result<T, StorageError>
    where
        F: FnOnce(&mut Connection) -> Result<T, StorageError>,
    {
        let mut guard = self.conn.lock().map_err(|_| StorageError::Sqlite {
            message: "connection lock poisoned".to_string(),
        })?;
        f(&mut guard)
    }

    fn database_label(&self) -> String {
        self.path
            .as_deref()
            .map_or_else(|| ":memory:".to_string(), |p| p.display().to_string())
    }
}

impl EstimateStore for SqliteEstimateStore {
    fn write_table(&self, table: &EstimateTable) -> Result<(), StorageError> {
        table.check_unique()?;
        self.with_conn(|conn| queries::replace_table(conn, table))?;
        debug!(table = %table.name(), row_count = table.len(), "sqlite table written");
        Ok(())
    }

    fn read_table(
        &self,
        system: &str,
        category: &ImpactCategory,
    ) -> Result<EstimateTable, StorageError> {
        let location = self.database_label();
        let table = self.with_conn(|conn| queries::read_table(conn, system, category, &location))?;
        debug!(table = %table.name(), row_count = table.len(), "sqlite table read");
        Ok(table)
    }

    fn location(&self, system: &str, category: &ImpactCategory) -> String {
        format!(
            "{}::{}",
            self.database_label(),
            EstimateTable::table_name(system, category)
        )
    }
}

pub(crate) fn sqlite_error(e: rusqlite::Error) -> StorageError {
    StorageError::Sqlite {
        message: e.to_string(),
    }
}
