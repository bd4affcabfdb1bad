//! riskmodel-storage: `EstimateStore` backends.
//!
//! - `CsvEstimateStore`: one dataframe-compatible CSV file per table under
//!   `<root>/<system>/`.
//! - `SqliteEstimateStore`: one table per (system, category) in a single
//!   database file.

pub mod csv_store;
pub mod sqlite;

pub use csv_store::CsvEstimateStore;
pub use sqlite::SqliteEstimateStore;

use riskmodel_core::config::{StorageBackend, StorageConfig};
use riskmodel_core::constants::SQLITE_FILE_NAME;
use riskmodel_core::errors::{StorageError, SystemError};
use riskmodel_core::traits::EstimateStore;

/// Open the store selected by `config`.
///
/// The SQLite backend creates the root directory if needed and opens
/// `<root>/riskmodel.db`.
pub fn open_store(config: &StorageConfig) -> Result<Box<dyn EstimateStore>, SystemError> {
    let root = config.effective_root();
    match config.effective_backend()? {
        StorageBackend::Csv => Ok(Box::new(CsvEstimateStore::new(root))),
        StorageBackend::Sqlite => {
            std::fs::create_dir_all(&root).map_err(|e| StorageError::Io {
                path: root.display().to_string(),
                message: e.to_string(),
            })?;
            Ok(Box::new(SqliteEstimateStore::open(&root.join(SQLITE_FILE_NAME))?))
        }
    }
}
