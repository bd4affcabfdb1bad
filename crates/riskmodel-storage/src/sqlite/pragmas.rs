//! PRAGMA configuration applied to every estimate-store connection.

use rusqlite::Connection;

use riskmodel_core::errors::StorageError;

/// WAL journal for file databases, NORMAL sync, 5s busy timeout.
pub fn apply_pragmas(conn: &Connection, file_backed: bool) -> Result<(), StorageError> {
    if file_backed {
        conn.execute_batch("PRAGMA journal_mode = WAL;")
            .map_err(|e| StorageError::Sqlite {
                message: format!("failed to enable WAL: {e}"),
            })?;
    }
    conn.execute_batch(
        "
        PRAGMA synchronous = NORMAL;
        PRAGMA busy_timeout = 5000;
        PRAGMA temp_store = MEMORY;
        ",
    )
    .map_err(|e| StorageError::Sqlite {
        message: format!("failed to apply pragmas: {e}"),
    })
}
