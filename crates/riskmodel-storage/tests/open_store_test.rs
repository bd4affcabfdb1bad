//! Backend selection from `StorageConfig`.

use riskmodel_core::config::StorageConfig;
use riskmodel_core::errors::{RiskModelErrorCode, SystemError};
use riskmodel_core::types::{EstimateTable, ImpactCategory};
use riskmodel_storage::open_store;
use tempfile::tempdir;

/// STO-01: default backend is CSV under the configured root
#[test]
fn test_csv_backend() {
    let dir = tempdir().unwrap();
    let config = StorageConfig {
        root: Some(dir.path().display().to_string()),
        backend: None,
    };
    let store = open_store(&config).unwrap();
    store
        .write_table(&EstimateTable::blank("S", ImpactCategory::Cost, ["A"]))
        .unwrap();
    assert!(dir.path().join("S").join("S Cost Risks.csv").exists());
}

/// STO-02: sqlite backend creates the root and the database file
#[test]
fn test_sqlite_backend() {
    let dir = tempdir().unwrap();
    let root = dir.path().join("nested");
    let config = StorageConfig {
        root: Some(root.display().to_string()),
        backend: Some("sqlite".into()),
    };
    let store = open_store(&config).unwrap();
    store
        .write_table(&EstimateTable::blank("S", ImpactCategory::Cost, ["A"]))
        .unwrap();
    assert!(root.join("riskmodel.db").exists());
    assert!(store.location("S", &ImpactCategory::Cost).ends_with("::S Cost Risks"));
}

/// STO-03: unknown backend is a config error
#[test]
fn test_unknown_backend() {
    let config = StorageConfig {
        root: None,
        backend: Some("parquet".into()),
    };
    let err = match open_store(&config) {
        Ok(_) => panic!("unknown backend accepted"),
        Err(e) => e,
    };
    assert!(matches!(err, SystemError::Config(_)));
    assert_eq!(err.error_code(), "CONFIG_ERROR");
}
