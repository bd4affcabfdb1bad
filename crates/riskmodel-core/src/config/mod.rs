//! Configuration system for riskmodel.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod fit_config;
pub mod riskmodel_config;
pub mod sampling_config;
pub mod severity_config;
pub mod storage_config;

pub use fit_config::FitConfig;
pub use riskmodel_config::{ConfigOverrides, RiskModelConfig};
pub use sampling_config::SamplingConfig;
pub use severity_config::SeverityScheme;
pub use storage_config::{StorageBackend, StorageConfig};
