//! Top-level riskmodel configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{FitConfig, SamplingConfig, StorageConfig};
use crate::constants::PROJECT_CONFIG_FILE;
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Programmatic overrides (`ConfigOverrides`)
/// 2. Environment variables (`RISKMODEL_*`)
/// 3. Project config (`riskmodel.toml` in the project root)
/// 4. User config (`~/.riskmodel/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct RiskModelConfig {
    pub sampling: SamplingConfig,
    pub fit: FitConfig,
    pub storage: StorageConfig,
}

/// Overrides applied after every file and environment layer.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub draws: Option<usize>,
    pub chains: Option<usize>,
    pub seed: Option<u64>,
    pub storage_root: Option<String>,
    pub storage_backend: Option<String>,
}

impl RiskModelConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        ::tracing::warn!(
                            path = %user_config_path.display(),
                            error = %e,
                            "ignoring unreadable user config"
                        );
                    }
                }
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): programmatic overrides
        if let Some(o) = overrides {
            Self::apply_overrides(&mut config, o);
        }

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &RiskModelConfig) -> Result<(), ConfigError> {
        if config.sampling.draws == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "sampling.draws".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.sampling.chains == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "sampling.chains".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.fit.max_iterations == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "fit.max_iterations".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        for (field, value) in [
            ("fit.ftol", config.fit.ftol),
            ("fit.xtol", config.fit.xtol),
            ("fit.gtol", config.fit.gtol),
            ("fit.residual_tol", config.fit.residual_tol),
        ] {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    return Err(ConfigError::ValidationFailed {
                        field: field.to_string(),
                        message: "must be a positive finite number".to_string(),
                    });
                }
            }
        }
        config.storage.effective_backend()?;
        Ok(())
    }

    /// Returns the user config path: `~/.riskmodel/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".riskmodel").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    fn merge_toml_file(config: &mut RiskModelConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RiskModelConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut RiskModelConfig, other: &RiskModelConfig) {
        // Sampling
        if other.sampling.draws.is_some() {
            base.sampling.draws = other.sampling.draws;
        }
        if other.sampling.chains.is_some() {
            base.sampling.chains = other.sampling.chains;
        }
        if other.sampling.seed.is_some() {
            base.sampling.seed = other.sampling.seed;
        }

        // Fit
        if other.fit.max_iterations.is_some() {
            base.fit.max_iterations = other.fit.max_iterations;
        }
        if other.fit.ftol.is_some() {
            base.fit.ftol = other.fit.ftol;
        }
        if other.fit.xtol.is_some() {
            base.fit.xtol = other.fit.xtol;
        }
        if other.fit.gtol.is_some() {
            base.fit.gtol = other.fit.gtol;
        }
        if other.fit.residual_tol.is_some() {
            base.fit.residual_tol = other.fit.residual_tol;
        }

        // Storage
        if other.storage.root.is_some() {
            base.storage.root = other.storage.root.clone();
        }
        if other.storage.backend.is_some() {
            base.storage.backend = other.storage.backend.clone();
        }
    }

    /// Apply `RISKMODEL_*` environment variables. Unparseable values are ignored.
    fn apply_env_overrides(config: &mut RiskModelConfig) {
        if let Ok(val) = std::env::var("RISKMODEL_SAMPLING_DRAWS") {
            if let Ok(v) = val.parse::<usize>() {
                config.sampling.draws = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RISKMODEL_SAMPLING_CHAINS") {
            if let Ok(v) = val.parse::<usize>() {
                config.sampling.chains = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RISKMODEL_SAMPLING_SEED") {
            if let Ok(v) = val.parse::<u64>() {
                config.sampling.seed = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RISKMODEL_FIT_MAX_ITERATIONS") {
            if let Ok(v) = val.parse::<u32>() {
                config.fit.max_iterations = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RISKMODEL_STORAGE_ROOT") {
            config.storage.root = Some(val);
        }
        if let Ok(val) = std::env::var("RISKMODEL_STORAGE_BACKEND") {
            config.storage.backend = Some(val);
        }
    }

    fn apply_overrides(config: &mut RiskModelConfig, o: &ConfigOverrides) {
        if let Some(v) = o.draws {
            config.sampling.draws = Some(v);
        }
        if let Some(v) = o.chains {
            config.sampling.chains = Some(v);
        }
        if let Some(v) = o.seed {
            config.sampling.seed = Some(v);
        }
        if let Some(ref v) = o.storage_root {
            config.storage.root = Some(v.clone());
        }
        if let Some(ref v) = o.storage_backend {
            config.storage.backend = Some(v.clone());
        }
    }
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
