//! Error handling for riskmodel.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod estimate_error;
pub mod fit_error;
pub mod inference_error;
pub mod model_error;
pub mod storage_error;
pub mod system_error;
pub mod utility_error;

pub use config_error::ConfigError;
pub use error_code::RiskModelErrorCode;
pub use estimate_error::EstimateError;
pub use fit_error::FitError;
pub use inference_error::InferenceError;
pub use model_error::ModelError;
pub use storage_error::StorageError;
pub use system_error::SystemError;
pub use utility_error::UtilityError;
