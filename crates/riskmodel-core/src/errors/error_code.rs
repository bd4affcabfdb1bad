//! RiskModelErrorCode trait for stable, machine-readable error codes.

/// Every error enum implements this to expose a structured code string
/// that callers can match on without parsing messages.
pub trait RiskModelErrorCode {
    /// Returns the error code string (e.g., "INVALID_ESTIMATE").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_ESTIMATE: &str = "INVALID_ESTIMATE";
pub const DEGENERATE_DISTRIBUTION: &str = "DEGENERATE_DISTRIBUTION";
pub const FIT_ERROR: &str = "FIT_ERROR";
pub const INVALID_SCHEME: &str = "INVALID_SCHEME";
pub const SCHEMA_ERROR: &str = "SCHEMA_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const MODEL_CONSTRUCTION_ERROR: &str = "MODEL_CONSTRUCTION_ERROR";
pub const INFERENCE_ERROR: &str = "INFERENCE_ERROR";
pub const CANCELLED: &str = "CANCELLED";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
