//! # riskmodel-core
//!
//! Shared foundation for the riskmodel workspace: error enums, layered
//! configuration, tracing setup, compiled defaults, the estimate table schema,
//! and the persistence trait implemented by `riskmodel-storage`.

pub mod config;
pub mod constants;
pub mod errors;
pub mod tracing;
pub mod traits;
pub mod types;
