//! Shared value types: impact categories, three-point estimates, and the
//! persisted estimate table schema.

pub mod category;
pub mod collections;
pub mod estimate;
pub mod estimate_table;

pub use category::ImpactCategory;
pub use estimate::ThreePointEstimate;
pub use estimate_table::{EstimateRow, EstimateTable};
