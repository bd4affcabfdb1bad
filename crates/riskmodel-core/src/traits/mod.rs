//! Seams between the analysis core and its collaborators.

pub mod estimate_store;

pub use estimate_store::EstimateStore;
