//! Inference engines: anything that turns a `ModelGraph` into samples.

pub mod forward;

pub use forward::ForwardSampler;

use riskmodel_core::errors::InferenceError;

use crate::model::{ModelGraph, SampleSet};

/// Draws joint samples of every node in a model graph.
///
/// Implementations must return one sample column per node, keyed by the
/// node's registered name.
pub trait InferenceEngine: Send + Sync {
    /// Engine name for diagnostics.
    fn name(&self) -> &str;

    fn sample(&self, model: &ModelGraph) -> Result<SampleSet, InferenceError>;
}
