//! riskmodel-analysis: PERT-Beta impact distributions, utility curves,
//! least-squares fitting, the generative model graph, sampling engines,
//! and system-level risk aggregation.

pub mod engine;
pub mod model;
pub mod optimize;
pub mod pert;
pub mod risk;
pub mod system;
pub mod utility;

pub use engine::{ForwardSampler, InferenceEngine};
pub use model::{ModelBuilder, ModelGraph, NodeId, NodeKind, SampleSet, VariableSummary};
pub use pert::PertBeta;
pub use risk::Risk;
pub use system::{CategorySeverity, DesignSystem};
pub use utility::{LogisticParams, UtilityCurve, UtilityMode, UtilityPoint};
