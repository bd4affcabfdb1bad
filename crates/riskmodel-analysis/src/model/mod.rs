//! Generative model: named random and deterministic nodes, and the samples
//! an inference engine draws from them.

pub mod graph;
pub mod samples;

pub use graph::{ModelBuilder, ModelGraph, Node, NodeId, NodeKind};
pub use samples::{SampleSet, VariableSummary};
