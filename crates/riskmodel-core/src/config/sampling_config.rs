//! Sampling configuration for inference engines.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_CHAINS, DEFAULT_DRAWS};

/// Draw counts and seed handed to an inference engine.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct SamplingConfig {
    /// Draws per chain. Default: 1000.
    pub draws: Option<usize>,
    /// Independent chains. Default: 4.
    pub chains: Option<usize>,
    /// Seed for reproducible runs. None = entropy-seeded.
    pub seed: Option<u64>,
}

impl SamplingConfig {
    pub fn effective_draws(&self) -> usize {
        self.draws.unwrap_or(DEFAULT_DRAWS)
    }

    pub fn effective_chains(&self) -> usize {
        self.chains.unwrap_or(DEFAULT_CHAINS)
    }
}
