//! Forward (ancestral) sampling.
//!
//! The model has no observed data, so the posterior is the prior and exact
//! draws come from sampling each Beta node and evaluating the deterministic
//! nodes. Chains run in parallel; chain `i` uses `StdRng` seeded with
//! `seed + i`, so a seeded run is reproducible regardless of scheduling.

use std::time::Instant;

use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use statrs::distribution::Beta;
use tracing::info;

use riskmodel_core::config::SamplingConfig;
use riskmodel_core::errors::InferenceError;

use super::InferenceEngine;
use crate::model::{ModelGraph, NodeKind, SampleSet};

/// Parallel ancestral sampler.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardSampler {
    /// Draws per chain.
    draws: usize,
    chains: usize,
    /// Base seed (None = entropy-seeded).
    seed: Option<u64>,
}

impl ForwardSampler {
    pub fn new(draws: usize, chains: usize) -> Self {
        Self {
            draws: draws.max(1),
            chains: chains.max(1),
            seed: None,
        }
    }

    /// Set a deterministic base seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_config(config: &SamplingConfig) -> Self {
        let sampler = Self::new(config.effective_draws(), config.effective_chains());
        match config.seed {
            Some(seed) => sampler.with_seed(seed),
            None => sampler,
        }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    pub fn chains(&self) -> usize {
        self.chains
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    fn run_chain(&self, model: &ModelGraph, betas: &[Option<Beta>], seed: u64) -> SampleSet {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut set = SampleSet::for_graph(model);
        for _ in 0..self.draws {
            let values = model.evaluate(|id, _| {
                betas[id.index()]
                    .as_ref()
                    .map_or(f64::NAN, |b| b.sample(&mut rng))
            });
            set.push_draw(&values);
        }
        set
    }
}

impl Default for ForwardSampler {
    fn default() -> Self {
        Self::from_config(&SamplingConfig::default())
    }
}

impl InferenceEngine for ForwardSampler {
    fn name(&self) -> &str {
        "forward"
    }

    fn sample(&self, model: &ModelGraph) -> Result<SampleSet, InferenceError> {
        let betas = model
            .nodes()
            .iter()
            .map(|node| match node.kind {
                NodeKind::Beta { alpha, beta } => Beta::new(alpha, beta).map(Some).map_err(|e| {
                    InferenceError::InvalidModel {
                        message: format!("node '{}': {e}", node.name),
                    }
                }),
                _ => Ok(None),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let base_seed = self.seed.unwrap_or_else(rand::random);
        let start = Instant::now();

        let chains: Vec<SampleSet> = (0..self.chains)
            .into_par_iter()
            .map(|chain| self.run_chain(model, &betas, base_seed.wrapping_add(chain as u64)))
            .collect();

        let samples = SampleSet::concat_chains(chains).ok_or_else(|| {
            InferenceError::EngineFailure {
                engine: self.name().to_string(),
                message: "no chains produced".to_string(),
            }
        })?;

        info!(
            node_count = model.len(),
            total_draws = samples.total_draws(),
            sample_time_ms = start.elapsed().as_millis() as u64,
            "forward sampling complete"
        );
        Ok(samples)
    }
}
