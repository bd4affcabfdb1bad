//! Posterior/prior samples keyed by node name.

use serde::{Deserialize, Serialize};
use statrs::statistics::{Data, OrderStatistics, Statistics};

use riskmodel_core::types::collections::FxHashMap;

use super::graph::ModelGraph;

/// Summary statistics of one sampled variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VariableSummary {
    pub mean: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
    pub p10: f64,
    pub p50: f64,
    pub p90: f64,
}

/// Draws for every model variable, stored chain-major per variable.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSet {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
    values: Vec<Vec<f64>>,
    chains: usize,
}

impl SampleSet {
    /// Empty set for the given variable names and a single chain.
    pub fn new(names: Vec<String>) -> Self {
        let index = names
            .iter()
            .enumerate()
            .map(|(i, n)| (n.clone(), i))
            .collect();
        let values = vec![Vec::new(); names.len()];
        Self {
            names,
            index,
            values,
            chains: 1,
        }
    }

    /// Empty set covering every node of `graph`.
    pub fn for_graph(graph: &ModelGraph) -> Self {
        Self::new(graph.names().map(str::to_string).collect())
    }

    /// Append one joint draw, one value per variable in name order.
    pub fn push_draw(&mut self, draw: &[f64]) {
        for (column, &value) in self.values.iter_mut().zip(draw) {
            column.push(value);
        }
    }

    /// Concatenate per-chain sets with identical variables.
    pub fn concat_chains(chains: Vec<SampleSet>) -> Option<Self> {
        let mut iter = chains.into_iter();
        let mut merged = iter.next()?;
        for chain in iter {
            if chain.names != merged.names {
                return None;
            }
            for (column, more) in merged.values.iter_mut().zip(chain.values) {
                column.extend(more);
            }
            merged.chains += chain.chains;
        }
        Some(merged)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn chains(&self) -> usize {
        self.chains
    }

    /// Draws per variable, across all chains.
    pub fn total_draws(&self) -> usize {
        self.values.first().map_or(0, Vec::len)
    }

    pub fn draws_per_chain(&self) -> usize {
        self.total_draws() / self.chains.max(1)
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        self.index.get(name).map(|&i| self.values[i].as_slice())
    }

    /// Draws of `name` from one chain.
    pub fn chain(&self, name: &str, chain: usize) -> Option<&[f64]> {
        let all = self.get(name)?;
        let per = self.draws_per_chain();
        all.get(chain * per..(chain + 1) * per)
    }

    pub fn mean(&self, name: &str) -> Option<f64> {
        let values = self.get(name)?;
        if values.is_empty() {
            return None;
        }
        Some(Statistics::mean(values))
    }

    /// Mean, standard deviation, range, and P10/P50/P90.
    pub fn summary(&self, name: &str) -> Option<VariableSummary> {
        let values = self.get(name)?;
        if values.is_empty() {
            return None;
        }
        let mut data = Data::new(values.to_vec());
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let std_dev = if values.len() > 1 {
            Statistics::std_dev(values)
        } else {
            0.0
        };
        Some(VariableSummary {
            mean: Statistics::mean(values),
            std_dev,
            min,
            max,
            p10: data.percentile(10),
            p50: data.percentile(50),
            p90: data.percentile(90),
        })
    }

    /// Constant set: every variable holds `draws` copies of its value.
    /// Used by deterministic engines and tests.
    pub fn from_values(names: Vec<String>, values: &[f64], draws: usize) -> Self {
        let mut set = Self::new(names);
        for _ in 0..draws {
            set.push_draw(values);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(n: &[&str]) -> Vec<String> {
        n.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_push_and_get() {
        let mut s = SampleSet::new(names(&["a", "b"]));
        s.push_draw(&[1.0, 10.0]);
        s.push_draw(&[3.0, 30.0]);
        assert_eq!(s.get("a"), Some(&[1.0, 3.0][..]));
        assert_eq!(s.mean("b"), Some(20.0));
        assert!(s.get("c").is_none());
    }

    #[test]
    fn test_concat_chains() {
        let a = SampleSet::from_values(names(&["x"]), &[1.0], 3);
        let b = SampleSet::from_values(names(&["x"]), &[2.0], 3);
        let merged = SampleSet::concat_chains(vec![a, b]).unwrap();
        assert_eq!(merged.chains(), 2);
        assert_eq!(merged.total_draws(), 6);
        assert_eq!(merged.chain("x", 1), Some(&[2.0, 2.0, 2.0][..]));
    }

    #[test]
    fn test_concat_mismatched_names() {
        let a = SampleSet::from_values(names(&["x"]), &[1.0], 1);
        let b = SampleSet::from_values(names(&["y"]), &[2.0], 1);
        assert!(SampleSet::concat_chains(vec![a, b]).is_none());
    }

    #[test]
    fn test_summary_percentiles_ordered() {
        let mut s = SampleSet::new(names(&["v"]));
        for i in 0..101 {
            s.push_draw(&[f64::from(i)]);
        }
        let summary = s.summary("v").unwrap();
        assert_eq!(summary.min, 0.0);
        assert_eq!(summary.max, 100.0);
        assert!((summary.mean - 50.0).abs() < 1e-12);
        assert!(summary.p10 < summary.p50 && summary.p50 < summary.p90);
        assert!((summary.p50 - 50.0).abs() < 1.0);
    }
}
