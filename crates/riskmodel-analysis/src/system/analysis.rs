//! System model assembly and analysis.

use serde::{Deserialize, Serialize};
use tracing::info;

use riskmodel_core::errors::{ModelError, SystemError};
use riskmodel_core::traits::EstimateStore;
use riskmodel_core::types::ImpactCategory;

use super::DesignSystem;
use crate::engine::InferenceEngine;
use crate::model::{ModelBuilder, ModelGraph, NodeId, SampleSet};
use crate::utility::UtilityMode;

/// Expected total impact of one category and its severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySeverity {
    pub category: ImpactCategory,
    /// Sample mean of `Total <category> Impact`.
    pub expected_impact: f64,
    pub discrete_utility: f64,
    pub logistic_utility: f64,
    pub level: String,
}

impl DesignSystem {
    /// Assemble the system model.
    ///
    /// Registers, for every risk, the cost, schedule, and technical impact
    /// distributions, then one total per category:
    /// `Total <category> Impact = Σ likelihood_i · impact_i`.
    ///
    /// The totals are expectation-weighted sums, not Bernoulli-gated
    /// mixtures: each impact contributes its full distribution scaled by
    /// the risk's likelihood.
    pub fn build_model(&self) -> Result<ModelGraph, ModelError> {
        let mut builder = ModelBuilder::new();
        let likelihoods: Vec<f64> = self.risks.iter().map(|r| r.baseline_likelihood()).collect();
        let labels = self.technical_labels();

        let cost = self
            .risks
            .iter()
            .map(|r| r.cost_distribution(&mut builder))
            .collect::<Result<Vec<_>, _>>()?;
        let schedule = self
            .risks
            .iter()
            .map(|r| r.schedule_distribution(&mut builder))
            .collect::<Result<Vec<_>, _>>()?;
        let technical = self
            .risks
            .iter()
            .map(|r| r.technical_distributions(&mut builder, &labels))
            .collect::<Result<Vec<_>, _>>()?;

        let weighted = |ids: Vec<NodeId>| -> Vec<(f64, NodeId)> {
            likelihoods.iter().copied().zip(ids).collect()
        };

        builder.weighted_sum(ImpactCategory::Cost.total_name(), weighted(cost))?;
        builder.weighted_sum(ImpactCategory::Schedule.total_name(), weighted(schedule))?;

        // risk-major -> dimension-major
        for (d, label) in labels.iter().enumerate() {
            let column: Vec<NodeId> = technical.iter().map(|per_risk| per_risk[d]).collect();
            builder.weighted_sum(
                ImpactCategory::Technical(label.clone()).total_name(),
                weighted(column),
            )?;
        }

        let graph = builder.build();
        info!(
            system = %self.name,
            risk_count = self.risks.len(),
            node_count = graph.len(),
            "system model built"
        );
        Ok(graph)
    }

    /// Build the model and sample it with `engine`. Engine failures come
    /// back as `ModelError::Inference`.
    pub fn build_and_analyze<E>(&self, engine: &E) -> Result<SampleSet, ModelError>
    where
        E: InferenceEngine + ?Sized,
    {
        let graph = self.build_model()?;
        let samples = engine.sample(&graph)?;
        info!(
            system = %self.name,
            engine = engine.name(),
            total_draws = samples.total_draws(),
            "system analyzed"
        );
        Ok(samples)
    }

    /// Load estimates from `store`, then build and sample the model.
    pub fn load_and_analyze<S, E>(&mut self, store: &S, engine: &E) -> Result<SampleSet, SystemError>
    where
        S: EstimateStore + ?Sized,
        E: InferenceEngine + ?Sized,
    {
        self.load_persistence(store)?;
        Ok(self.build_and_analyze(engine)?)
    }

    /// Map the expected total of every category through its utility curve.
    /// Categories whose total is absent from `samples` are skipped.
    pub fn severity_summary(&self, samples: &SampleSet) -> Vec<CategorySeverity> {
        self.categories()
            .into_iter()
            .filter_map(|category| {
                let curve = self.curve(&category)?;
                let expected_impact = samples.mean(&category.total_name())?;
                Some(CategorySeverity {
                    expected_impact,
                    discrete_utility: curve.evaluate_one(expected_impact, UtilityMode::Discrete),
                    logistic_utility: curve.evaluate_one(expected_impact, UtilityMode::Logistic(None)),
                    level: curve.level_name(expected_impact).to_string(),
                    category,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskmodel_core::config::SeverityScheme;
    use riskmodel_core::types::ThreePointEstimate;

    use crate::risk::Risk;
    use crate::utility::UtilityCurve;

    fn curve(name: &str) -> UtilityCurve {
        UtilityCurve::new(SeverityScheme::named(name, "")).unwrap()
    }

    fn bridge() -> DesignSystem {
        let corrosion = Risk::new("Corrosion", 0.3)
            .unwrap()
            .with_schedule(ThreePointEstimate::new(1.0, 2.0, 4.0))
            .with_cost(ThreePointEstimate::new(10.0, 20.0, 50.0))
            .with_technical(vec![ThreePointEstimate::new(0.0, 1.0, 2.0)]);
        let delay = Risk::new("Delay", 0.5)
            .unwrap()
            .with_schedule(ThreePointEstimate::new(0.0, 1.0, 3.0))
            .with_cost(ThreePointEstimate::new(0.0, 5.0, 15.0))
            .with_technical(vec![ThreePointEstimate::new(1.0, 2.0, 6.0)]);
        DesignSystem::new(
            "Bridge",
            vec![corrosion, delay],
            curve("Schedule"),
            curve("Cost"),
            vec![curve("Weight")],
        )
        .unwrap()
    }

    #[test]
    fn test_model_has_named_totals() {
        let graph = bridge().build_model().unwrap();
        for name in [
            "Total Cost Impact",
            "Total Schedule Impact",
            "Total Weight Impact",
            "Corrosion Cost Impact",
            "Delay Weight Scaled Impact",
        ] {
            assert!(graph.id(name).is_some(), "missing node {name}");
        }
        // 2 risks x 3 categories x 2 nodes + 3 totals
        assert_eq!(graph.len(), 15);
    }

    #[test]
    fn test_totals_are_likelihood_weighted() {
        let graph = bridge().build_model().unwrap();
        let values = graph.evaluate(|_, _| 0.5);
        let at = |name: &str| values[graph.id(name).unwrap().index()];
        let expected = 0.3 * at("Corrosion Cost Impact") + 0.5 * at("Delay Cost Impact");
        assert!((at("Total Cost Impact") - expected).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_estimate_fails_model() {
        let mut system = bridge();
        system.risk_mut("Delay").unwrap().cost = ThreePointEstimate::zero();
        let err = system.build_model().unwrap_err();
        assert!(matches!(err, ModelError::Risk { ref risk, ref category, .. } if risk == "Delay" && category == "Cost"));
    }

    #[test]
    fn test_empty_system_totals_are_zero() {
        let system = DesignSystem::new("Empty", Vec::new(), curve("Schedule"), curve("Cost"), Vec::new())
            .unwrap();
        let graph = system.build_model().unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.evaluate(|_, _| 0.0), vec![0.0, 0.0]);
    }
}
