//! A single risk: baseline likelihood plus three-point impact estimates for
//! schedule, cost, and each technical dimension.

use riskmodel_core::errors::{EstimateError, ModelError};
use riskmodel_core::types::{ImpactCategory, ThreePointEstimate};

use crate::model::{ModelBuilder, NodeId};
use crate::pert::PertBeta;

#[derive(Debug, Clone, PartialEq)]
pub struct Risk {
    name: String,
    baseline_likelihood: f64,
    pub schedule: ThreePointEstimate,
    pub cost: ThreePointEstimate,
    /// One estimate per technical dimension of the owning system, in the
    /// system's dimension order.
    pub technical: Vec<ThreePointEstimate>,
}

impl Risk {
    /// A risk with placeholder estimates and no technical dimensions.
    ///
    /// `baseline_likelihood` must lie within [0, 1].
    pub fn new(name: impl Into<String>, baseline_likelihood: f64) -> Result<Self, EstimateError> {
        let name = name.into();
        if !(0.0..=1.0).contains(&baseline_likelihood) {
            return Err(EstimateError::InvalidLikelihood {
                risk: name,
                likelihood: baseline_likelihood,
            });
        }
        Ok(Self {
            name,
            baseline_likelihood,
            schedule: ThreePointEstimate::default(),
            cost: ThreePointEstimate::default(),
            technical: Vec::new(),
        })
    }

    pub fn with_schedule(mut self, estimate: ThreePointEstimate) -> Self {
        self.schedule = estimate;
        self
    }

    pub fn with_cost(mut self, estimate: ThreePointEstimate) -> Self {
        self.cost = estimate;
        self
    }

    pub fn with_technical(mut self, estimates: Vec<ThreePointEstimate>) -> Self {
        self.technical = estimates;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn baseline_likelihood(&self) -> f64 {
        self.baseline_likelihood
    }

    /// PERT distribution of the schedule impact.
    pub fn schedule_pert(&self) -> Result<PertBeta, EstimateError> {
        PertBeta::from_estimate(&self.schedule)
    }

    /// PERT distribution of the cost impact.
    pub fn cost_pert(&self) -> Result<PertBeta, EstimateError> {
        PertBeta::from_estimate(&self.cost)
    }

    /// Register the cost impact; returns the rescaled impact node.
    pub fn cost_distribution(&self, builder: &mut ModelBuilder) -> Result<NodeId, ModelError> {
        self.register_impact(builder, &ImpactCategory::Cost, &self.cost)
    }

    /// Register the schedule impact; returns the rescaled impact node.
    pub fn schedule_distribution(&self, builder: &mut ModelBuilder) -> Result<NodeId, ModelError> {
        self.register_impact(builder, &ImpactCategory::Schedule, &self.schedule)
    }

    /// Register one impact per technical dimension, in dimension order.
    /// `labels` name the dimensions and must match them in count.
    pub fn technical_distributions(
        &self,
        builder: &mut ModelBuilder,
        labels: &[String],
    ) -> Result<Vec<NodeId>, ModelError> {
        if labels.len() != self.technical.len() {
            return Err(ModelError::DimensionMismatch {
                risk: self.name.clone(),
                expected: labels.len(),
                found: self.technical.len(),
            });
        }
        labels
            .iter()
            .zip(&self.technical)
            .map(|(label, estimate)| {
                self.register_impact(builder, &ImpactCategory::Technical(label.clone()), estimate)
            })
            .collect()
    }

    fn register_impact(
        &self,
        builder: &mut ModelBuilder,
        category: &ImpactCategory,
        estimate: &ThreePointEstimate,
    ) -> Result<NodeId, ModelError> {
        let pert = PertBeta::from_estimate(estimate).map_err(|source| ModelError::Risk {
            risk: self.name.clone(),
            category: category.label().to_string(),
            source,
        })?;
        let [scaled_name, impact_name] = impact_node_names(&self.name, category);
        let scaled = builder.beta(scaled_name, pert.alpha(), pert.beta())?;
        builder.affine(
            impact_name,
            scaled,
            pert.scale(),
            pert.offset(),
        )
    }
}

/// Model node names of one risk's impact in `category`: the standard Beta
/// draw, then the rescaled impact.
pub(crate) fn impact_node_names(risk: &str, category: &ImpactCategory) -> [String; 2] {
    let label = category.label();
    [
        format!("{risk} {label} Scaled Impact"),
        format!("{risk} {label} Impact"),
    ]
}
