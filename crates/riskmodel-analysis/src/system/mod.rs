//! DesignSystem: the risks of one engineered system, the utility curve of
//! every impact category, estimate persistence, and the system model.

pub mod analysis;
pub mod persistence;

pub use analysis::CategorySeverity;

use riskmodel_core::errors::ModelError;
use riskmodel_core::types::collections::FxHashSet;
use riskmodel_core::types::{ImpactCategory, ThreePointEstimate};

use crate::risk::{impact_node_names, Risk};
use crate::utility::UtilityCurve;

/// Position of a category's estimate inside a `Risk`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Slot {
    Schedule,
    Cost,
    Technical(usize),
}

impl Slot {
    pub(crate) fn get(self, risk: &Risk) -> Option<ThreePointEstimate> {
        match self {
            Self::Schedule => Some(risk.schedule),
            Self::Cost => Some(risk.cost),
            Self::Technical(i) => risk.technical.get(i).copied(),
        }
    }

    pub(crate) fn set(self, risk: &mut Risk, estimate: ThreePointEstimate) {
        match self {
            Self::Schedule => risk.schedule = estimate,
            Self::Cost => risk.cost = estimate,
            Self::Technical(i) => {
                if risk.technical.len() <= i {
                    risk.technical.resize(i + 1, ThreePointEstimate::default());
                }
                risk.technical[i] = estimate;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct DesignSystem {
    name: String,
    risks: Vec<Risk>,
    schedule_curve: UtilityCurve,
    cost_curve: UtilityCurve,
    technical_curves: Vec<UtilityCurve>,
}

impl DesignSystem {
    /// Assemble a system.
    ///
    /// Risk names must be unique, and technical curve names must be unique
    /// and distinct from "Schedule" and "Cost". The model node names the
    /// system will generate must not collide either: a risk named "Total"
    /// would shadow the category totals. Each risk's technical
    /// estimates are sized to the technical curves: an empty list is filled
    /// with placeholders, any other length mismatch is rejected.
    pub fn new(
        name: impl Into<String>,
        mut risks: Vec<Risk>,
        schedule_curve: UtilityCurve,
        cost_curve: UtilityCurve,
        technical_curves: Vec<UtilityCurve>,
    ) -> Result<Self, ModelError> {
        let mut seen = FxHashSet::default();
        for risk in &risks {
            if !seen.insert(risk.name()) {
                return Err(ModelError::DuplicateRisk {
                    name: risk.name().to_string(),
                });
            }
        }

        let mut labels: FxHashSet<&str> = ["Schedule", "Cost"].into_iter().collect();
        for curve in &technical_curves {
            if !labels.insert(curve.name()) {
                return Err(ModelError::DuplicateCategory {
                    name: curve.name().to_string(),
                });
            }
        }

        let categories: Vec<ImpactCategory> = [ImpactCategory::Schedule, ImpactCategory::Cost]
            .into_iter()
            .chain(
                technical_curves
                    .iter()
                    .map(|c| ImpactCategory::Technical(c.name().to_string())),
            )
            .collect();
        check_node_names(&risks, &categories)?;

        let dimensions = technical_curves.len();
        for risk in &mut risks {
            if risk.technical.is_empty() {
                risk.technical = vec![ThreePointEstimate::default(); dimensions];
            } else if risk.technical.len() != dimensions {
                return Err(ModelError::DimensionMismatch {
                    risk: risk.name().to_string(),
                    expected: dimensions,
                    found: risk.technical.len(),
                });
            }
        }

        Ok(Self {
            name: name.into(),
            risks,
            schedule_curve,
            cost_curve,
            technical_curves,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn risks(&self) -> &[Risk] {
        &self.risks
    }

    pub fn risk(&self, name: &str) -> Option<&Risk> {
        self.risks.iter().find(|r| r.name() == name)
    }

    pub fn risk_mut(&mut self, name: &str) -> Option<&mut Risk> {
        self.risks.iter_mut().find(|r| r.name() == name)
    }

    pub fn schedule_curve(&self) -> &UtilityCurve {
        &self.schedule_curve
    }

    pub fn cost_curve(&self) -> &UtilityCurve {
        &self.cost_curve
    }

    pub fn technical_curves(&self) -> &[UtilityCurve] {
        &self.technical_curves
    }

    /// Technical dimension labels in slot order.
    pub fn technical_labels(&self) -> Vec<String> {
        self.technical_curves
            .iter()
            .map(|c| c.name().to_string())
            .collect()
    }

    /// Every impact category: schedule, cost, then each technical dimension.
    pub fn categories(&self) -> Vec<ImpactCategory> {
        self.slots().into_iter().map(|(c, _)| c).collect()
    }

    /// Utility curve of `category`.
    pub fn curve(&self, category: &ImpactCategory) -> Option<&UtilityCurve> {
        match category {
            ImpactCategory::Schedule => Some(&self.schedule_curve),
            ImpactCategory::Cost => Some(&self.cost_curve),
            ImpactCategory::Technical(label) => {
                self.technical_curves.iter().find(|c| c.name() == label)
            }
        }
    }

    pub(crate) fn slots(&self) -> Vec<(ImpactCategory, Slot)> {
        let mut slots = vec![
            (ImpactCategory::Schedule, Slot::Schedule),
            (ImpactCategory::Cost, Slot::Cost),
        ];
        slots.extend(
            self.technical_curves
                .iter()
                .enumerate()
                .map(|(i, c)| (ImpactCategory::Technical(c.name().to_string()), Slot::Technical(i))),
        );
        slots
    }
}

/// Reject systems whose risk and category names would generate the same
/// model node twice.
fn check_node_names(risks: &[Risk], categories: &[ImpactCategory]) -> Result<(), ModelError> {
    let mut names: FxHashSet<String> = categories.iter().map(ImpactCategory::total_name).collect();
    for risk in risks {
        for category in categories {
            for name in impact_node_names(risk.name(), category) {
                if !names.insert(name.clone()) {
                    return Err(ModelError::DuplicateNode { name });
                }
            }
        }
    }
    Ok(())
}
