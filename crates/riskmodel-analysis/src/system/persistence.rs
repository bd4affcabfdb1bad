//! Estimate persistence for a DesignSystem.
//!
//! One table per category, named `<system> <category> Risks`, with one row
//! per risk. The storage medium belongs to the `EstimateStore`.

use tracing::info;

use riskmodel_core::errors::StorageError;
use riskmodel_core::traits::EstimateStore;
use riskmodel_core::types::{EstimateTable, ThreePointEstimate};

use super::DesignSystem;
use crate::risk::Risk;

impl DesignSystem {
    /// Write one all-zero table per category, one row per risk.
    /// Overwrites existing tables.
    pub fn initialize_persistence<S>(&self, store: &S) -> Result<(), StorageError>
    where
        S: EstimateStore + ?Sized,
    {
        for (category, _) in self.slots() {
            let table = EstimateTable::blank(
                self.name.as_str(),
                category,
                self.risks.iter().map(Risk::name),
            );
            store.write_table(&table)?;
            info!(
                system = %self.name,
                category = %table.category,
                row_count = table.len(),
                "blank estimate table written"
            );
        }
        Ok(())
    }

    /// Write the current estimates of every risk.
    pub fn save_persistence<S>(&self, store: &S) -> Result<(), StorageError>
    where
        S: EstimateStore + ?Sized,
    {
        for (category, slot) in self.slots() {
            let mut table = EstimateTable::new(self.name.as_str(), category);
            for risk in &self.risks {
                let estimate = slot.get(risk).ok_or_else(|| StorageError::Malformed {
                    table: table.name(),
                    message: format!("risk '{}' has no estimate for this category", risk.name()),
                })?;
                table.push(risk.name(), estimate);
            }
            store.write_table(&table)?;
            info!(
                system = %self.name,
                category = %table.category,
                row_count = table.len(),
                "estimate table saved"
            );
        }
        Ok(())
    }

    /// Read every category table and assign each risk's estimates.
    ///
    /// Technical estimates are assigned by slot, so loading twice gives the
    /// same result. All tables are read and checked before any risk is
    /// changed; on error the system is left as it was.
    pub fn load_persistence<S>(&mut self, store: &S) -> Result<(), StorageError>
    where
        S: EstimateStore + ?Sized,
    {
        let mut resolved: Vec<(super::Slot, Vec<ThreePointEstimate>)> = Vec::new();
        for (category, slot) in self.slots() {
            let table = store.read_table(&self.name, &category)?;
            table.check_unique()?;
            let estimates = self
                .risks
                .iter()
                .map(|risk| table.estimate_for(risk.name()))
                .collect::<Result<Vec<_>, _>>()?;
            info!(
                system = %self.name,
                category = %category,
                row_count = table.len(),
                "estimate table loaded"
            );
            resolved.push((slot, estimates));
        }

        for (slot, estimates) in resolved {
            for (risk, estimate) in self.risks.iter_mut().zip(estimates) {
                slot.set(risk, estimate);
            }
        }
        Ok(())
    }
}
