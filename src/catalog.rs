//! financing-options catalog
//!
//! the catalog maps a term in months to a flat interest rate. it is supplied
//! explicitly at every call site rather than looked up through ambient state;
//! `FinancingCatalog::default()` is the hardcoded fallback used when the
//! admin-configured catalog is unavailable.

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::decimal::Rate;
use crate::errors::{PlanError, Result};

/// a single financing plan: flat rate applied once to the financed balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingPlan {
    pub rate: Rate,
    pub label: String,
}

impl FinancingPlan {
    pub fn new(rate: Rate, label: impl Into<String>) -> Self {
        Self {
            rate,
            label: label.into(),
        }
    }
}

/// catalog of financing plans keyed by term in months
///
/// key 0 always exists with rate 0 and means "no financing / pay in full".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingCatalog {
    plans: BTreeMap<u32, FinancingPlan>,
}

impl FinancingCatalog {
    /// catalog containing only the mandatory "pay in full" entry
    pub fn empty() -> Self {
        let mut plans = BTreeMap::new();
        plans.insert(0, FinancingPlan::new(Rate::ZERO, "Sin financiación"));
        Self { plans }
    }

    pub fn get(&self, term_months: u32) -> Option<&FinancingPlan> {
        self.plans.get(&term_months)
    }

    pub fn rate_for(&self, term_months: u32) -> Option<Rate> {
        self.plans.get(&term_months).map(|p| p.rate)
    }

    pub fn contains(&self, term_months: u32) -> bool {
        self.plans.contains_key(&term_months)
    }

    /// add or replace a plan; the key-0 entry cannot be redefined
    pub fn insert(&mut self, term_months: u32, plan: FinancingPlan) -> Result<()> {
        if term_months == 0 {
            return Err(PlanError::InvalidConfiguration {
                message: "plan 0 (pay in full) is fixed and cannot be redefined".to_string(),
            });
        }
        self.plans.insert(term_months, plan);
        Ok(())
    }

    /// remove a plan; the key-0 entry cannot be removed
    pub fn remove(&mut self, term_months: u32) -> Result<Option<FinancingPlan>> {
        if term_months == 0 {
            return Err(PlanError::InvalidConfiguration {
                message: "plan 0 (pay in full) is fixed and cannot be removed".to_string(),
            });
        }
        Ok(self.plans.remove(&term_months))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&u32, &FinancingPlan)> {
        self.plans.iter()
    }

    pub fn terms(&self) -> impl Iterator<Item = u32> + '_ {
        self.plans.keys().copied()
    }
}

impl Default for FinancingCatalog {
    /// hardcoded fallback catalog
    fn default() -> Self {
        let mut catalog = Self::empty();
        for (term, rate, label) in [
            (3, dec!(0.05), "3 cuotas"),
            (6, dec!(0.08), "6 cuotas"),
            (9, dec!(0.10), "9 cuotas"),
            (12, dec!(0.12), "12 cuotas"),
            (18, dec!(0.16), "18 cuotas"),
            (24, dec!(0.20), "24 cuotas"),
        ] {
            catalog
                .plans
                .insert(term, FinancingPlan::new(Rate::from_decimal(rate), label));
        }
        catalog
    }
}
