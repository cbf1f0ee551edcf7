use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A fixed-term, fixed-rate investment plan offering
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub name: String,
    /// Daily return on investment, in percent
    pub daily_rate: Decimal,
    pub duration_days: i64,
    pub minimum_amount: Decimal,
}

lazy_static! {
    static ref DEFAULT_PLANS: Vec<Plan> = vec![
        Plan {
            name: "Basic".to_string(),
            daily_rate: dec!(1.0),
            duration_days: 30,
            minimum_amount: dec!(100),
        },
        Plan {
            name: "Pro".to_string(),
            daily_rate: dec!(1.5),
            duration_days: 60,
            minimum_amount: dec!(500),
        },
        Plan {
            name: "Elite".to_string(),
            daily_rate: dec!(2.0),
            duration_days: 90,
            minimum_amount: dec!(1000),
        },
    ];
}

/// Immutable catalog of available plans, injected into services at
/// construction time so tests can substitute alternate tables.
#[derive(Debug, Clone)]
pub struct PlanCatalog {
    plans: Vec<Plan>,
}

impl PlanCatalog {
    pub fn new(plans: Vec<Plan>) -> Self {
        PlanCatalog { plans }
    }

    /// Looks up a plan by name, case-insensitively. The returned plan carries
    /// the canonical catalog casing.
    pub fn get(&self, name: &str) -> Option<&Plan> {
        self.plans
            .iter()
            .find(|plan| plan.name.eq_ignore_ascii_case(name))
    }

    pub fn plans(&self) -> &[Plan] {
        &self.plans
    }
}

impl Default for PlanCatalog {
    fn default() -> Self {
        PlanCatalog::new(DEFAULT_PLANS.clone())
    }
}
