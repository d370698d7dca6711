use serde::Serialize;

use crate::domain::tenant::BillingPlan;

/// Pricing card rendered on the marketing pages.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct PlanCard {
    pub id: BillingPlan,
    pub title: &'static str,
    pub monthly_price: u32,
    pub features: &'static [&'static str],
}

impl From<BillingPlan> for PlanCard {
    fn from(plan: BillingPlan) -> Self {
        Self {
            id: plan,
            title: plan.title(),
            monthly_price: plan.monthly_price(),
            features: plan.features(),
        }
    }
}
