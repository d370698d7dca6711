use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::onboarding::OnboardingState;
use crate::domain::types::{TenantId, TenantName};

text_enum!(
    /// Subscription plan chosen during onboarding.
    BillingPlan {
        Free => "free",
        Starter => "starter",
        Professional => "professional",
        Enterprise => "enterprise",
    }
);

impl BillingPlan {
    pub const fn title(self) -> &'static str {
        match self {
            BillingPlan::Free => "Free",
            BillingPlan::Starter => "Starter",
            BillingPlan::Professional => "Professional",
            BillingPlan::Enterprise => "Enterprise",
        }
    }

    /// Monthly price per workspace in whole dollars.
    pub const fn monthly_price(self) -> u32 {
        match self {
            BillingPlan::Free => 0,
            BillingPlan::Starter => 29,
            BillingPlan::Professional => 79,
            BillingPlan::Enterprise => 199,
        }
    }

    pub const fn features(self) -> &'static [&'static str] {
        match self {
            BillingPlan::Free => &["Up to 2 users", "Contacts and companies", "Basic dashboard"],
            BillingPlan::Starter => &[
                "Up to 10 users",
                "Deal pipeline",
                "Activity tracking",
                "CSV import",
            ],
            BillingPlan::Professional => &[
                "Unlimited users",
                "All dashboard tools",
                "Revenue forecasting",
            ],
            BillingPlan::Enterprise => &[
                "Everything in Professional",
                "Dedicated onboarding",
                "Priority support",
            ],
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Tenant {
    pub id: TenantId,
    pub name: TenantName,
    pub plan: BillingPlan,
    pub onboarding: OnboardingState,
    pub onboarding_completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug)]
pub struct NewTenant {
    pub name: TenantName,
    pub plan: BillingPlan,
    pub onboarding: OnboardingState,
}

impl NewTenant {
    #[must_use]
    pub fn new(name: TenantName) -> Self {
        Self {
            name,
            plan: BillingPlan::Free,
            onboarding: OnboardingState::default(),
        }
    }
}

/// Full replacement of the mutable tenant columns, used by onboarding.
#[derive(Clone, Debug)]
pub struct UpdateTenant {
    pub name: TenantName,
    pub plan: BillingPlan,
    pub onboarding: OnboardingState,
}

impl From<&Tenant> for UpdateTenant {
    fn from(tenant: &Tenant) -> Self {
        Self {
            name: tenant.name.clone(),
            plan: tenant.plan,
            onboarding: tenant.onboarding.clone(),
        }
    }
}
