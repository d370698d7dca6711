use serde::Serialize;

use crate::domain::tenant::{BillingPlan, Tenant};
use crate::domain::types::{TenantId, TenantName};
use crate::domain::user::User;

/// Tenant fields visible to its users.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct TenantDto {
    pub id: TenantId,
    pub name: TenantName,
    pub plan: BillingPlan,
    pub onboarding_completed: bool,
}

impl From<&Tenant> for TenantDto {
    fn from(tenant: &Tenant) -> Self {
        Self {
            id: tenant.id,
            name: tenant.name.clone(),
            plan: tenant.plan,
            onboarding_completed: tenant.onboarding_completed,
        }
    }
}

/// Issued on successful login or registration.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: User,
    pub tenant: TenantDto,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub user: User,
    pub tenant: TenantDto,
    pub onboarding_completed: bool,
}
