//! Diesel models for tenant organizations.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::onboarding::OnboardingState;
use crate::domain::tenant::{
    NewTenant as DomainNewTenant, Tenant as DomainTenant, UpdateTenant as DomainUpdateTenant,
};
use crate::domain::types::{TenantId, TenantName, TypeConstraintError};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::tenants)]
/// Diesel model for [`crate::domain::tenant::Tenant`].
pub struct Tenant {
    pub id: i32,
    pub name: String,
    pub plan: String,
    pub onboarding_state: String,
    pub onboarding_completed: bool,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tenants)]
/// Insertable form of [`Tenant`].
pub struct NewTenant<'a> {
    pub name: &'a str,
    pub plan: &'a str,
    pub onboarding_state: String,
    pub onboarding_completed: bool,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::tenants)]
/// Data used when updating a [`Tenant`] record.
pub struct UpdateTenant<'a> {
    pub name: &'a str,
    pub plan: &'a str,
    pub onboarding_state: String,
    pub onboarding_completed: bool,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Tenant> for DomainTenant {
    type Error = TypeConstraintError;

    fn try_from(tenant: Tenant) -> Result<Self, Self::Error> {
        Ok(Self {
            id: TenantId::new(tenant.id)?,
            name: TenantName::new(tenant.name)?,
            plan: tenant.plan.parse()?,
            onboarding: OnboardingState::from_json(&tenant.onboarding_state),
            onboarding_completed: tenant.onboarding_completed,
            created_at: tenant.created_at,
            updated_at: tenant.updated_at,
        })
    }
}

impl<'a> TryFrom<&'a DomainNewTenant> for NewTenant<'a> {
    type Error = serde_json::Error;

    fn try_from(tenant: &'a DomainNewTenant) -> Result<Self, Self::Error> {
        Ok(Self {
            name: tenant.name.as_str(),
            plan: tenant.plan.as_str(),
            onboarding_state: tenant.onboarding.to_json()?,
            onboarding_completed: tenant.onboarding.is_completed(),
        })
    }
}

impl<'a> UpdateTenant<'a> {
    pub fn try_new(
        tenant: &'a DomainUpdateTenant,
        updated_at: NaiveDateTime,
    ) -> Result<Self, serde_json::Error> {
        Ok(Self {
            name: tenant.name.as_str(),
            plan: tenant.plan.as_str(),
            onboarding_state: tenant.onboarding.to_json()?,
            onboarding_completed: tenant.onboarding.is_completed(),
            updated_at,
        })
    }
}
