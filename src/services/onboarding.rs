//! Tenant onboarding wizard.

use chrono::NaiveDateTime;

use crate::auth::AuthenticatedUser;
use crate::domain::onboarding::StepSubmission;
use crate::domain::tenant::{Tenant, UpdateTenant};
use crate::domain::types::TenantName;
use crate::dto::onboarding::OnboardingStatus;
use crate::forms::onboarding::OnboardingForm;
use crate::forms::tools::settings_from_selection;
use crate::repository::{TenantReader, TenantWriter};
use crate::services::{ServiceError, ServiceResult, ensure_admin};

fn load_tenant<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Tenant>
where
    R: TenantReader + ?Sized,
{
    repo.get_tenant_by_id(user.tenant_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn get_onboarding<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<OnboardingStatus>
where
    R: TenantReader + ?Sized,
{
    let tenant = load_tenant(repo, user)?;
    Ok(OnboardingStatus::from(tenant.onboarding))
}

/// Applies one wizard step and persists the new state together with its side
/// effects on the tenant and its tool settings.
pub fn submit_step<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: OnboardingForm,
    now: NaiveDateTime,
) -> ServiceResult<OnboardingStatus>
where
    R: TenantReader + TenantWriter + ?Sized,
{
    ensure_admin(user)?;

    let tenant = load_tenant(repo, user)?;
    tenant.onboarding.accepts(form.step())?;
    let submission = StepSubmission::try_from(form)?;

    let mut updates = UpdateTenant::from(&tenant);
    updates.onboarding.advance(submission.clone(), now)?;

    let saved = match submission {
        StepSubmission::Configuration(configuration) => {
            updates.name = TenantName::new(configuration.company_name)?;
            repo.update_tenant(tenant.id, &updates)
        }
        StepSubmission::Tools(_) => {
            let settings =
                settings_from_selection(tenant.id, &updates.onboarding.selected_tools);
            repo.update_tenant_with_tools(tenant.id, &updates, &settings)
        }
        StepSubmission::Billing(plan) => {
            updates.plan = plan;
            repo.update_tenant(tenant.id, &updates)
        }
    };

    let tenant = saved.map_err(|err| {
        log::error!("Failed to save onboarding state: {err}");
        err
    })?;

    log::info!(
        "Tenant {} moved to onboarding step {}",
        tenant.id,
        tenant.onboarding.current_step
    );

    Ok(OnboardingStatus::from(tenant.onboarding))
}
