//! Plug-and-play dashboard tools.

use chrono::{Duration, NaiveDateTime};

use crate::auth::AuthenticatedUser;
use crate::domain::dashboard::ToolData;
use crate::domain::tool::{EffectiveTool, merge_tool_settings};
use crate::domain::types::TenantId;
use crate::dto::tools::{DashboardTool, ToolsDashboard, ToolsSettings};
use crate::forms::FormError;
use crate::forms::tools::{ToolActionForm, settings_from_order};
use crate::repository::{DashboardReader, ToolSettingReader, ToolSettingWriter};
use crate::services::{ServiceResult, ensure_admin};

const RECENT_CONTACTS_DAYS: i64 = 30;
const TOP_INDUSTRIES: usize = 5;

fn effective_tools<R>(repo: &R, tenant_id: TenantId) -> ServiceResult<Vec<EffectiveTool>>
where
    R: ToolSettingReader + ?Sized,
{
    let settings = repo.list_tool_settings(tenant_id).map_err(|err| {
        log::error!("Failed to load tool settings: {err}");
        err
    })?;
    Ok(merge_tool_settings(&settings))
}

/// Runs the aggregation registered for `tool_id`.
pub fn compute_tool_data<R>(
    repo: &R,
    tenant_id: TenantId,
    tool_id: &str,
    now: NaiveDateTime,
) -> ServiceResult<ToolData>
where
    R: DashboardReader + ?Sized,
{
    let data = match tool_id {
        "contact-insights" => ToolData::ContactInsights(
            repo.contact_stats(tenant_id, now - Duration::days(RECENT_CONTACTS_DAYS))?,
        ),
        "company-insights" => {
            ToolData::CompanyInsights(repo.company_stats(tenant_id, TOP_INDUSTRIES)?)
        }
        "deal-pipeline" => ToolData::DealPipeline(repo.deal_pipeline(tenant_id)?),
        "revenue-forecast" => ToolData::RevenueForecast(repo.revenue_forecast(tenant_id)?),
        "activity-tracker" => ToolData::ActivityTracker(repo.activity_summary(tenant_id, now)?),
        "win-rate" => ToolData::WinRate(repo.win_rate(tenant_id)?),
        other => return Err(FormError::UnknownTool(other.to_string()).into()),
    };
    Ok(data)
}

/// Enabled tools in display order with their figures.
pub fn load_dashboard<R>(
    repo: &R,
    user: &AuthenticatedUser,
    now: NaiveDateTime,
) -> ServiceResult<ToolsDashboard>
where
    R: ToolSettingReader + DashboardReader + ?Sized,
{
    let tools = effective_tools(repo, user.tenant_id)?
        .into_iter()
        .filter(|tool| tool.enabled)
        .map(|tool| {
            let data = compute_tool_data(repo, user.tenant_id, tool.definition.id, now)?;
            Ok(DashboardTool { tool, data })
        })
        .collect::<ServiceResult<Vec<_>>>()?;

    Ok(ToolsDashboard { tools })
}

pub fn load_tool_settings<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<ToolsSettings>
where
    R: ToolSettingReader + ?Sized,
{
    Ok(ToolsSettings {
        tools: effective_tools(repo, user.tenant_id)?,
    })
}

/// Handles the write actions of the tools endpoint and returns the resulting
/// settings.
pub fn apply_tool_action<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ToolActionForm,
) -> ServiceResult<ToolsSettings>
where
    R: ToolSettingReader + ToolSettingWriter + ?Sized,
{
    ensure_admin(user)?;

    match form {
        ToolActionForm::Create(setting) => {
            let current = effective_tools(repo, user.tenant_id)?;
            let setting = setting.into_setting(user.tenant_id, &current)?;
            repo.upsert_tool_setting(&setting).map_err(|err| {
                log::error!("Failed to save tool setting: {err}");
                err
            })?;
            log::info!(
                "Tenant {} updated tool {} (enabled: {})",
                user.tenant_id,
                setting.tool_id,
                setting.enabled
            );
        }
        ToolActionForm::Settings { tools } => {
            let settings = settings_from_order(user.tenant_id, tools)?;
            let stored = repo
                .replace_tool_settings(user.tenant_id, &settings)
                .map_err(|err| {
                    log::error!("Failed to replace tool settings: {err}");
                    err
                })?;
            log::info!("Tenant {} saved {stored} tool settings", user.tenant_id);
        }
    }

    load_tool_settings(repo, user)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::dashboard::WinRate;
    use crate::domain::tool::{TOOL_CATALOG, ToolSetting};
    use crate::domain::user::UserRole;
    use crate::forms::tools::{ToolOrderForm, ToolSettingForm};
    use crate::repository::mock::MockRepository;
    use crate::services::ServiceError;
    use crate::services::test_support::{now, user_with_role};
    use serde_json::json;

    #[test]
    fn dashboard_only_computes_enabled_tools() {
        let user = user_with_role(UserRole::Member);
        let tenant_id = user.tenant_id;
        let mut repo = MockRepository::new();
        repo.expect_list_tool_settings().returning(move |_| {
            Ok(TOOL_CATALOG
                .iter()
                .enumerate()
                .map(|(index, tool)| ToolSetting {
                    tenant_id,
                    tool_id: tool.id.to_string(),
                    enabled: tool.id == "win-rate",
                    position: index as i32,
                    config: json!({}),
                    updated_at: now(),
                })
                .collect())
        });
        repo.expect_win_rate()
            .times(1)
            .returning(|_| Ok(WinRate::new(3, 1)));
        repo.expect_contact_stats().never();
        repo.expect_deal_pipeline().never();

        let dashboard = load_dashboard(&repo, &user, now()).unwrap();
        assert_eq!(dashboard.tools.len(), 1);
        assert_eq!(dashboard.tools[0].tool.definition.id, "win-rate");
        assert_eq!(dashboard.tools[0].data, ToolData::WinRate(WinRate::new(3, 1)));
    }

    #[test]
    fn unknown_tool_has_no_aggregation() {
        let repo = MockRepository::new();
        let user = user_with_role(UserRole::Member);
        assert!(matches!(
            compute_tool_data(&repo, user.tenant_id, "weather", now()),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn create_upserts_with_effective_defaults() {
        let mut repo = MockRepository::new();
        repo.expect_list_tool_settings().returning(|_| Ok(vec![]));
        repo.expect_upsert_tool_setting()
            .withf(|setting| {
                setting.tool_id == "revenue-forecast" && setting.enabled && setting.position == 3
            })
            .times(1)
            .returning(|setting| {
                Ok(ToolSetting {
                    tenant_id: setting.tenant_id,
                    tool_id: setting.tool_id.clone(),
                    enabled: setting.enabled,
                    position: setting.position,
                    config: setting.config.clone(),
                    updated_at: now(),
                })
            });

        let form = ToolActionForm::Create(ToolSettingForm {
            tool_id: "revenue-forecast".into(),
            enabled: Some(true),
            position: None,
            config: None,
        });
        let settings = apply_tool_action(&repo, &user_with_role(UserRole::Admin), form).unwrap();
        assert_eq!(settings.tools.len(), TOOL_CATALOG.len());
    }

    #[test]
    fn settings_action_rejects_unknown_tool() {
        let mut repo = MockRepository::new();
        repo.expect_replace_tool_settings().never();

        let form = ToolActionForm::Settings {
            tools: vec![ToolOrderForm {
                tool_id: "weather".into(),
                enabled: true,
                position: None,
            }],
        };
        assert!(matches!(
            apply_tool_action(&repo, &user_with_role(UserRole::Owner), form),
            Err(ServiceError::Form(_))
        ));
    }

    #[test]
    fn members_cannot_change_tools() {
        let repo = MockRepository::new();
        let form = ToolActionForm::Settings { tools: vec![] };
        assert!(matches!(
            apply_tool_action(&repo, &user_with_role(UserRole::Member), form),
            Err(ServiceError::Forbidden)
        ));
    }
}
