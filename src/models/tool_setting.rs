//! Diesel models for per-tenant tool settings.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::tool::{NewToolSetting as DomainNewToolSetting, ToolSetting as DomainToolSetting};
use crate::domain::types::{TenantId, TypeConstraintError};
use crate::models::tenant::Tenant;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Tenant, foreign_key = tenant_id))]
#[diesel(table_name = crate::schema::tool_settings)]
#[diesel(primary_key(tenant_id, tool_id))]
pub struct ToolSetting {
    pub tenant_id: i32,
    pub tool_id: String,
    pub enabled: bool,
    pub position: i32,
    pub config: String, // JSON object stored as text
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::tool_settings)]
pub struct NewToolSetting<'a> {
    pub tenant_id: i32,
    pub tool_id: &'a str,
    pub enabled: bool,
    pub position: i32,
    pub config: String,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<ToolSetting> for DomainToolSetting {
    type Error = TypeConstraintError;

    fn try_from(setting: ToolSetting) -> Result<Self, Self::Error> {
        let config = serde_json::from_str(&setting.config).unwrap_or_else(|err| {
            log::warn!(
                "Resetting unreadable config of tool {}: {err}",
                setting.tool_id
            );
            serde_json::Value::Object(Default::default())
        });

        Ok(Self {
            tenant_id: TenantId::new(setting.tenant_id)?,
            tool_id: setting.tool_id,
            enabled: setting.enabled,
            position: setting.position,
            config,
            updated_at: setting.updated_at,
        })
    }
}

impl<'a> NewToolSetting<'a> {
    pub fn new(setting: &'a DomainNewToolSetting, updated_at: NaiveDateTime) -> Self {
        Self {
            tenant_id: setting.tenant_id.get(),
            tool_id: setting.tool_id.as_str(),
            enabled: setting.enabled,
            position: setting.position,
            config: setting.config.to_string(),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn config_is_parsed_or_reset() {
        let now = Utc::now().naive_utc();
        let db = ToolSetting {
            tenant_id: 1,
            tool_id: "win-rate".into(),
            enabled: true,
            position: 2,
            config: r#"{"period":"quarter"}"#.into(),
            updated_at: now,
        };
        let domain = DomainToolSetting::try_from(db.clone()).unwrap();
        assert_eq!(domain.config, json!({"period": "quarter"}));

        let broken = ToolSetting {
            config: "{".into(),
            ..db
        };
        let domain = DomainToolSetting::try_from(broken).unwrap();
        assert_eq!(domain.config, json!({}));
    }

    #[test]
    fn new_setting_serializes_config() {
        let domain = DomainNewToolSetting {
            tenant_id: TenantId::new(1).unwrap(),
            tool_id: "deal-pipeline".into(),
            enabled: false,
            position: 0,
            config: json!({"currency": "USD"}),
        };
        let insertable = NewToolSetting::new(&domain, Utc::now().naive_utc());
        assert_eq!(insertable.config, r#"{"currency":"USD"}"#);
        assert!(!insertable.enabled);
    }
}
