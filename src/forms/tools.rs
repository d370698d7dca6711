use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;

use crate::domain::tool::{EffectiveTool, NewToolSetting, TOOL_CATALOG, find_tool};
use crate::domain::types::TenantId;
use crate::forms::FormError;

/// Read views of `GET /api/tools`.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ToolsView {
    #[default]
    Dashboard,
    Settings,
}

#[derive(Debug, Default, Deserialize)]
pub struct ToolsQuery {
    #[serde(default)]
    pub action: ToolsView,
}

/// Write actions of `POST /api/tools`.
#[derive(Debug, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ToolActionForm {
    Create(ToolSettingForm),
    Settings { tools: Vec<ToolOrderForm> },
}

/// Upsert of a single tool; omitted fields keep their effective values.
#[derive(Debug, Deserialize)]
pub struct ToolSettingForm {
    pub tool_id: String,
    pub enabled: Option<bool>,
    pub position: Option<i32>,
    pub config: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct ToolOrderForm {
    pub tool_id: String,
    pub enabled: bool,
    pub position: Option<i32>,
}

impl ToolSettingForm {
    /// Resolves the form against the tool's current effective setting.
    pub fn into_setting(
        self,
        tenant_id: TenantId,
        current: &[EffectiveTool],
    ) -> Result<NewToolSetting, FormError> {
        let tool_id = known_tool(&self.tool_id)?;

        if self.config.as_ref().is_some_and(|config| !config.is_object()) {
            return Err(FormError::InvalidToolConfig);
        }

        let effective = current
            .iter()
            .find(|tool| tool.definition.id == tool_id)
            .ok_or_else(|| FormError::UnknownTool(tool_id.to_string()))?;

        Ok(NewToolSetting {
            tenant_id,
            tool_id: tool_id.to_string(),
            enabled: self.enabled.unwrap_or(effective.enabled),
            position: self.position.unwrap_or(effective.position),
            config: self.config.unwrap_or_else(|| effective.config.clone()),
        })
    }
}

/// Builds the full replacement set for the tenant. Entries without a
/// position take their index in the submitted list.
pub fn settings_from_order(
    tenant_id: TenantId,
    tools: Vec<ToolOrderForm>,
) -> Result<Vec<NewToolSetting>, FormError> {
    let mut seen = HashSet::with_capacity(tools.len());
    let mut settings = Vec::with_capacity(tools.len());

    for (index, tool) in tools.into_iter().enumerate() {
        let tool_id = known_tool(&tool.tool_id)?;
        if !seen.insert(tool_id) {
            return Err(FormError::DuplicateTool(tool_id.to_string()));
        }
        settings.push(NewToolSetting {
            tenant_id,
            tool_id: tool_id.to_string(),
            enabled: tool.enabled,
            position: tool.position.unwrap_or(index as i32),
            config: Value::Object(Default::default()),
        });
    }

    Ok(settings)
}

/// Settings written by the onboarding tools step: the selection enabled in
/// order, every other catalog tool disabled after it.
pub fn settings_from_selection(tenant_id: TenantId, selected: &[String]) -> Vec<NewToolSetting> {
    let mut settings: Vec<NewToolSetting> = selected
        .iter()
        .filter_map(|id| find_tool(id))
        .enumerate()
        .map(|(position, tool)| NewToolSetting {
            tenant_id,
            tool_id: tool.id.to_string(),
            enabled: true,
            position: position as i32,
            config: Value::Object(Default::default()),
        })
        .collect();

    let offset = settings.len();
    settings.extend(
        TOOL_CATALOG
            .iter()
            .filter(|tool| !selected.iter().any(|id| id == tool.id))
            .enumerate()
            .map(|(index, tool)| NewToolSetting {
                tenant_id,
                tool_id: tool.id.to_string(),
                enabled: false,
                position: (offset + index) as i32,
                config: Value::Object(Default::default()),
            }),
    );

    settings
}

fn known_tool(id: &str) -> Result<&'static str, FormError> {
    find_tool(id.trim())
        .map(|tool| tool.id)
        .ok_or_else(|| FormError::UnknownTool(id.to_string()))
}
