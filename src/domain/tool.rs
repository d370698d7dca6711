//! Plug-and-play dashboard tools.
//!
//! The catalog is static; tenants only store overrides (enabled flag, position
//! and free-form config) keyed by tool id.

use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::types::TenantId;

text_enum!(
    /// Grouping used by the settings screen.
    ToolCategory {
        Contacts => "contacts",
        Sales => "sales",
        Productivity => "productivity",
    }
);

/// Static description of a dashboard tool.
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
pub struct ToolDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub category: ToolCategory,
    pub default_enabled: bool,
}

pub const TOOL_CATALOG: &[ToolDefinition] = &[
    ToolDefinition {
        id: "contact-insights",
        name: "Contact insights",
        description: "Contacts by lifecycle status and recent additions.",
        category: ToolCategory::Contacts,
        default_enabled: true,
    },
    ToolDefinition {
        id: "company-insights",
        name: "Company insights",
        description: "Company count and the most common industries.",
        category: ToolCategory::Contacts,
        default_enabled: false,
    },
    ToolDefinition {
        id: "deal-pipeline",
        name: "Deal pipeline",
        description: "Deal count and value for every pipeline stage.",
        category: ToolCategory::Sales,
        default_enabled: true,
    },
    ToolDefinition {
        id: "revenue-forecast",
        name: "Revenue forecast",
        description: "Open pipeline weighted by win probability.",
        category: ToolCategory::Sales,
        default_enabled: false,
    },
    ToolDefinition {
        id: "activity-tracker",
        name: "Activity tracker",
        description: "Pending, completed and overdue activities.",
        category: ToolCategory::Productivity,
        default_enabled: true,
    },
    ToolDefinition {
        id: "win-rate",
        name: "Win rate",
        description: "Share of closed deals that were won.",
        category: ToolCategory::Sales,
        default_enabled: false,
    },
];

/// Looks up a tool in the catalog.
pub fn find_tool(id: &str) -> Option<&'static ToolDefinition> {
    TOOL_CATALOG.iter().find(|tool| tool.id == id)
}

/// Tenant override for a single tool.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolSetting {
    pub tenant_id: TenantId,
    pub tool_id: String,
    pub enabled: bool,
    pub position: i32,
    pub config: Value,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewToolSetting {
    pub tenant_id: TenantId,
    pub tool_id: String,
    pub enabled: bool,
    pub position: i32,
    pub config: Value,
}

/// Catalog entry merged with the tenant's override.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct EffectiveTool {
    #[serde(flatten)]
    pub definition: ToolDefinition,
    pub enabled: bool,
    pub position: i32,
    pub config: Value,
}

/// Merges the catalog with stored settings, ordered by position and then by
/// catalog order. Settings for tools missing from the catalog are skipped.
pub fn merge_tool_settings(settings: &[ToolSetting]) -> Vec<EffectiveTool> {
    let mut by_id: HashMap<&str, &ToolSetting> = HashMap::with_capacity(settings.len());
    for setting in settings {
        if find_tool(&setting.tool_id).is_none() {
            log::warn!(
                "Ignoring setting for unknown tool {} (tenant {})",
                setting.tool_id,
                setting.tenant_id
            );
            continue;
        }
        by_id.insert(setting.tool_id.as_str(), setting);
    }

    let mut tools: Vec<(usize, EffectiveTool)> = TOOL_CATALOG
        .iter()
        .enumerate()
        .map(|(index, definition)| {
            let tool = match by_id.get(definition.id) {
                Some(setting) => EffectiveTool {
                    definition: *definition,
                    enabled: setting.enabled,
                    position: setting.position,
                    config: setting.config.clone(),
                },
                None => EffectiveTool {
                    definition: *definition,
                    enabled: definition.default_enabled,
                    position: index as i32,
                    config: Value::Object(Default::default()),
                },
            };
            (index, tool)
        })
        .collect();

    tools.sort_by_key(|(index, tool)| (tool.position, *index));
    tools.into_iter().map(|(_, tool)| tool).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn setting(tool_id: &str, enabled: bool, position: i32) -> ToolSetting {
        ToolSetting {
            tenant_id: TenantId::new(1).unwrap(),
            tool_id: tool_id.to_string(),
            enabled,
            position,
            config: json!({}),
            updated_at: Utc::now().naive_utc(),
        }
    }

    #[test]
    fn catalog_ids_are_unique() {
        for (i, tool) in TOOL_CATALOG.iter().enumerate() {
            assert!(TOOL_CATALOG[i + 1..].iter().all(|other| other.id != tool.id));
        }
        assert!(find_tool("deal-pipeline").is_some());
        assert!(find_tool("unknown").is_none());
    }

    #[test]
    fn defaults_apply_without_settings() {
        let tools = merge_tool_settings(&[]);
        assert_eq!(tools.len(), TOOL_CATALOG.len());
        assert_eq!(tools[0].definition.id, "contact-insights");
        let enabled: Vec<_> = tools
            .iter()
            .filter(|t| t.enabled)
            .map(|t| t.definition.id)
            .collect();
        assert_eq!(
            enabled,
            vec!["contact-insights", "deal-pipeline", "activity-tracker"]
        );
    }

    #[test]
    fn settings_override_defaults_and_order() {
        let tools = merge_tool_settings(&[
            setting("win-rate", true, -1),
            setting("contact-insights", false, 0),
            setting("retired-tool", true, -5),
        ]);

        assert_eq!(tools.len(), TOOL_CATALOG.len());
        assert_eq!(tools[0].definition.id, "win-rate");
        assert!(tools[0].enabled);
        let contact = tools
            .iter()
            .find(|t| t.definition.id == "contact-insights")
            .unwrap();
        assert!(!contact.enabled);
    }
}
