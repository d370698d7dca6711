use serde::Serialize;

use crate::domain::dashboard::ToolData;
use crate::domain::tool::EffectiveTool;

/// An enabled tool with its computed figures.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct DashboardTool {
    #[serde(flatten)]
    pub tool: EffectiveTool,
    pub data: ToolData,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolsDashboard {
    pub tools: Vec<DashboardTool>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ToolsSettings {
    pub tools: Vec<EffectiveTool>,
}
