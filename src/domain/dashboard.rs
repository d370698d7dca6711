//! Aggregated figures rendered by dashboard tools.

use serde::Serialize;

use crate::domain::activity::ActivityType;
use crate::domain::contact::ContactStatus;
use crate::domain::deal::DealStage;

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ContactStats {
    pub total: i64,
    pub by_status: Vec<(ContactStatus, i64)>,
    pub created_last_30_days: i64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct IndustryCount {
    pub industry: String,
    pub companies: i64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct CompanyStats {
    pub total: i64,
    pub top_industries: Vec<IndustryCount>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct PipelineStage {
    pub stage: DealStage,
    pub deals: i64,
    pub amount: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct RevenueForecast {
    pub open_pipeline: f64,
    pub weighted_forecast: f64,
    pub won_total: f64,
    pub average_won_deal: f64,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct ActivitySummary {
    pub total: i64,
    pub completed: i64,
    pub pending: i64,
    pub overdue: i64,
    pub by_type: Vec<(ActivityType, i64)>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct WinRate {
    pub won: i64,
    pub lost: i64,
    /// Percentage of closed deals that were won, `0.0` without closed deals.
    pub rate: f64,
}

impl WinRate {
    pub fn new(won: i64, lost: i64) -> Self {
        let closed = won + lost;
        let rate = if closed == 0 {
            0.0
        } else {
            (won as f64 / closed as f64) * 100.0
        };
        Self { won, lost, rate }
    }
}

/// Output of a single tool, tagged with the kind of figures it carries.
#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(tag = "kind", content = "figures", rename_all = "snake_case")]
pub enum ToolData {
    ContactInsights(ContactStats),
    CompanyInsights(CompanyStats),
    DealPipeline(Vec<PipelineStage>),
    RevenueForecast(RevenueForecast),
    ActivityTracker(ActivitySummary),
    WinRate(WinRate),
}
