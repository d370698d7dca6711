//! Aggregations behind the dashboard tools.
//!
//! Grouping happens in SQL where it is a plain `GROUP BY`; ratios and
//! weighted sums are computed on the loaded rows.

use chrono::NaiveDateTime;
use diesel::dsl::{count_star, sum};
use diesel::prelude::*;

use crate::domain::activity::ActivityType;
use crate::domain::contact::ContactStatus;
use crate::domain::dashboard::{
    ActivitySummary, CompanyStats, ContactStats, IndustryCount, PipelineStage, RevenueForecast,
    WinRate,
};
use crate::domain::deal::DealStage;
use crate::domain::types::TenantId;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DashboardReader, DieselRepository};

impl DashboardReader for DieselRepository {
    fn contact_stats(
        &self,
        tenant_id: TenantId,
        created_since: NaiveDateTime,
    ) -> RepositoryResult<ContactStats> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let grouped = contacts::table
            .filter(contacts::tenant_id.eq(tenant_id.get()))
            .group_by(contacts::status)
            .select((contacts::status, count_star()))
            .load::<(String, i64)>(&mut conn)?;

        let created_last_30_days = contacts::table
            .filter(contacts::tenant_id.eq(tenant_id.get()))
            .filter(contacts::created_at.ge(created_since))
            .count()
            .get_result::<i64>(&mut conn)?;

        let mut by_status: Vec<(ContactStatus, i64)> =
            ContactStatus::ALL.iter().map(|status| (*status, 0)).collect();
        for (status, count) in grouped {
            let status: ContactStatus = status.parse()?;
            if let Some(entry) = by_status.iter_mut().find(|(s, _)| *s == status) {
                entry.1 = count;
            }
        }
        let total = by_status.iter().map(|(_, count)| count).sum();

        Ok(ContactStats {
            total,
            by_status,
            created_last_30_days,
        })
    }

    fn company_stats(&self, tenant_id: TenantId, top: usize) -> RepositoryResult<CompanyStats> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let total = companies::table
            .filter(companies::tenant_id.eq(tenant_id.get()))
            .count()
            .get_result::<i64>(&mut conn)?;

        let mut industries: Vec<IndustryCount> = companies::table
            .filter(companies::tenant_id.eq(tenant_id.get()))
            .filter(companies::industry.is_not_null())
            .group_by(companies::industry)
            .select((companies::industry, count_star()))
            .load::<(Option<String>, i64)>(&mut conn)?
            .into_iter()
            .filter_map(|(industry, companies)| {
                industry
                    .filter(|name| !name.trim().is_empty())
                    .map(|industry| IndustryCount {
                        industry,
                        companies,
                    })
            })
            .collect();

        industries.sort_by(|a, b| {
            b.companies
                .cmp(&a.companies)
                .then_with(|| a.industry.cmp(&b.industry))
        });
        industries.truncate(top);

        Ok(CompanyStats {
            total,
            top_industries: industries,
        })
    }

    fn deal_pipeline(&self, tenant_id: TenantId) -> RepositoryResult<Vec<PipelineStage>> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let grouped = deals::table
            .filter(deals::tenant_id.eq(tenant_id.get()))
            .group_by(deals::stage)
            .select((deals::stage, count_star(), sum(deals::amount)))
            .load::<(String, i64, Option<f64>)>(&mut conn)?;

        let mut pipeline: Vec<PipelineStage> = DealStage::ALL
            .iter()
            .map(|stage| PipelineStage {
                stage: *stage,
                deals: 0,
                amount: 0.0,
            })
            .collect();

        for (stage, deals, amount) in grouped {
            let stage: DealStage = stage.parse()?;
            if let Some(entry) = pipeline.iter_mut().find(|entry| entry.stage == stage) {
                entry.deals = deals;
                entry.amount = amount.unwrap_or_default();
            }
        }

        Ok(pipeline)
    }

    fn revenue_forecast(&self, tenant_id: TenantId) -> RepositoryResult<RevenueForecast> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let rows = deals::table
            .filter(deals::tenant_id.eq(tenant_id.get()))
            .select((deals::stage, deals::amount, deals::probability))
            .load::<(String, f64, i32)>(&mut conn)?;

        let mut forecast = RevenueForecast {
            open_pipeline: 0.0,
            weighted_forecast: 0.0,
            won_total: 0.0,
            average_won_deal: 0.0,
        };
        let mut won_deals = 0usize;

        for (stage, amount, probability) in rows {
            match stage.parse::<DealStage>()? {
                DealStage::ClosedWon => {
                    forecast.won_total += amount;
                    won_deals += 1;
                }
                DealStage::ClosedLost => {}
                _ => {
                    forecast.open_pipeline += amount;
                    forecast.weighted_forecast += amount * f64::from(probability) / 100.0;
                }
            }
        }

        if won_deals > 0 {
            forecast.average_won_deal = forecast.won_total / won_deals as f64;
        }

        Ok(forecast)
    }

    fn activity_summary(
        &self,
        tenant_id: TenantId,
        now: NaiveDateTime,
    ) -> RepositoryResult<ActivitySummary> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let rows = activities::table
            .filter(activities::tenant_id.eq(tenant_id.get()))
            .select((
                activities::activity_type,
                activities::completed,
                activities::due_at,
            ))
            .load::<(String, bool, Option<NaiveDateTime>)>(&mut conn)?;

        let mut by_type: Vec<(ActivityType, i64)> =
            ActivityType::ALL.iter().map(|kind| (*kind, 0)).collect();
        let mut summary = ActivitySummary {
            total: 0,
            completed: 0,
            pending: 0,
            overdue: 0,
            by_type: Vec::new(),
        };

        for (activity_type, completed, due_at) in rows {
            let activity_type: ActivityType = activity_type.parse()?;
            if let Some(entry) = by_type.iter_mut().find(|(kind, _)| *kind == activity_type) {
                entry.1 += 1;
            }

            summary.total += 1;
            if completed {
                summary.completed += 1;
            } else {
                summary.pending += 1;
                if due_at.is_some_and(|due| due < now) {
                    summary.overdue += 1;
                }
            }
        }
        summary.by_type = by_type;

        Ok(summary)
    }

    fn win_rate(&self, tenant_id: TenantId) -> RepositoryResult<WinRate> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let closed = deals::table
            .filter(deals::tenant_id.eq(tenant_id.get()))
            .filter(deals::stage.eq_any([
                DealStage::ClosedWon.as_str(),
                DealStage::ClosedLost.as_str(),
            ]))
            .group_by(deals::stage)
            .select((deals::stage, count_star()))
            .load::<(String, i64)>(&mut conn)?;

        let mut won = 0;
        let mut lost = 0;
        for (stage, count) in closed {
            match stage.parse::<DealStage>().map_err(RepositoryError::from)? {
                DealStage::ClosedWon => won = count,
                DealStage::ClosedLost => lost = count,
                _ => {}
            }
        }

        Ok(WinRate::new(won, lost))
    }
}
