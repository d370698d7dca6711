use chrono::NaiveDateTime;

use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::activity::{Activity, ActivityType, NewActivity, UpdateActivity};
use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::contact::{Contact, ContactStatus, NewContact, UpdateContact};
use crate::domain::dashboard::{
    ActivitySummary, CompanyStats, ContactStats, PipelineStage, RevenueForecast, WinRate,
};
use crate::domain::deal::{Deal, DealStage, NewDeal, UpdateDeal};
use crate::domain::tenant::{Tenant, UpdateTenant};
use crate::domain::tool::{NewToolSetting, ToolSetting};
use crate::domain::types::{
    ActivityId, CompanyId, ContactId, DealId, EmailAddress, TenantId, UserId,
};
use crate::domain::user::{NewUser, Registration, User, UserCredentials};
use crate::repository::errors::RepositoryResult;

pub mod activity;
pub mod company;
pub mod contact;
pub mod dashboard;
pub mod deal;
pub mod errors;
#[cfg(feature = "test-mocks")]
pub mod mock;
pub mod tenant;
pub mod tool_setting;
pub mod user;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    /// Row offset of the first item on the page (pages are 1-based).
    pub fn offset(&self) -> i64 {
        let offset = (self.page.max(1) - 1).saturating_mul(self.per_page);
        i64::try_from(offset).unwrap_or(i64::MAX)
    }

    pub fn limit(&self) -> i64 {
        i64::try_from(self.per_page).unwrap_or(i64::MAX)
    }
}

/// Wraps a trimmed search term into a substring `LIKE` pattern.
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{}%", term.trim())
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContactListQuery {
    pub tenant_id: TenantId,
    pub search: Option<String>,
    pub status: Option<ContactStatus>,
    pub company_id: Option<CompanyId>,
    pub pagination: Option<Pagination>,
}

impl ContactListQuery {
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            search: None,
            status: None,
            company_id: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn status(mut self, status: ContactStatus) -> Self {
        self.status = Some(status);
        self
    }

    pub fn company(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyListQuery {
    pub tenant_id: TenantId,
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl CompanyListQuery {
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            search: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DealListQuery {
    pub tenant_id: TenantId,
    pub search: Option<String>,
    pub stage: Option<DealStage>,
    pub contact_id: Option<ContactId>,
    pub company_id: Option<CompanyId>,
    pub pagination: Option<Pagination>,
}

impl DealListQuery {
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            search: None,
            stage: None,
            contact_id: None,
            company_id: None,
            pagination: None,
        }
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn stage(mut self, stage: DealStage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn contact(mut self, contact_id: ContactId) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    pub fn company(mut self, company_id: CompanyId) -> Self {
        self.company_id = Some(company_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityListQuery {
    pub tenant_id: TenantId,
    pub activity_type: Option<ActivityType>,
    pub completed: Option<bool>,
    pub contact_id: Option<ContactId>,
    pub deal_id: Option<DealId>,
    pub pagination: Option<Pagination>,
}

impl ActivityListQuery {
    pub fn new(tenant_id: TenantId) -> Self {
        Self {
            tenant_id,
            activity_type: None,
            completed: None,
            contact_id: None,
            deal_id: None,
            pagination: None,
        }
    }

    pub fn activity_type(mut self, activity_type: ActivityType) -> Self {
        self.activity_type = Some(activity_type);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn contact(mut self, contact_id: ContactId) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    pub fn deal(mut self, deal_id: DealId) -> Self {
        self.deal_id = Some(deal_id);
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait TenantReader {
    fn get_tenant_by_id(&self, id: TenantId) -> RepositoryResult<Option<Tenant>>;
}

pub trait TenantWriter {
    /// Creates the tenant and its owner atomically.
    fn register_tenant(&self, registration: &Registration) -> RepositoryResult<(Tenant, User)>;
    fn update_tenant(&self, id: TenantId, updates: &UpdateTenant) -> RepositoryResult<Tenant>;
    /// Saves the tenant and replaces all of its tool settings atomically.
    fn update_tenant_with_tools(
        &self,
        id: TenantId,
        updates: &UpdateTenant,
        settings: &[NewToolSetting],
    ) -> RepositoryResult<Tenant>;
}

pub trait UserReader {
    fn get_user_by_id(&self, id: UserId, tenant_id: TenantId) -> RepositoryResult<Option<User>>;
    fn get_user_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> RepositoryResult<Option<UserCredentials>>;
    fn list_users(&self, tenant_id: TenantId) -> RepositoryResult<Vec<User>>;
}

pub trait UserWriter {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
}

pub trait ContactReader {
    fn get_contact_by_id(
        &self,
        id: ContactId,
        tenant_id: TenantId,
    ) -> RepositoryResult<Option<Contact>>;
    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)>;
}

pub trait ContactWriter {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact>;
    fn create_contacts(&self, new_contacts: &[NewContact]) -> RepositoryResult<usize>;
    fn update_contact(
        &self,
        id: ContactId,
        tenant_id: TenantId,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact>;
    fn delete_contact(&self, id: ContactId, tenant_id: TenantId) -> RepositoryResult<()>;
}

pub trait CompanyReader {
    fn get_company_by_id(
        &self,
        id: CompanyId,
        tenant_id: TenantId,
    ) -> RepositoryResult<Option<Company>>;
    fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<(usize, Vec<Company>)>;
}

pub trait CompanyWriter {
    fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company>;
    fn update_company(
        &self,
        id: CompanyId,
        tenant_id: TenantId,
        updates: &UpdateCompany,
    ) -> RepositoryResult<Company>;
    fn delete_company(&self, id: CompanyId, tenant_id: TenantId) -> RepositoryResult<()>;
}

pub trait DealReader {
    fn get_deal_by_id(&self, id: DealId, tenant_id: TenantId) -> RepositoryResult<Option<Deal>>;
    fn list_deals(&self, query: DealListQuery) -> RepositoryResult<(usize, Vec<Deal>)>;
}

pub trait DealWriter {
    fn create_deal(&self, new_deal: &NewDeal) -> RepositoryResult<Deal>;
    fn update_deal(
        &self,
        id: DealId,
        tenant_id: TenantId,
        updates: &UpdateDeal,
    ) -> RepositoryResult<Deal>;
    fn delete_deal(&self, id: DealId, tenant_id: TenantId) -> RepositoryResult<()>;
}

pub trait ActivityReader {
    fn get_activity_by_id(
        &self,
        id: ActivityId,
        tenant_id: TenantId,
    ) -> RepositoryResult<Option<Activity>>;
    fn list_activities(&self, query: ActivityListQuery)
    -> RepositoryResult<(usize, Vec<Activity>)>;
}

pub trait ActivityWriter {
    fn create_activity(&self, new_activity: &NewActivity) -> RepositoryResult<Activity>;
    fn update_activity(
        &self,
        id: ActivityId,
        tenant_id: TenantId,
        updates: &UpdateActivity,
    ) -> RepositoryResult<Activity>;
    fn complete_activity(&self, id: ActivityId, tenant_id: TenantId)
    -> RepositoryResult<Activity>;
    fn delete_activity(&self, id: ActivityId, tenant_id: TenantId) -> RepositoryResult<()>;
}

pub trait ToolSettingReader {
    fn list_tool_settings(&self, tenant_id: TenantId) -> RepositoryResult<Vec<ToolSetting>>;
}

pub trait ToolSettingWriter {
    fn upsert_tool_setting(&self, setting: &NewToolSetting) -> RepositoryResult<ToolSetting>;
    /// Replaces every stored setting of the tenant in one transaction.
    fn replace_tool_settings(
        &self,
        tenant_id: TenantId,
        settings: &[NewToolSetting],
    ) -> RepositoryResult<usize>;
}

/// Aggregation queries backing the dashboard tools.
pub trait DashboardReader {
    fn contact_stats(
        &self,
        tenant_id: TenantId,
        created_since: NaiveDateTime,
    ) -> RepositoryResult<ContactStats>;
    fn company_stats(&self, tenant_id: TenantId, top: usize) -> RepositoryResult<CompanyStats>;
    fn deal_pipeline(&self, tenant_id: TenantId) -> RepositoryResult<Vec<PipelineStage>>;
    fn revenue_forecast(&self, tenant_id: TenantId) -> RepositoryResult<RevenueForecast>;
    fn activity_summary(
        &self,
        tenant_id: TenantId,
        now: NaiveDateTime,
    ) -> RepositoryResult<ActivitySummary>;
    fn win_rate(&self, tenant_id: TenantId) -> RepositoryResult<WinRate>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_offsets_are_one_based() {
        let first = Pagination {
            page: 1,
            per_page: 20,
        };
        assert_eq!(first.offset(), 0);
        let zero = Pagination {
            page: 0,
            per_page: 20,
        };
        assert_eq!(zero.offset(), 0);
        let third = Pagination {
            page: 3,
            per_page: 20,
        };
        assert_eq!(third.offset(), 40);
        assert_eq!(third.limit(), 20);
    }

    #[test]
    fn huge_pages_saturate_the_offset() {
        let last = Pagination {
            page: usize::MAX,
            per_page: 20,
        };
        assert_eq!(last.offset(), i64::MAX);
    }

    #[test]
    fn like_pattern_wraps_trimmed_term() {
        assert_eq!(like_pattern(" acme "), "%acme%");
    }
}
