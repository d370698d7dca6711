//! Mock repository implementations for isolating services in tests.

use chrono::NaiveDateTime;
use mockall::mock;

use crate::domain::activity::{Activity, NewActivity, UpdateActivity};
use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::dashboard::{
    ActivitySummary, CompanyStats, ContactStats, PipelineStage, RevenueForecast, WinRate,
};
use crate::domain::deal::{Deal, NewDeal, UpdateDeal};
use crate::domain::tenant::{Tenant, UpdateTenant};
use crate::domain::tool::{NewToolSetting, ToolSetting};
use crate::domain::types::{
    ActivityId, CompanyId, ContactId, DealId, EmailAddress, TenantId, UserId,
};
use crate::domain::user::{NewUser, Registration, User, UserCredentials};
use crate::repository::errors::RepositoryResult;
use crate::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, CompanyListQuery, CompanyReader,
    CompanyWriter, ContactListQuery, ContactReader, ContactWriter, DashboardReader, DealListQuery,
    DealReader, DealWriter, TenantReader, TenantWriter, ToolSettingReader, ToolSettingWriter,
    UserReader, UserWriter,
};

mock! {
    pub Repository {}

    impl TenantReader for Repository {
        fn get_tenant_by_id(&self, id: TenantId) -> RepositoryResult<Option<Tenant>>;
    }

    impl TenantWriter for Repository {
        fn register_tenant(&self, registration: &Registration) -> RepositoryResult<(Tenant, User)>;
        fn update_tenant(&self, id: TenantId, updates: &UpdateTenant) -> RepositoryResult<Tenant>;
        fn update_tenant_with_tools(
            &self,
            id: TenantId,
            updates: &UpdateTenant,
            settings: &[NewToolSetting],
        ) -> RepositoryResult<Tenant>;
    }

    impl UserReader for Repository {
        fn get_user_by_id(&self, id: UserId, tenant_id: TenantId) -> RepositoryResult<Option<User>>;
        fn get_user_credentials_by_email(
            &self,
            email: &EmailAddress,
        ) -> RepositoryResult<Option<UserCredentials>>;
        fn list_users(&self, tenant_id: TenantId) -> RepositoryResult<Vec<User>>;
    }

    impl UserWriter for Repository {
        fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User>;
    }

    impl ContactReader for Repository {
        fn get_contact_by_id(
            &self,
            id: ContactId,
            tenant_id: TenantId,
        ) -> RepositoryResult<Option<Contact>>;
        fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)>;
    }

    impl ContactWriter for Repository {
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

    impl CompanyReader for Repository {
        fn get_company_by_id(
            &self,
            id: CompanyId,
            tenant_id: TenantId,
        ) -> RepositoryResult<Option<Company>>;
        fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<(usize, Vec<Company>)>;
    }

    impl CompanyWriter for Repository {
        fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company>;
        fn update_company(
            &self,
            id: CompanyId,
            tenant_id: TenantId,
            updates: &UpdateCompany,
        ) -> RepositoryResult<Company>;
        fn delete_company(&self, id: CompanyId, tenant_id: TenantId) -> RepositoryResult<()>;
    }

    impl DealReader for Repository {
        fn get_deal_by_id(&self, id: DealId, tenant_id: TenantId) -> RepositoryResult<Option<Deal>>;
        fn list_deals(&self, query: DealListQuery) -> RepositoryResult<(usize, Vec<Deal>)>;
    }

    impl DealWriter for Repository {
        fn create_deal(&self, new_deal: &NewDeal) -> RepositoryResult<Deal>;
        fn update_deal(
            &self,
            id: DealId,
            tenant_id: TenantId,
            updates: &UpdateDeal,
        ) -> RepositoryResult<Deal>;
        fn delete_deal(&self, id: DealId, tenant_id: TenantId) -> RepositoryResult<()>;
    }

    impl ActivityReader for Repository {
        fn get_activity_by_id(
            &self,
            id: ActivityId,
            tenant_id: TenantId,
        ) -> RepositoryResult<Option<Activity>>;
        fn list_activities(
            &self,
            query: ActivityListQuery,
        ) -> RepositoryResult<(usize, Vec<Activity>)>;
    }

    impl ActivityWriter for Repository {
        fn create_activity(&self, new_activity: &NewActivity) -> RepositoryResult<Activity>;
        fn update_activity(
            &self,
            id: ActivityId,
            tenant_id: TenantId,
            updates: &UpdateActivity,
        ) -> RepositoryResult<Activity>;
        fn complete_activity(
            &self,
            id: ActivityId,
            tenant_id: TenantId,
        ) -> RepositoryResult<Activity>;
        fn delete_activity(&self, id: ActivityId, tenant_id: TenantId) -> RepositoryResult<()>;
    }

    impl ToolSettingReader for Repository {
        fn list_tool_settings(&self, tenant_id: TenantId) -> RepositoryResult<Vec<ToolSetting>>;
    }

    impl ToolSettingWriter for Repository {
        fn upsert_tool_setting(&self, setting: &NewToolSetting) -> RepositoryResult<ToolSetting>;
        fn replace_tool_settings(
            &self,
            tenant_id: TenantId,
            settings: &[NewToolSetting],
        ) -> RepositoryResult<usize>;
    }

    impl DashboardReader for Repository {
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
}
