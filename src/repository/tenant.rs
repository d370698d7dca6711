//! Repository implementation for tenants and sign-up.

use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::tenant::{Tenant, UpdateTenant};
use crate::domain::tool::NewToolSetting;
use crate::domain::types::TenantId;
use crate::domain::user::{Registration, User, UserRole};
use crate::models::tenant::{
    NewTenant as DbNewTenant, Tenant as DbTenant, UpdateTenant as DbUpdateTenant,
};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::tool_setting::replace_settings;
use crate::repository::{DieselRepository, TenantReader, TenantWriter};

impl TenantReader for DieselRepository {
    fn get_tenant_by_id(&self, id: TenantId) -> RepositoryResult<Option<Tenant>> {
        use crate::schema::tenants;

        let mut conn = self.conn()?;
        let db_tenant = tenants::table
            .find(id.get())
            .first::<DbTenant>(&mut conn)
            .optional()?;

        db_tenant
            .map(Tenant::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }
}

impl TenantWriter for DieselRepository {
    fn register_tenant(&self, registration: &Registration) -> RepositoryResult<(Tenant, User)> {
        use crate::schema::{tenants, users};

        let mut conn = self.conn()?;
        let db_new_tenant = DbNewTenant::try_from(&registration.tenant)?;

        let (db_tenant, db_user) = conn.transaction::<_, RepositoryError, _>(|conn| {
            let db_tenant = diesel::insert_into(tenants::table)
                .values(&db_new_tenant)
                .get_result::<DbTenant>(conn)?;

            let db_new_user = DbNewUser {
                tenant_id: db_tenant.id,
                email: registration.email.as_str(),
                name: registration.name.as_str(),
                password_hash: registration.password_hash.as_str(),
                role: UserRole::Owner.as_str(),
            };
            let db_user = diesel::insert_into(users::table)
                .values(&db_new_user)
                .get_result::<DbUser>(conn)?;

            Ok((db_tenant, db_user))
        })?;

        let tenant = Tenant::try_from(db_tenant)?;
        let user = User::try_from(db_user)?;
        Ok((tenant, user))
    }

    fn update_tenant(&self, id: TenantId, updates: &UpdateTenant) -> RepositoryResult<Tenant> {
        let mut conn = self.conn()?;
        let db_tenant = save_tenant(&mut conn, id, updates)?;
        Ok(Tenant::try_from(db_tenant)?)
    }

    fn update_tenant_with_tools(
        &self,
        id: TenantId,
        updates: &UpdateTenant,
        settings: &[NewToolSetting],
    ) -> RepositoryResult<Tenant> {
        let mut conn = self.conn()?;
        let db_tenant = conn.transaction::<_, RepositoryError, _>(|conn| {
            replace_settings(conn, id, settings)?;
            save_tenant(conn, id, updates)
        })?;
        Ok(Tenant::try_from(db_tenant)?)
    }
}

fn save_tenant(
    conn: &mut SqliteConnection,
    id: TenantId,
    updates: &UpdateTenant,
) -> RepositoryResult<DbTenant> {
    use crate::schema::tenants;

    let db_updates = DbUpdateTenant::try_new(updates, Utc::now().naive_utc())?;
    Ok(diesel::update(tenants::table.find(id.get()))
        .set(&db_updates)
        .get_result::<DbTenant>(conn)?)
}
