use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel::upsert::excluded;

use crate::domain::tool::{NewToolSetting, ToolSetting};
use crate::domain::types::TenantId;
use crate::models::tool_setting::{
    NewToolSetting as DbNewToolSetting, ToolSetting as DbToolSetting,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, ToolSettingReader, ToolSettingWriter};

impl ToolSettingReader for DieselRepository {
    fn list_tool_settings(&self, tenant_id: TenantId) -> RepositoryResult<Vec<ToolSetting>> {
        use crate::schema::tool_settings;

        let mut conn = self.conn()?;
        tool_settings::table
            .filter(tool_settings::tenant_id.eq(tenant_id.get()))
            .order((tool_settings::position.asc(), tool_settings::tool_id.asc()))
            .load::<DbToolSetting>(&mut conn)?
            .into_iter()
            .map(|db_setting| ToolSetting::try_from(db_setting).map_err(RepositoryError::from))
            .collect()
    }
}

impl ToolSettingWriter for DieselRepository {
    fn upsert_tool_setting(&self, setting: &NewToolSetting) -> RepositoryResult<ToolSetting> {
        use crate::schema::tool_settings;

        let mut conn = self.conn()?;
        let db_setting = DbNewToolSetting::new(setting, Utc::now().naive_utc());

        let stored = diesel::insert_into(tool_settings::table)
            .values(&db_setting)
            .on_conflict((tool_settings::tenant_id, tool_settings::tool_id))
            .do_update()
            .set((
                tool_settings::enabled.eq(excluded(tool_settings::enabled)),
                tool_settings::position.eq(excluded(tool_settings::position)),
                tool_settings::config.eq(excluded(tool_settings::config)),
                tool_settings::updated_at.eq(excluded(tool_settings::updated_at)),
            ))
            .get_result::<DbToolSetting>(&mut conn)?;

        Ok(ToolSetting::try_from(stored)?)
    }

    fn replace_tool_settings(
        &self,
        tenant_id: TenantId,
        settings: &[NewToolSetting],
    ) -> RepositoryResult<usize> {
        let mut conn = self.conn()?;
        conn.transaction::<_, RepositoryError, _>(|conn| {
            replace_settings(conn, tenant_id, settings)
        })
    }
}

/// Deletes the tenant's tool settings and inserts `settings` in their place.
/// Settings of other tenants are ignored. Callers own the transaction.
pub(crate) fn replace_settings(
    conn: &mut SqliteConnection,
    tenant_id: TenantId,
    settings: &[NewToolSetting],
) -> RepositoryResult<usize> {
    use crate::schema::tool_settings;

    let now = Utc::now().naive_utc();
    let insertables: Vec<DbNewToolSetting> = settings
        .iter()
        .filter(|setting| setting.tenant_id == tenant_id)
        .map(|setting| DbNewToolSetting::new(setting, now))
        .collect();

    diesel::delete(tool_settings::table.filter(tool_settings::tenant_id.eq(tenant_id.get())))
        .execute(conn)?;

    if insertables.is_empty() {
        return Ok(0);
    }

    let inserted = diesel::insert_into(tool_settings::table)
        .values(&insertables)
        .execute(conn)?;
    Ok(inserted)
}
