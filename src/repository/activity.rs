use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::activity::{Activity, NewActivity, UpdateActivity};
use crate::domain::types::{ActivityId, TenantId};
use crate::models::activity::{
    Activity as DbActivity, NewActivity as DbNewActivity, UpdateActivity as DbUpdateActivity,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ActivityListQuery, ActivityReader, ActivityWriter, DieselRepository};

impl ActivityReader for DieselRepository {
    fn get_activity_by_id(
        &self,
        id: ActivityId,
        tenant_id: TenantId,
    ) -> RepositoryResult<Option<Activity>> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let db_activity = activities::table
            .filter(activities::id.eq(id.get()))
            .filter(activities::tenant_id.eq(tenant_id.get()))
            .first::<DbActivity>(&mut conn)
            .optional()?;

        db_activity
            .map(Activity::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_activities(
        &self,
        query: ActivityListQuery,
    ) -> RepositoryResult<(usize, Vec<Activity>)> {
        use crate::schema::activities;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = activities::table
                .filter(activities::tenant_id.eq(query.tenant_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(activity_type) = &query.activity_type {
                items = items.filter(activities::activity_type.eq(activity_type.as_str()));
            }
            if let Some(completed) = query.completed {
                items = items.filter(activities::completed.eq(completed));
            }
            if let Some(contact_id) = &query.contact_id {
                items = items.filter(activities::contact_id.eq(contact_id.get()));
            }
            if let Some(deal_id) = &query.deal_id {
                items = items.filter(activities::deal_id.eq(deal_id.get()));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        // Open items first, soonest due first, undated last.
        let activities = items
            .order((
                activities::completed.asc(),
                activities::due_at.is_null().asc(),
                activities::due_at.asc(),
                activities::id.desc(),
            ))
            .load::<DbActivity>(&mut conn)?
            .into_iter()
            .map(|db_activity| Activity::try_from(db_activity).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, activities))
    }
}

impl ActivityWriter for DieselRepository {
    fn create_activity(&self, new_activity: &NewActivity) -> RepositoryResult<Activity> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let db_new_activity: DbNewActivity = new_activity.into();

        let db_activity = diesel::insert_into(activities::table)
            .values(&db_new_activity)
            .get_result::<DbActivity>(&mut conn)?;

        Ok(Activity::try_from(db_activity)?)
    }

    fn update_activity(
        &self,
        id: ActivityId,
        tenant_id: TenantId,
        updates: &UpdateActivity,
    ) -> RepositoryResult<Activity> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateActivity::new(updates, Utc::now().naive_utc());

        let target = activities::table
            .filter(activities::id.eq(id.get()))
            .filter(activities::tenant_id.eq(tenant_id.get()));

        let db_activity = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbActivity>(&mut conn)?;

        Ok(Activity::try_from(db_activity)?)
    }

    fn complete_activity(
        &self,
        id: ActivityId,
        tenant_id: TenantId,
    ) -> RepositoryResult<Activity> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let target = activities::table
            .filter(activities::id.eq(id.get()))
            .filter(activities::tenant_id.eq(tenant_id.get()));

        let db_activity = diesel::update(target)
            .set((
                activities::completed.eq(true),
                activities::updated_at.eq(Utc::now().naive_utc()),
            ))
            .get_result::<DbActivity>(&mut conn)?;

        Ok(Activity::try_from(db_activity)?)
    }

    fn delete_activity(&self, id: ActivityId, tenant_id: TenantId) -> RepositoryResult<()> {
        use crate::schema::activities;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            activities::table
                .filter(activities::id.eq(id.get()))
                .filter(activities::tenant_id.eq(tenant_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
