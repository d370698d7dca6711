use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::deal::{Deal, NewDeal, UpdateDeal};
use crate::domain::types::{DealId, TenantId};
use crate::models::deal::{Deal as DbDeal, NewDeal as DbNewDeal, UpdateDeal as DbUpdateDeal};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DealListQuery, DealReader, DealWriter, DieselRepository, like_pattern};

impl DealReader for DieselRepository {
    fn get_deal_by_id(&self, id: DealId, tenant_id: TenantId) -> RepositoryResult<Option<Deal>> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let db_deal = deals::table
            .filter(deals::id.eq(id.get()))
            .filter(deals::tenant_id.eq(tenant_id.get()))
            .first::<DbDeal>(&mut conn)
            .optional()?;

        db_deal
            .map(Deal::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_deals(&self, query: DealListQuery) -> RepositoryResult<(usize, Vec<Deal>)> {
        use crate::schema::deals;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = deals::table
                .filter(deals::tenant_id.eq(query.tenant_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(stage) = &query.stage {
                items = items.filter(deals::stage.eq(stage.as_str()));
            }
            if let Some(contact_id) = &query.contact_id {
                items = items.filter(deals::contact_id.eq(contact_id.get()));
            }
            if let Some(company_id) = &query.company_id {
                items = items.filter(deals::company_id.eq(company_id.get()));
            }
            if let Some(term) = query.search.as_deref().filter(|t| !t.trim().is_empty()) {
                items = items.filter(deals::title.like(like_pattern(term)));
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let deals = items
            .order((deals::updated_at.desc(), deals::id.desc()))
            .load::<DbDeal>(&mut conn)?
            .into_iter()
            .map(|db_deal| Deal::try_from(db_deal).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, deals))
    }
}

impl DealWriter for DieselRepository {
    fn create_deal(&self, new_deal: &NewDeal) -> RepositoryResult<Deal> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let db_new_deal: DbNewDeal = new_deal.into();

        let db_deal = diesel::insert_into(deals::table)
            .values(&db_new_deal)
            .get_result::<DbDeal>(&mut conn)?;

        Ok(Deal::try_from(db_deal)?)
    }

    fn update_deal(
        &self,
        id: DealId,
        tenant_id: TenantId,
        updates: &UpdateDeal,
    ) -> RepositoryResult<Deal> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateDeal::new(updates, Utc::now().naive_utc());

        let target = deals::table
            .filter(deals::id.eq(id.get()))
            .filter(deals::tenant_id.eq(tenant_id.get()));

        let db_deal = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbDeal>(&mut conn)?;

        Ok(Deal::try_from(db_deal)?)
    }

    fn delete_deal(&self, id: DealId, tenant_id: TenantId) -> RepositoryResult<()> {
        use crate::schema::deals;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            deals::table
                .filter(deals::id.eq(id.get()))
                .filter(deals::tenant_id.eq(tenant_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
