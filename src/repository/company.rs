use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::company::{Company, NewCompany, UpdateCompany};
use crate::domain::types::{CompanyId, TenantId};
use crate::models::company::{
    Company as DbCompany, NewCompany as DbNewCompany, UpdateCompany as DbUpdateCompany,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{CompanyListQuery, CompanyReader, CompanyWriter, DieselRepository, like_pattern};

impl CompanyReader for DieselRepository {
    fn get_company_by_id(
        &self,
        id: CompanyId,
        tenant_id: TenantId,
    ) -> RepositoryResult<Option<Company>> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let db_company = companies::table
            .filter(companies::id.eq(id.get()))
            .filter(companies::tenant_id.eq(tenant_id.get()))
            .first::<DbCompany>(&mut conn)
            .optional()?;

        db_company
            .map(Company::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_companies(&self, query: CompanyListQuery) -> RepositoryResult<(usize, Vec<Company>)> {
        use crate::schema::companies;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = companies::table
                .filter(companies::tenant_id.eq(query.tenant_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(term) = query.search.as_deref().filter(|t| !t.trim().is_empty()) {
                let pattern = like_pattern(term);
                items = items.filter(
                    companies::name
                        .like(pattern.clone())
                        .or(companies::industry.like(pattern.clone()))
                        .or(companies::website.like(pattern)),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let companies = items
            .order((companies::name.asc(), companies::id.asc()))
            .load::<DbCompany>(&mut conn)?
            .into_iter()
            .map(|db_company| Company::try_from(db_company).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, companies))
    }
}

impl CompanyWriter for DieselRepository {
    fn create_company(&self, new_company: &NewCompany) -> RepositoryResult<Company> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let db_new_company: DbNewCompany = new_company.into();

        let db_company = diesel::insert_into(companies::table)
            .values(&db_new_company)
            .get_result::<DbCompany>(&mut conn)?;

        Ok(Company::try_from(db_company)?)
    }

    fn update_company(
        &self,
        id: CompanyId,
        tenant_id: TenantId,
        updates: &UpdateCompany,
    ) -> RepositoryResult<Company> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateCompany::new(updates, Utc::now().naive_utc());

        let target = companies::table
            .filter(companies::id.eq(id.get()))
            .filter(companies::tenant_id.eq(tenant_id.get()));

        let db_company = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbCompany>(&mut conn)?;

        Ok(Company::try_from(db_company)?)
    }

    /// Contacts and deals of the company keep existing with the link cleared.
    fn delete_company(&self, id: CompanyId, tenant_id: TenantId) -> RepositoryResult<()> {
        use crate::schema::companies;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            companies::table
                .filter(companies::id.eq(id.get()))
                .filter(companies::tenant_id.eq(tenant_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
