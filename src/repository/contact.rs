use chrono::Utc;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::contact::{Contact, NewContact, UpdateContact};
use crate::domain::types::{ContactId, TenantId};
use crate::models::contact::{
    Contact as DbContact, NewContact as DbNewContact, UpdateContact as DbUpdateContact,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ContactListQuery, ContactReader, ContactWriter, DieselRepository, like_pattern};

impl ContactReader for DieselRepository {
    fn get_contact_by_id(
        &self,
        id: ContactId,
        tenant_id: TenantId,
    ) -> RepositoryResult<Option<Contact>> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let db_contact = contacts::table
            .filter(contacts::id.eq(id.get()))
            .filter(contacts::tenant_id.eq(tenant_id.get()))
            .first::<DbContact>(&mut conn)
            .optional()?;

        db_contact
            .map(Contact::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_contacts(&self, query: ContactListQuery) -> RepositoryResult<(usize, Vec<Contact>)> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = contacts::table
                .filter(contacts::tenant_id.eq(query.tenant_id.get()))
                .into_boxed::<Sqlite>();

            if let Some(status) = &query.status {
                items = items.filter(contacts::status.eq(status.as_str()));
            }

            if let Some(company_id) = &query.company_id {
                items = items.filter(contacts::company_id.eq(company_id.get()));
            }

            if let Some(term) = query.search.as_deref().filter(|t| !t.trim().is_empty()) {
                let pattern = like_pattern(term);
                items = items.filter(
                    contacts::first_name
                        .like(pattern.clone())
                        .or(contacts::last_name.like(pattern.clone()))
                        .or(contacts::email.like(pattern.clone()))
                        .or(contacts::phone.like(pattern.clone()))
                        .or(contacts::position.like(pattern)),
                );
            }

            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            items = items.offset(pagination.offset()).limit(pagination.limit());
        }

        let contacts = items
            .order((contacts::last_name.asc(), contacts::first_name.asc(), contacts::id.asc()))
            .load::<DbContact>(&mut conn)?
            .into_iter()
            .map(|db_contact| Contact::try_from(db_contact).map_err(RepositoryError::from))
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, contacts))
    }
}

impl ContactWriter for DieselRepository {
    fn create_contact(&self, new_contact: &NewContact) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let db_new_contact: DbNewContact = new_contact.into();

        let db_contact = diesel::insert_into(contacts::table)
            .values(&db_new_contact)
            .get_result::<DbContact>(&mut conn)?;

        Ok(Contact::try_from(db_contact)?)
    }

    fn create_contacts(&self, new_contacts: &[NewContact]) -> RepositoryResult<usize> {
        use crate::schema::contacts;

        if new_contacts.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let insertables: Vec<DbNewContact> = new_contacts.iter().map(Into::into).collect();

        conn.transaction::<_, RepositoryError, _>(|conn| {
            let mut inserted = 0;
            for chunk in insertables.chunks(200) {
                inserted += diesel::insert_into(contacts::table)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok(inserted)
        })
    }

    fn update_contact(
        &self,
        id: ContactId,
        tenant_id: TenantId,
        updates: &UpdateContact,
    ) -> RepositoryResult<Contact> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let db_updates = DbUpdateContact::new(updates, Utc::now().naive_utc());

        let target = contacts::table
            .filter(contacts::id.eq(id.get()))
            .filter(contacts::tenant_id.eq(tenant_id.get()));

        let db_contact = diesel::update(target)
            .set(&db_updates)
            .get_result::<DbContact>(&mut conn)?;

        Ok(Contact::try_from(db_contact)?)
    }

    fn delete_contact(&self, id: ContactId, tenant_id: TenantId) -> RepositoryResult<()> {
        use crate::schema::contacts;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(
            contacts::table
                .filter(contacts::id.eq(id.get()))
                .filter(contacts::tenant_id.eq(tenant_id.get())),
        )
        .execute(&mut conn)?;

        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }
}
