//! Repository implementation for tenant users.

use diesel::prelude::*;

use crate::domain::types::{EmailAddress, TenantId, UserId};
use crate::domain::user::{NewUser, User, UserCredentials};
use crate::models::user::{NewUser as DbNewUser, User as DbUser};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, UserReader, UserWriter};

impl UserReader for DieselRepository {
    fn get_user_by_id(&self, id: UserId, tenant_id: TenantId) -> RepositoryResult<Option<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::id.eq(id.get()))
            .filter(users::tenant_id.eq(tenant_id.get()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user
            .map(User::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn get_user_credentials_by_email(
        &self,
        email: &EmailAddress,
    ) -> RepositoryResult<Option<UserCredentials>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_user = users::table
            .filter(users::email.eq(email.as_str()))
            .first::<DbUser>(&mut conn)
            .optional()?;

        db_user
            .map(UserCredentials::try_from)
            .transpose()
            .map_err(RepositoryError::from)
    }

    fn list_users(&self, tenant_id: TenantId) -> RepositoryResult<Vec<User>> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        users::table
            .filter(users::tenant_id.eq(tenant_id.get()))
            .order(users::id.asc())
            .load::<DbUser>(&mut conn)?
            .into_iter()
            .map(|db_user| User::try_from(db_user).map_err(RepositoryError::from))
            .collect()
    }
}

impl UserWriter for DieselRepository {
    fn create_user(&self, new_user: &NewUser) -> RepositoryResult<User> {
        use crate::schema::users;

        let mut conn = self.conn()?;
        let db_new_user: DbNewUser = new_user.into();

        let db_user = diesel::insert_into(users::table)
            .values(&db_new_user)
            .get_result::<DbUser>(&mut conn)?;

        Ok(User::try_from(db_user)?)
    }
}
