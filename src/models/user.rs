//! Diesel models representing tenant users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::types::{EmailAddress, TenantId, TypeConstraintError, UserId, UserName};
use crate::domain::user::{
    NewUser as DomainNewUser, User as DomainUser, UserCredentials as DomainUserCredentials,
};
use crate::models::tenant::Tenant;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Tenant, foreign_key = tenant_id))]
#[diesel(table_name = crate::schema::users)]
/// Diesel model for [`crate::domain::user::User`].
pub struct User {
    pub id: i32,
    pub tenant_id: i32,
    pub email: String,
    pub name: String,
    pub password_hash: String,
    pub role: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
/// Insertable form of [`User`].
pub struct NewUser<'a> {
    pub tenant_id: i32,
    pub email: &'a str,
    pub name: &'a str,
    pub password_hash: &'a str,
    pub role: &'a str,
}

impl TryFrom<User> for DomainUserCredentials {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        let password_hash = user.password_hash.clone();
        Ok(Self {
            user: DomainUser::try_from(user)?,
            password_hash,
        })
    }
}

impl TryFrom<User> for DomainUser {
    type Error = TypeConstraintError;

    fn try_from(user: User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: UserId::new(user.id)?,
            tenant_id: TenantId::new(user.tenant_id)?,
            email: EmailAddress::new(user.email)?,
            name: UserName::new(user.name)?,
            role: user.role.parse()?,
            created_at: user.created_at,
        })
    }
}

impl<'a> From<&'a DomainNewUser> for NewUser<'a> {
    fn from(user: &'a DomainNewUser) -> Self {
        Self {
            tenant_id: user.tenant_id.get(),
            email: user.email.as_str(),
            name: user.name.as_str(),
            password_hash: user.password_hash.as_str(),
            role: user.role.as_str(),
        }
    }
}
