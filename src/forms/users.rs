use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{EmailAddress, UserName};
use crate::domain::user::UserRole;
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Invitation of a user into the caller's tenant.
pub struct CreateUserForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    pub role: Option<UserRole>,
}

#[derive(Debug)]
pub struct CreateUserPayload {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: String,
    pub role: UserRole,
}

impl TryFrom<CreateUserForm> for CreateUserPayload {
    type Error = FormError;

    fn try_from(form: CreateUserForm) -> Result<Self, Self::Error> {
        form.validate()?;

        // Every tenant has exactly one owner, created at sign-up.
        let role = form.role.unwrap_or(UserRole::Member);
        if role == UserRole::Owner {
            return Err(FormError::RoleNotAssignable(role.to_string()));
        }

        Ok(Self {
            name: UserName::new(form.name)?,
            email: EmailAddress::new(form.email)?,
            password: form.password,
            role,
        })
    }
}
