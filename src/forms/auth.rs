use serde::Deserialize;
use validator::Validate;

use crate::domain::types::{EmailAddress, TenantName, UserName};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Sign-up of a new workspace and its owner.
pub struct RegisterForm {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
    #[validate(length(min = 1, max = 200))]
    pub company_name: String,
}

#[derive(Debug)]
pub struct RegisterPayload {
    pub name: UserName,
    pub email: EmailAddress,
    pub password: String,
    pub company_name: TenantName,
}

impl TryFrom<RegisterForm> for RegisterPayload {
    type Error = FormError;

    fn try_from(form: RegisterForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: UserName::new(form.name)?,
            email: EmailAddress::new(form.email)?,
            password: form.password,
            company_name: TenantName::new(form.company_name)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}
