use crate::auth::AuthenticatedUser;
use crate::domain::user::{NewUser, User};
use crate::forms::users::{CreateUserForm, CreateUserPayload};
use crate::models::config::ServerConfig;
use crate::repository::{UserReader, UserWriter};
use crate::services::auth::hash_password;
use crate::services::{ServiceError, ServiceResult, ensure_admin};

pub fn list_users<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<Vec<User>>
where
    R: UserReader + ?Sized,
{
    ensure_admin(user)?;

    Ok(repo.list_users(user.tenant_id)?)
}

/// Adds a user to the caller's tenant.
pub fn create_user<R>(
    repo: &R,
    user: &AuthenticatedUser,
    config: &ServerConfig,
    form: CreateUserForm,
) -> ServiceResult<User>
where
    R: UserReader + UserWriter + ?Sized,
{
    ensure_admin(user)?;

    let payload = CreateUserPayload::try_from(form)?;

    if repo.get_user_credentials_by_email(&payload.email)?.is_some() {
        return Err(ServiceError::Conflict(
            "email is already registered".to_string(),
        ));
    }

    let new_user = NewUser {
        tenant_id: user.tenant_id,
        email: payload.email,
        name: payload.name,
        password_hash: hash_password(&payload.password, config.bcrypt_cost)?,
        role: payload.role,
    };

    let created = repo.create_user(&new_user).map_err(|err| {
        log::error!("Failed to create user: {err}");
        err
    })?;

    log::info!(
        "User {} added {} to tenant {}",
        user.id,
        created.email,
        user.tenant_id
    );

    Ok(created)
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::user::UserRole;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::user_with_role;

    #[test]
    fn members_cannot_list_users() {
        let mut repo = MockRepository::new();
        repo.expect_list_users().never();

        let result = list_users(&repo, &user_with_role(UserRole::Member));
        assert!(matches!(result, Err(ServiceError::Forbidden)));
    }

    #[test]
    fn admins_list_their_own_tenant() {
        let caller = user_with_role(UserRole::Admin);
        let tenant_id = caller.tenant_id;
        let mut repo = MockRepository::new();
        repo.expect_list_users()
            .withf(move |id| *id == tenant_id)
            .times(1)
            .returning(|_| Ok(vec![]));

        assert!(list_users(&repo, &caller).unwrap().is_empty());
    }
}
