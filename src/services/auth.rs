//! Registration, login and the current-session lookup.

use crate::auth::{AuthenticatedUser, issue_token};
use crate::domain::tenant::NewTenant;
use crate::domain::types::EmailAddress;
use crate::domain::user::Registration;
use crate::dto::auth::{AuthResponse, MeResponse, TenantDto};
use crate::forms::auth::{LoginForm, RegisterForm, RegisterPayload};
use crate::models::config::ServerConfig;
use crate::repository::{TenantReader, TenantWriter, UserReader};
use crate::services::{ServiceError, ServiceResult};

/// Hashes a password with the configured bcrypt cost.
pub fn hash_password(password: &str, cost: u32) -> ServiceResult<String> {
    bcrypt::hash(password, cost).map_err(|err| {
        log::error!("Failed to hash password: {err}");
        ServiceError::Internal
    })
}

/// Creates a tenant with its owner and signs the owner in.
pub fn register<R>(repo: &R, config: &ServerConfig, form: RegisterForm) -> ServiceResult<AuthResponse>
where
    R: TenantWriter + UserReader + ?Sized,
{
    let payload = RegisterPayload::try_from(form)?;

    if repo.get_user_credentials_by_email(&payload.email)?.is_some() {
        return Err(ServiceError::Conflict(
            "email is already registered".to_string(),
        ));
    }

    let registration = Registration {
        tenant: NewTenant::new(payload.company_name),
        email: payload.email,
        name: payload.name,
        password_hash: hash_password(&payload.password, config.bcrypt_cost)?,
    };

    let (tenant, user) = repo.register_tenant(&registration).map_err(|err| {
        log::error!("Failed to register tenant: {err}");
        err
    })?;

    log::info!("Registered tenant {} with owner {}", tenant.id, user.email);

    let token = issue_token(&user, &config.secret, config.token_ttl_hours)?;
    Ok(AuthResponse {
        token,
        user,
        tenant: TenantDto::from(&tenant),
    })
}

/// Verifies the credentials. Unknown emails and wrong passwords are
/// indistinguishable to the caller.
pub fn login<R>(repo: &R, config: &ServerConfig, form: LoginForm) -> ServiceResult<AuthResponse>
where
    R: TenantReader + UserReader + ?Sized,
{
    let email = EmailAddress::new(form.email).map_err(|_| ServiceError::InvalidCredentials)?;

    let credentials = repo
        .get_user_credentials_by_email(&email)?
        .ok_or(ServiceError::InvalidCredentials)?;

    let valid = bcrypt::verify(&form.password, &credentials.password_hash).map_err(|err| {
        log::error!(
            "Failed to verify password of user {}: {err}",
            credentials.user.id
        );
        ServiceError::Internal
    })?;
    if !valid {
        return Err(ServiceError::InvalidCredentials);
    }

    let user = credentials.user;
    let tenant = repo
        .get_tenant_by_id(user.tenant_id)?
        .ok_or(ServiceError::NotFound)?;

    let token = issue_token(&user, &config.secret, config.token_ttl_hours)?;
    Ok(AuthResponse {
        token,
        user,
        tenant: TenantDto::from(&tenant),
    })
}

/// Returns the caller with its tenant.
pub fn me<R>(repo: &R, user: &AuthenticatedUser) -> ServiceResult<MeResponse>
where
    R: TenantReader + UserReader + ?Sized,
{
    let current = repo
        .get_user_by_id(user.id, user.tenant_id)?
        .ok_or(ServiceError::Unauthorized)?;
    let tenant = repo
        .get_tenant_by_id(user.tenant_id)?
        .ok_or(ServiceError::NotFound)?;

    Ok(MeResponse {
        user: current,
        onboarding_completed: tenant.onboarding_completed,
        tenant: TenantDto::from(&tenant),
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::onboarding::OnboardingState;
    use crate::domain::tenant::{BillingPlan, Tenant};
    use crate::domain::types::{TenantId, TenantName, UserId, UserName};
    use crate::domain::user::{User, UserCredentials, UserRole};
    use crate::repository::mock::MockRepository;

    fn config() -> ServerConfig {
        ServerConfig {
            address: "127.0.0.1".into(),
            port: 8080,
            database_url: ":memory:".into(),
            templates_dir: "templates/**/*".into(),
            assets_dir: "assets".into(),
            secret: "test-secret".into(),
            token_ttl_hours: 1,
            bcrypt_cost: 4,
        }
    }

    fn tenant() -> Tenant {
        let now = Utc::now().naive_utc();
        Tenant {
            id: TenantId::new(10).unwrap(),
            name: TenantName::new("Acme").unwrap(),
            plan: BillingPlan::Free,
            onboarding: OnboardingState::default(),
            onboarding_completed: false,
            created_at: now,
            updated_at: now,
        }
    }

    fn user() -> User {
        User {
            id: UserId::new(1).unwrap(),
            tenant_id: TenantId::new(10).unwrap(),
            email: EmailAddress::new("owner@example.com").unwrap(),
            name: UserName::new("Owner").unwrap(),
            role: UserRole::Owner,
            created_at: Utc::now().naive_utc(),
        }
    }

    fn register_form(email: &str) -> RegisterForm {
        RegisterForm {
            name: "Owner".into(),
            email: email.into(),
            password: "correct horse".into(),
            company_name: "Acme".into(),
        }
    }

    #[test]
    fn register_creates_tenant_and_issues_token() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_credentials_by_email()
            .returning(|_| Ok(None));
        repo.expect_register_tenant()
            .withf(|registration| {
                registration.tenant.name.as_str() == "Acme"
                    && registration.email.as_str() == "owner@example.com"
                    && registration.password_hash.starts_with("$2")
            })
            .times(1)
            .returning(|_| Ok((tenant(), user())));

        let response = register(&repo, &config(), register_form("Owner@Example.com")).unwrap();

        assert!(!response.token.is_empty());
        assert_eq!(response.tenant.plan, BillingPlan::Free);
        assert!(!response.tenant.onboarding_completed);
    }

    #[test]
    fn register_rejects_taken_email() {
        let mut repo = MockRepository::new();
        repo.expect_get_user_credentials_by_email().returning(|_| {
            Ok(Some(UserCredentials {
                user: user(),
                password_hash: "hash".into(),
            }))
        });
        repo.expect_register_tenant().never();

        let result = register(&repo, &config(), register_form("owner@example.com"));
        assert!(matches!(result, Err(ServiceError::Conflict(_))));
    }

    #[test]
    fn login_hides_which_part_was_wrong() {
        let hash = bcrypt::hash("correct horse", 4).unwrap();
        let mut repo = MockRepository::new();
        repo.expect_get_user_credentials_by_email()
            .returning(move |email| {
                if email.as_str() == "owner@example.com" {
                    Ok(Some(UserCredentials {
                        user: user(),
                        password_hash: hash.clone(),
                    }))
                } else {
                    Ok(None)
                }
            });
        repo.expect_get_tenant_by_id()
            .returning(|_| Ok(Some(tenant())));

        let wrong_password = login(
            &repo,
            &config(),
            LoginForm {
                email: "owner@example.com".into(),
                password: "wrong".into(),
            },
        );
        let unknown_email = login(
            &repo,
            &config(),
            LoginForm {
                email: "ghost@example.com".into(),
                password: "correct horse".into(),
            },
        );
        assert_eq!(
            wrong_password.unwrap_err().to_string(),
            unknown_email.unwrap_err().to_string()
        );

        let ok = login(
            &repo,
            &config(),
            LoginForm {
                email: "owner@example.com".into(),
                password: "correct horse".into(),
            },
        )
        .unwrap();
        assert_eq!(ok.user.id.get(), 1);
    }
}
