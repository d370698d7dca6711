//! Request logic shared by the HTTP handlers.
//!
//! Every function takes the repository as a generic trait bound so that unit
//! tests can substitute the mockall mock, and the authenticated caller whose
//! tenant scopes every read and write.

use crate::auth::AuthenticatedUser;
use crate::domain::types::TypeConstraintError;
use crate::pagination::DEFAULT_ITEMS_PER_PAGE;

pub mod activities;
pub mod auth;
pub mod companies;
pub mod contacts;
pub mod deals;
pub mod errors;
pub mod onboarding;
pub mod tools;
pub mod users;

pub use errors::{ServiceError, ServiceResult};

/// Rejects callers that are not tenant administrators.
pub fn ensure_admin(user: &AuthenticatedUser) -> ServiceResult<()> {
    if user.is_admin() {
        Ok(())
    } else {
        log::warn!("User {} is not allowed to administer tenant {}", user.id, user.tenant_id);
        Err(ServiceError::Forbidden)
    }
}

/// Checks an id taken from the request path. Ids that can never exist answer
/// like a missing record.
pub(crate) fn path_id<T>(id: Result<T, TypeConstraintError>) -> ServiceResult<T> {
    id.map_err(|_| ServiceError::NotFound)
}

/// Highest page a list endpoint will query; its row offset still fits the
/// SQL `OFFSET` type.
const MAX_PAGE: usize = i64::MAX as usize / DEFAULT_ITEMS_PER_PAGE;

/// Requested page and page size for list endpoints.
pub(crate) fn page_request(page: Option<usize>) -> (usize, usize) {
    (page.unwrap_or(1).clamp(1, MAX_PAGE), DEFAULT_ITEMS_PER_PAGE)
}

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::Utc;

    use crate::auth::AuthenticatedUser;
    use crate::domain::types::{TenantId, UserId};
    use crate::domain::user::UserRole;

    pub fn user_with_role(role: UserRole) -> AuthenticatedUser {
        AuthenticatedUser {
            id: UserId::new(1).unwrap(),
            tenant_id: TenantId::new(10).unwrap(),
            email: "owner@example.com".to_string(),
            name: "Owner".to_string(),
            role,
        }
    }

    pub fn now() -> chrono::NaiveDateTime {
        Utc::now().naive_utc()
    }
}
