use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::tenant::NewTenant;
use crate::domain::types::{EmailAddress, TenantId, UserId, UserName};

text_enum!(
    /// Permission level of a user within its tenant.
    UserRole {
        Owner => "owner",
        Admin => "admin",
        Member => "member",
    }
);

impl UserRole {
    /// Owners and admins manage tools, users and onboarding.
    pub const fn is_admin(self) -> bool {
        matches!(self, UserRole::Owner | UserRole::Admin)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct User {
    pub id: UserId,
    pub tenant_id: TenantId,
    pub email: EmailAddress,
    pub name: UserName,
    pub role: UserRole,
    pub created_at: NaiveDateTime,
}

/// A user together with its stored password hash. Never serialized.
#[derive(Clone, Debug)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

#[derive(Clone, Debug)]
pub struct NewUser {
    pub tenant_id: TenantId,
    pub email: EmailAddress,
    pub name: UserName,
    pub password_hash: String,
    pub role: UserRole,
}

/// Sign-up of a new tenant together with its owner account.
#[derive(Clone, Debug)]
pub struct Registration {
    pub tenant: NewTenant,
    pub email: EmailAddress,
    pub name: UserName,
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_owner_and_admin_are_admins() {
        assert!(UserRole::Owner.is_admin());
        assert!(UserRole::Admin.is_admin());
        assert!(!UserRole::Member.is_admin());
    }
}
