//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs carrying the user and tenant ids. Every request
//! re-reads the user so that deleted accounts lose access immediately.

use std::future::{Ready, ready};

use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, web};
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::domain::types::{TenantId, UserId};
use crate::domain::user::{User, UserRole};
use crate::models::config::ServerConfig;
use crate::repository::{DieselRepository, UserReader};
use crate::services::ServiceError;

/// JWT payload.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User id.
    pub sub: String,
    pub tenant_id: i32,
    pub email: String,
    pub role: String,
    pub exp: i64,
}

impl Claims {
    pub fn new(user: &User, ttl_hours: i64) -> Self {
        let exp = Utc::now() + Duration::hours(ttl_hours);
        Self {
            sub: user.id.to_string(),
            tenant_id: user.tenant_id.get(),
            email: user.email.to_string(),
            role: user.role.to_string(),
            exp: exp.timestamp(),
        }
    }
}

pub fn issue_token(user: &User, secret: &str, ttl_hours: i64) -> Result<String, ServiceError> {
    let claims = Claims::new(user, ttl_hours);
    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| {
        log::error!("Failed to sign token for user {}: {err}", user.id);
        ServiceError::Internal
    })
}

pub fn verify_token(token: &str, secret: &str) -> Result<Claims, ServiceError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|err| {
        log::debug!("Rejected bearer token: {err}");
        ServiceError::Unauthorized
    })
}

/// The caller of an API request, resolved from its bearer token.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AuthenticatedUser {
    pub id: UserId,
    pub tenant_id: TenantId,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            tenant_id: user.tenant_id,
            email: user.email.to_string(),
            name: user.name.to_string(),
            role: user.role,
        }
    }
}

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ServiceError> {
    let token = bearer_token(req).ok_or(ServiceError::Unauthorized)?;

    let config = req.app_data::<web::Data<ServerConfig>>().ok_or_else(|| {
        log::error!("ServerConfig is not registered as app data");
        ServiceError::Internal
    })?;
    let repo = req.app_data::<web::Data<DieselRepository>>().ok_or_else(|| {
        log::error!("DieselRepository is not registered as app data");
        ServiceError::Internal
    })?;

    let claims = verify_token(token, &config.secret)?;
    let user_id = claims
        .sub
        .parse::<i32>()
        .ok()
        .and_then(|id| UserId::new(id).ok())
        .ok_or(ServiceError::Unauthorized)?;
    let tenant_id = TenantId::new(claims.tenant_id).map_err(|_| ServiceError::Unauthorized)?;

    let user = repo
        .get_user_by_id(user_id, tenant_id)?
        .ok_or(ServiceError::Unauthorized)?;

    Ok(AuthenticatedUser::from(&user))
}

impl FromRequest for AuthenticatedUser {
    type Error = ServiceError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}
