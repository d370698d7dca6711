use actix_web::{HttpResponse, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::auth::{LoginForm, RegisterForm};
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, auth as auth_service};

#[post("/auth/register")]
pub async fn register(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<RegisterForm>,
) -> Result<HttpResponse, ServiceError> {
    let response = auth_service::register(repo.get_ref(), &server_config, form)?;
    Ok(HttpResponse::Ok().json(response))
}

#[post("/auth/login")]
pub async fn login(
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<LoginForm>,
) -> Result<HttpResponse, ServiceError> {
    let response = auth_service::login(repo.get_ref(), &server_config, form)?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/auth/me")]
pub async fn me(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let response = auth_service::me(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(response))
}
