use actix_web::{HttpResponse, get, post, web};

use crate::auth::AuthenticatedUser;
use crate::forms::users::CreateUserForm;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, users as users_service};

#[get("/users")]
pub async fn list_users(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let users = users_service::list_users(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(users))
}

#[post("/users")]
pub async fn create_user(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    server_config: web::Data<ServerConfig>,
    web::Json(form): web::Json<CreateUserForm>,
) -> Result<HttpResponse, ServiceError> {
    let created = users_service::create_user(repo.get_ref(), &user, &server_config, form)?;
    Ok(HttpResponse::Ok().json(created))
}
