use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::deals::{DealForm, DealListParams};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, deals as deals_service};

#[get("/deals")]
pub async fn list_deals(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<DealListParams>,
) -> Result<HttpResponse, ServiceError> {
    let deals = deals_service::list_deals(repo.get_ref(), &user, params)?;
    Ok(HttpResponse::Ok().json(deals))
}

#[post("/deals")]
pub async fn create_deal(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<DealForm>,
) -> Result<HttpResponse, ServiceError> {
    let deal = deals_service::create_deal(repo.get_ref(), &user, form)?;
    Ok(HttpResponse::Ok().json(deal))
}

#[get("/deals/{deal_id}")]
pub async fn show_deal(
    deal_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let deal = deals_service::get_deal(repo.get_ref(), &user, deal_id.into_inner())?;
    Ok(HttpResponse::Ok().json(deal))
}

#[put("/deals/{deal_id}")]
pub async fn update_deal(
    deal_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<DealForm>,
) -> Result<HttpResponse, ServiceError> {
    let deal = deals_service::update_deal(repo.get_ref(), &user, deal_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(deal))
}

#[delete("/deals/{deal_id}")]
pub async fn delete_deal(
    deal_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    deals_service::delete_deal(repo.get_ref(), &user, deal_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
