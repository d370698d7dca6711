use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::companies::{CompanyForm, CompanyListParams};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, companies as companies_service};

#[get("/companies")]
pub async fn list_companies(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<CompanyListParams>,
) -> Result<HttpResponse, ServiceError> {
    let companies = companies_service::list_companies(repo.get_ref(), &user, params)?;
    Ok(HttpResponse::Ok().json(companies))
}

#[post("/companies")]
pub async fn create_company(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CompanyForm>,
) -> Result<HttpResponse, ServiceError> {
    let company = companies_service::create_company(repo.get_ref(), &user, form)?;
    Ok(HttpResponse::Ok().json(company))
}

#[get("/companies/{company_id}")]
pub async fn show_company(
    company_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let detail = companies_service::get_company(repo.get_ref(), &user, company_id.into_inner())?;
    Ok(HttpResponse::Ok().json(detail))
}

#[put("/companies/{company_id}")]
pub async fn update_company(
    company_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<CompanyForm>,
) -> Result<HttpResponse, ServiceError> {
    let company =
        companies_service::update_company(repo.get_ref(), &user, company_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(company))
}

#[delete("/companies/{company_id}")]
pub async fn delete_company(
    company_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    companies_service::delete_company(repo.get_ref(), &user, company_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
