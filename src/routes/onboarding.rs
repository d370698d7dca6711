use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::forms::onboarding::OnboardingForm;
use crate::repository::DieselRepository;
use crate::services::{ServiceError, onboarding as onboarding_service};

#[get("/onboarding")]
pub async fn show_onboarding(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let status = onboarding_service::get_onboarding(repo.get_ref(), &user)?;
    Ok(HttpResponse::Ok().json(status))
}

#[post("/onboarding")]
pub async fn submit_onboarding(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<OnboardingForm>,
) -> Result<HttpResponse, ServiceError> {
    let status =
        onboarding_service::submit_step(repo.get_ref(), &user, form, Utc::now().naive_utc())?;
    Ok(HttpResponse::Ok().json(status))
}
