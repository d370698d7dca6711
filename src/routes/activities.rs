use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::activities::{ActivityForm, ActivityListParams};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, activities as activities_service};

#[get("/activities")]
pub async fn list_activities(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<ActivityListParams>,
) -> Result<HttpResponse, ServiceError> {
    let activities = activities_service::list_activities(repo.get_ref(), &user, params)?;
    Ok(HttpResponse::Ok().json(activities))
}

#[post("/activities")]
pub async fn create_activity(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ActivityForm>,
) -> Result<HttpResponse, ServiceError> {
    let activity = activities_service::create_activity(repo.get_ref(), &user, form)?;
    Ok(HttpResponse::Ok().json(activity))
}

#[get("/activities/{activity_id}")]
pub async fn show_activity(
    activity_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let activity =
        activities_service::get_activity(repo.get_ref(), &user, activity_id.into_inner())?;
    Ok(HttpResponse::Ok().json(activity))
}

#[put("/activities/{activity_id}")]
pub async fn update_activity(
    activity_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ActivityForm>,
) -> Result<HttpResponse, ServiceError> {
    let activity = activities_service::update_activity(
        repo.get_ref(),
        &user,
        activity_id.into_inner(),
        form,
    )?;
    Ok(HttpResponse::Ok().json(activity))
}

#[post("/activities/{activity_id}/complete")]
pub async fn complete_activity(
    activity_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let activity =
        activities_service::complete_activity(repo.get_ref(), &user, activity_id.into_inner())?;
    Ok(HttpResponse::Ok().json(activity))
}

#[delete("/activities/{activity_id}")]
pub async fn delete_activity(
    activity_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    activities_service::delete_activity(repo.get_ref(), &user, activity_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
