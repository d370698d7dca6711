//! HTTP handlers.
//!
//! JSON handlers under `/api` return `Result<HttpResponse, ServiceError>`;
//! service errors render as `{"error": message}` with a matching status code.

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError, web};
use serde_json::json;

use crate::services::ServiceError;

pub mod activities;
pub mod auth;
pub mod companies;
pub mod contacts;
pub mod deals;
pub mod marketing;
pub mod onboarding;
pub mod tools;
pub mod users;

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Unauthorized | ServiceError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ServiceError::Forbidden => StatusCode::FORBIDDEN,
            ServiceError::NotFound => StatusCode::NOT_FOUND,
            ServiceError::Form(_) | ServiceError::TypeConstraint(_) => StatusCode::BAD_REQUEST,
            ServiceError::Conflict(_) => StatusCode::CONFLICT,
            ServiceError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(json!({ "error": self.to_string() }))
    }
}

/// Malformed JSON bodies and query strings answer with the same error shape
/// as the services.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected JSON body: {err}");
        ServiceError::Form(err.to_string()).into()
    })
}

fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        log::debug!("Rejected query string: {err}");
        ServiceError::Form(err.to_string()).into()
    })
}

/// Mounts every JSON endpoint. Expected to be called inside the `/api` scope.
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(query_config())
        .service(auth::register)
        .service(auth::login)
        .service(auth::me)
        .service(contacts::list_contacts)
        .service(contacts::create_contact)
        .service(contacts::import_contacts)
        .service(contacts::show_contact)
        .service(contacts::update_contact)
        .service(contacts::delete_contact)
        .service(companies::list_companies)
        .service(companies::create_company)
        .service(companies::show_company)
        .service(companies::update_company)
        .service(companies::delete_company)
        .service(deals::list_deals)
        .service(deals::create_deal)
        .service(deals::show_deal)
        .service(deals::update_deal)
        .service(deals::delete_deal)
        .service(activities::list_activities)
        .service(activities::create_activity)
        .service(activities::show_activity)
        .service(activities::update_activity)
        .service(activities::complete_activity)
        .service(activities::delete_activity)
        .service(users::list_users)
        .service(users::create_user)
        .service(onboarding::show_onboarding)
        .service(onboarding::submit_onboarding)
        .service(tools::show_tools)
        .service(tools::update_tools);
}

/// Mounts the server-rendered marketing pages.
pub fn configure_pages(cfg: &mut web::ServiceConfig) {
    cfg.service(marketing::show_index)
        .service(marketing::show_pricing);
}
