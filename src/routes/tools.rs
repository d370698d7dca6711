use actix_web::{HttpResponse, get, post, web};
use chrono::Utc;

use crate::auth::AuthenticatedUser;
use crate::forms::tools::{ToolActionForm, ToolsQuery, ToolsView};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, tools as tools_service};

#[get("/tools")]
pub async fn show_tools(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(query): web::Query<ToolsQuery>,
) -> Result<HttpResponse, ServiceError> {
    match query.action {
        ToolsView::Dashboard => {
            let dashboard =
                tools_service::load_dashboard(repo.get_ref(), &user, Utc::now().naive_utc())?;
            Ok(HttpResponse::Ok().json(dashboard))
        }
        ToolsView::Settings => {
            let settings = tools_service::load_tool_settings(repo.get_ref(), &user)?;
            Ok(HttpResponse::Ok().json(settings))
        }
    }
}

#[post("/tools")]
pub async fn update_tools(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ToolActionForm>,
) -> Result<HttpResponse, ServiceError> {
    let settings = tools_service::apply_tool_action(repo.get_ref(), &user, form)?;
    Ok(HttpResponse::Ok().json(settings))
}
