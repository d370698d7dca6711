use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::auth::AuthenticatedUser;
use crate::forms::contacts::{ContactForm, ContactListParams, ImportContactsForm};
use crate::repository::DieselRepository;
use crate::services::{ServiceError, contacts as contacts_service};

#[get("/contacts")]
pub async fn list_contacts(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Query(params): web::Query<ContactListParams>,
) -> Result<HttpResponse, ServiceError> {
    let contacts = contacts_service::list_contacts(repo.get_ref(), &user, params)?;
    Ok(HttpResponse::Ok().json(contacts))
}

#[post("/contacts")]
pub async fn create_contact(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ContactForm>,
) -> Result<HttpResponse, ServiceError> {
    let contact = contacts_service::create_contact(repo.get_ref(), &user, form)?;
    Ok(HttpResponse::Ok().json(contact))
}

#[post("/contacts/import")]
pub async fn import_contacts(
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<ImportContactsForm>,
) -> Result<HttpResponse, ServiceError> {
    let import = form.parse(user.tenant_id).map_err(|err| {
        log::warn!("Failed to parse contacts CSV: {err}");
        err
    })?;
    let summary = contacts_service::import_contacts(repo.get_ref(), &user, import)?;
    Ok(HttpResponse::Ok().json(summary))
}

#[get("/contacts/{contact_id}")]
pub async fn show_contact(
    contact_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    let contact = contacts_service::get_contact(repo.get_ref(), &user, contact_id.into_inner())?;
    Ok(HttpResponse::Ok().json(contact))
}

#[put("/contacts/{contact_id}")]
pub async fn update_contact(
    contact_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
    web::Json(form): web::Json<ContactForm>,
) -> Result<HttpResponse, ServiceError> {
    let contact =
        contacts_service::update_contact(repo.get_ref(), &user, contact_id.into_inner(), form)?;
    Ok(HttpResponse::Ok().json(contact))
}

#[delete("/contacts/{contact_id}")]
pub async fn delete_contact(
    contact_id: web::Path<i32>,
    user: AuthenticatedUser,
    repo: web::Data<DieselRepository>,
) -> Result<HttpResponse, ServiceError> {
    contacts_service::delete_contact(repo.get_ref(), &user, contact_id.into_inner())?;
    Ok(HttpResponse::NoContent().finish())
}
