use crate::auth::AuthenticatedUser;
use crate::domain::deal::Deal;
use crate::domain::types::{CompanyId, ContactId, DealId, TenantId};
use crate::forms::deals::{DealForm, DealListParams, DealPayload};
use crate::pagination::Paginated;
use crate::repository::{CompanyReader, ContactReader, DealListQuery, DealReader, DealWriter};
use crate::services::contacts::ensure_company;
use crate::services::{ServiceError, ServiceResult, page_request, path_id};

/// Rejects links to contacts outside the tenant.
pub(crate) fn ensure_contact<R>(
    repo: &R,
    contact_id: Option<ContactId>,
    tenant_id: TenantId,
) -> ServiceResult<()>
where
    R: ContactReader + ?Sized,
{
    match contact_id {
        Some(contact_id) if repo.get_contact_by_id(contact_id, tenant_id)?.is_none() => {
            Err(ServiceError::Form(format!("unknown contact {contact_id}")))
        }
        _ => Ok(()),
    }
}

fn ensure_links<R>(repo: &R, payload: &DealPayload, tenant_id: TenantId) -> ServiceResult<()>
where
    R: ContactReader + CompanyReader + ?Sized,
{
    ensure_contact(repo, payload.contact_id, tenant_id)?;
    ensure_company(repo, payload.company_id, tenant_id)
}

pub fn list_deals<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: DealListParams,
) -> ServiceResult<Paginated<Deal>>
where
    R: DealReader + ?Sized,
{
    let (page, per_page) = page_request(params.page);
    let mut query = DealListQuery::new(user.tenant_id).paginate(page, per_page);

    if let Some(term) = params.search.filter(|s| !s.trim().is_empty()) {
        query = query.search(term);
    }
    if let Some(stage) = params.stage {
        query = query.stage(stage);
    }
    if let Some(contact_id) = params.contact_id {
        query = query.contact(ContactId::new(contact_id)?);
    }
    if let Some(company_id) = params.company_id {
        query = query.company(CompanyId::new(company_id)?);
    }

    let (total, deals) = repo.list_deals(query).map_err(|err| {
        log::error!("Failed to list deals: {err}");
        err
    })?;

    Ok(Paginated::new(deals, total, page, per_page))
}

pub fn get_deal<R>(repo: &R, user: &AuthenticatedUser, deal_id: i32) -> ServiceResult<Deal>
where
    R: DealReader + ?Sized,
{
    let deal_id = path_id(DealId::new(deal_id))?;

    repo.get_deal_by_id(deal_id, user.tenant_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_deal<R>(repo: &R, user: &AuthenticatedUser, form: DealForm) -> ServiceResult<Deal>
where
    R: DealWriter + ContactReader + CompanyReader + ?Sized,
{
    let payload = DealPayload::try_from(form)?;
    ensure_links(repo, &payload, user.tenant_id)?;

    let deal = repo
        .create_deal(&payload.into_new_deal(user.tenant_id))
        .map_err(|err| {
            log::error!("Failed to create deal: {err}");
            err
        })?;

    Ok(deal)
}

pub fn update_deal<R>(
    repo: &R,
    user: &AuthenticatedUser,
    deal_id: i32,
    form: DealForm,
) -> ServiceResult<Deal>
where
    R: DealWriter + ContactReader + CompanyReader + ?Sized,
{
    let deal_id = path_id(DealId::new(deal_id))?;
    let payload = DealPayload::try_from(form)?;
    ensure_links(repo, &payload, user.tenant_id)?;

    let deal = repo.update_deal(deal_id, user.tenant_id, &payload.into_update_deal())?;
    if deal.stage.is_closed() {
        log::info!("Deal {} closed as {}", deal.id, deal.stage);
    }
    Ok(deal)
}

pub fn delete_deal<R>(repo: &R, user: &AuthenticatedUser, deal_id: i32) -> ServiceResult<()>
where
    R: DealWriter + ?Sized,
{
    let deal_id = path_id(DealId::new(deal_id))?;

    repo.delete_deal(deal_id, user.tenant_id)?;
    log::info!("User {} deleted deal {deal_id}", user.id);
    Ok(())
}
