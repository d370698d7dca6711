use crate::auth::AuthenticatedUser;
use crate::domain::company::Company;
use crate::domain::types::CompanyId;
use crate::dto::companies::CompanyDetail;
use crate::forms::companies::{CompanyForm, CompanyListParams, CompanyPayload};
use crate::pagination::Paginated;
use crate::repository::{
    CompanyListQuery, CompanyReader, CompanyWriter, ContactListQuery, ContactReader,
};
use crate::services::{ServiceError, ServiceResult, page_request, path_id};

pub fn list_companies<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: CompanyListParams,
) -> ServiceResult<Paginated<Company>>
where
    R: CompanyReader + ?Sized,
{
    let (page, per_page) = page_request(params.page);
    let mut query = CompanyListQuery::new(user.tenant_id).paginate(page, per_page);

    if let Some(term) = params.search.filter(|s| !s.trim().is_empty()) {
        query = query.search(term);
    }

    let (total, companies) = repo.list_companies(query).map_err(|err| {
        log::error!("Failed to list companies: {err}");
        err
    })?;

    Ok(Paginated::new(companies, total, page, per_page))
}

/// Loads a company with every contact linked to it.
pub fn get_company<R>(
    repo: &R,
    user: &AuthenticatedUser,
    company_id: i32,
) -> ServiceResult<CompanyDetail>
where
    R: CompanyReader + ContactReader + ?Sized,
{
    let company_id = path_id(CompanyId::new(company_id))?;

    let company = repo
        .get_company_by_id(company_id, user.tenant_id)?
        .ok_or(ServiceError::NotFound)?;

    let (_, contacts) =
        repo.list_contacts(ContactListQuery::new(user.tenant_id).company(company_id))?;

    Ok(CompanyDetail { company, contacts })
}

pub fn create_company<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: CompanyForm,
) -> ServiceResult<Company>
where
    R: CompanyWriter + ?Sized,
{
    let payload = CompanyPayload::try_from(form)?;

    let company = repo
        .create_company(&payload.into_new_company(user.tenant_id))
        .map_err(|err| {
            log::error!("Failed to create company: {err}");
            err
        })?;

    Ok(company)
}

pub fn update_company<R>(
    repo: &R,
    user: &AuthenticatedUser,
    company_id: i32,
    form: CompanyForm,
) -> ServiceResult<Company>
where
    R: CompanyWriter + ?Sized,
{
    let company_id = path_id(CompanyId::new(company_id))?;
    let payload = CompanyPayload::try_from(form)?;

    Ok(repo.update_company(company_id, user.tenant_id, &payload.into_update_company())?)
}

pub fn delete_company<R>(repo: &R, user: &AuthenticatedUser, company_id: i32) -> ServiceResult<()>
where
    R: CompanyWriter + ?Sized,
{
    let company_id = path_id(CompanyId::new(company_id))?;

    repo.delete_company(company_id, user.tenant_id)?;
    log::info!("User {} deleted company {company_id}", user.id);
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::types::CompanyName;
    use crate::domain::user::UserRole;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{now, user_with_role};

    #[test]
    fn detail_includes_linked_contacts() {
        let user = user_with_role(UserRole::Member);
        let tenant_id = user.tenant_id;
        let mut repo = MockRepository::new();
        repo.expect_get_company_by_id().returning(move |id, tenant| {
            Ok(Some(Company {
                id,
                tenant_id: tenant,
                name: CompanyName::new("Acme").unwrap(),
                industry: None,
                website: None,
                phone: None,
                address: None,
                created_at: now(),
                updated_at: now(),
            }))
        });
        repo.expect_list_contacts()
            .withf(move |query| {
                query.tenant_id == tenant_id && query.company_id.map(CompanyId::get) == Some(3)
            })
            .returning(|_| Ok((0, vec![])));

        let detail = get_company(&repo, &user, 3).unwrap();
        assert_eq!(detail.company.name.as_str(), "Acme");
        assert!(detail.contacts.is_empty());
    }

    #[test]
    fn deleting_a_foreign_company_is_not_found() {
        let user = user_with_role(UserRole::Member);
        let mut repo = MockRepository::new();
        repo.expect_delete_company()
            .returning(|_, _| Err(RepositoryError::NotFound));

        assert!(matches!(
            delete_company(&repo, &user, 8),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn impossible_ids_are_not_found_without_querying() {
        let user = user_with_role(UserRole::Member);
        let repo = MockRepository::new();

        assert!(matches!(
            get_company(&repo, &user, 0),
            Err(ServiceError::NotFound)
        ));
        assert!(matches!(
            delete_company(&repo, &user, -1),
            Err(ServiceError::NotFound)
        ));
    }
}
