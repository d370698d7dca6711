//! Contact screens and CSV import.

use crate::auth::AuthenticatedUser;
use crate::domain::contact::Contact;
use crate::domain::types::{CompanyId, ContactId, TenantId};
use crate::dto::contacts::ImportSummary;
use crate::forms::contacts::{ContactForm, ContactImport, ContactListParams, ContactPayload};
use crate::pagination::Paginated;
use crate::repository::{CompanyReader, ContactListQuery, ContactReader, ContactWriter};
use crate::services::{ServiceError, ServiceResult, page_request, path_id};

/// Rejects links to companies outside the tenant.
pub(crate) fn ensure_company<R>(
    repo: &R,
    company_id: Option<CompanyId>,
    tenant_id: TenantId,
) -> ServiceResult<()>
where
    R: CompanyReader + ?Sized,
{
    match company_id {
        Some(company_id) if repo.get_company_by_id(company_id, tenant_id)?.is_none() => {
            Err(ServiceError::Form(format!("unknown company {company_id}")))
        }
        _ => Ok(()),
    }
}

pub fn list_contacts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ContactListParams,
) -> ServiceResult<Paginated<Contact>>
where
    R: ContactReader + ?Sized,
{
    let (page, per_page) = page_request(params.page);
    let mut query = ContactListQuery::new(user.tenant_id).paginate(page, per_page);

    if let Some(term) = params.search.filter(|s| !s.trim().is_empty()) {
        query = query.search(term);
    }
    if let Some(status) = params.status {
        query = query.status(status);
    }
    if let Some(company_id) = params.company_id {
        query = query.company(CompanyId::new(company_id)?);
    }

    let (total, contacts) = repo.list_contacts(query).map_err(|err| {
        log::error!("Failed to list contacts: {err}");
        err
    })?;

    Ok(Paginated::new(contacts, total, page, per_page))
}

pub fn get_contact<R>(repo: &R, user: &AuthenticatedUser, contact_id: i32) -> ServiceResult<Contact>
where
    R: ContactReader + ?Sized,
{
    let contact_id = path_id(ContactId::new(contact_id))?;

    repo.get_contact_by_id(contact_id, user.tenant_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_contact<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ContactForm,
) -> ServiceResult<Contact>
where
    R: ContactWriter + CompanyReader + ?Sized,
{
    let payload = ContactPayload::try_from(form)?;
    ensure_company(repo, payload.company_id, user.tenant_id)?;

    let contact = repo
        .create_contact(&payload.into_new_contact(user.tenant_id))
        .map_err(|err| {
            log::error!("Failed to create contact: {err}");
            err
        })?;

    Ok(contact)
}

pub fn update_contact<R>(
    repo: &R,
    user: &AuthenticatedUser,
    contact_id: i32,
    form: ContactForm,
) -> ServiceResult<Contact>
where
    R: ContactWriter + CompanyReader + ?Sized,
{
    let contact_id = path_id(ContactId::new(contact_id))?;
    let payload = ContactPayload::try_from(form)?;
    ensure_company(repo, payload.company_id, user.tenant_id)?;

    Ok(repo.update_contact(contact_id, user.tenant_id, &payload.into_update_contact())?)
}

pub fn delete_contact<R>(repo: &R, user: &AuthenticatedUser, contact_id: i32) -> ServiceResult<()>
where
    R: ContactWriter + ?Sized,
{
    let contact_id = path_id(ContactId::new(contact_id))?;

    repo.delete_contact(contact_id, user.tenant_id)?;
    log::info!("User {} deleted contact {contact_id}", user.id);
    Ok(())
}

/// Stores the parsed rows of an uploaded CSV file.
pub fn import_contacts<R>(
    repo: &R,
    user: &AuthenticatedUser,
    import: ContactImport,
) -> ServiceResult<ImportSummary>
where
    R: ContactWriter + ?Sized,
{
    if import
        .contacts
        .iter()
        .any(|contact| contact.tenant_id != user.tenant_id)
    {
        return Err(ServiceError::Forbidden);
    }

    let imported = repo.create_contacts(&import.contacts).map_err(|err| {
        log::error!("Failed to import contacts: {err}");
        err
    })?;

    log::info!(
        "Imported {imported} contacts into tenant {} ({} rows skipped)",
        user.tenant_id,
        import.skipped
    );

    Ok(ImportSummary {
        imported,
        skipped: import.skipped,
    })
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::contact::ContactStatus;
    use crate::domain::user::UserRole;
    use crate::forms::contacts::parse_contacts_csv;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{now, user_with_role};

    fn form(company_id: Option<i32>) -> ContactForm {
        ContactForm {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            email: Some("ada@example.com".into()),
            phone: None,
            position: None,
            status: Some(ContactStatus::Prospect),
            notes: None,
            company_id,
        }
    }

    fn stored(tenant_id: TenantId) -> Contact {
        Contact {
            id: ContactId::new(5).unwrap(),
            tenant_id,
            company_id: None,
            first_name: crate::domain::types::PersonName::new("Ada").unwrap(),
            last_name: "Lovelace".into(),
            email: None,
            phone: None,
            position: None,
            status: ContactStatus::Prospect,
            notes: None,
            created_at: now(),
            updated_at: now(),
        }
    }

    #[test]
    fn create_scopes_contact_to_caller_tenant() {
        let user = user_with_role(UserRole::Member);
        let tenant_id = user.tenant_id;
        let mut repo = MockRepository::new();
        repo.expect_create_contact()
            .withf(move |contact| contact.tenant_id == tenant_id && contact.first_name.as_str() == "Ada")
            .times(1)
            .returning(move |_| Ok(stored(tenant_id)));

        let contact = create_contact(&repo, &user, form(None)).unwrap();
        assert_eq!(contact.status, ContactStatus::Prospect);
    }

    #[test]
    fn create_rejects_foreign_company() {
        let user = user_with_role(UserRole::Member);
        let mut repo = MockRepository::new();
        repo.expect_get_company_by_id().returning(|_, _| Ok(None));
        repo.expect_create_contact().never();

        let result = create_contact(&repo, &user, form(Some(99)));
        assert!(matches!(result, Err(ServiceError::Form(_))));
    }

    #[test]
    fn missing_contact_is_not_found() {
        let user = user_with_role(UserRole::Member);
        let mut repo = MockRepository::new();
        repo.expect_get_contact_by_id().returning(|_, _| Ok(None));

        assert!(matches!(
            get_contact(&repo, &user, 42),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn list_paginates_with_filters() {
        let user = user_with_role(UserRole::Member);
        let tenant_id = user.tenant_id;
        let mut repo = MockRepository::new();
        repo.expect_list_contacts()
            .withf(move |query| {
                query.tenant_id == tenant_id
                    && query.search.as_deref() == Some("ada")
                    && query.status == Some(ContactStatus::Lead)
                    && query.pagination.as_ref().map(|p| p.page) == Some(2)
            })
            .returning(move |_| Ok((21, vec![stored(tenant_id)])));

        let page = list_contacts(
            &repo,
            &user,
            ContactListParams {
                page: Some(2),
                search: Some("ada".into()),
                status: Some(ContactStatus::Lead),
                company_id: None,
            },
        )
        .unwrap();

        assert_eq!(page.total, 21);
        assert_eq!(page.page, 2);
        assert_eq!(page.pages, vec![Some(1), Some(2)]);
    }

    #[test]
    fn import_reports_imported_and_skipped_rows() {
        let user = user_with_role(UserRole::Member);
        let import = parse_contacts_csv(
            "first_name,email\nAda,ada@example.com\n,skip@example.com\n".as_bytes(),
            user.tenant_id,
        )
        .unwrap();
        let mut repo = MockRepository::new();
        repo.expect_create_contacts()
            .withf(|contacts| contacts.len() == 1)
            .returning(|contacts| Ok(contacts.len()));

        let summary = import_contacts(&repo, &user, import).unwrap();
        assert_eq!(
            summary,
            ImportSummary {
                imported: 1,
                skipped: 1
            }
        );
    }
}
