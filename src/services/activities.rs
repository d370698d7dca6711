use crate::auth::AuthenticatedUser;
use crate::domain::activity::Activity;
use crate::domain::types::{ActivityId, ContactId, DealId, TenantId};
use crate::forms::activities::{ActivityForm, ActivityListParams, ActivityPayload};
use crate::pagination::Paginated;
use crate::repository::{
    ActivityListQuery, ActivityReader, ActivityWriter, ContactReader, DealReader,
};
use crate::services::deals::ensure_contact;
use crate::services::{ServiceError, ServiceResult, page_request, path_id};

fn ensure_links<R>(repo: &R, payload: &ActivityPayload, tenant_id: TenantId) -> ServiceResult<()>
where
    R: ContactReader + DealReader + ?Sized,
{
    ensure_contact(repo, payload.contact_id, tenant_id)?;

    match payload.deal_id {
        Some(deal_id) if repo.get_deal_by_id(deal_id, tenant_id)?.is_none() => {
            Err(ServiceError::Form(format!("unknown deal {deal_id}")))
        }
        _ => Ok(()),
    }
}

pub fn list_activities<R>(
    repo: &R,
    user: &AuthenticatedUser,
    params: ActivityListParams,
) -> ServiceResult<Paginated<Activity>>
where
    R: ActivityReader + ?Sized,
{
    let (page, per_page) = page_request(params.page);
    let mut query = ActivityListQuery::new(user.tenant_id).paginate(page, per_page);

    if let Some(activity_type) = params.activity_type {
        query = query.activity_type(activity_type);
    }
    if let Some(completed) = params.completed {
        query = query.completed(completed);
    }
    if let Some(contact_id) = params.contact_id {
        query = query.contact(ContactId::new(contact_id)?);
    }
    if let Some(deal_id) = params.deal_id {
        query = query.deal(DealId::new(deal_id)?);
    }

    let (total, activities) = repo.list_activities(query).map_err(|err| {
        log::error!("Failed to list activities: {err}");
        err
    })?;

    Ok(Paginated::new(activities, total, page, per_page))
}

pub fn get_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    activity_id: i32,
) -> ServiceResult<Activity>
where
    R: ActivityReader + ?Sized,
{
    let activity_id = path_id(ActivityId::new(activity_id))?;

    repo.get_activity_by_id(activity_id, user.tenant_id)?
        .ok_or(ServiceError::NotFound)
}

pub fn create_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    form: ActivityForm,
) -> ServiceResult<Activity>
where
    R: ActivityWriter + ContactReader + DealReader + ?Sized,
{
    let payload = ActivityPayload::try_from(form)?;
    ensure_links(repo, &payload, user.tenant_id)?;

    let activity = repo
        .create_activity(&payload.into_new_activity(user.tenant_id))
        .map_err(|err| {
            log::error!("Failed to create activity: {err}");
            err
        })?;

    Ok(activity)
}

pub fn update_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    activity_id: i32,
    form: ActivityForm,
) -> ServiceResult<Activity>
where
    R: ActivityWriter + ContactReader + DealReader + ?Sized,
{
    let activity_id = path_id(ActivityId::new(activity_id))?;
    let payload = ActivityPayload::try_from(form)?;
    ensure_links(repo, &payload, user.tenant_id)?;

    Ok(repo.update_activity(activity_id, user.tenant_id, &payload.into_update_activity())?)
}

/// Marks the activity as done.
pub fn complete_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    activity_id: i32,
) -> ServiceResult<Activity>
where
    R: ActivityWriter + ?Sized,
{
    let activity_id = path_id(ActivityId::new(activity_id))?;

    Ok(repo.complete_activity(activity_id, user.tenant_id)?)
}

pub fn delete_activity<R>(
    repo: &R,
    user: &AuthenticatedUser,
    activity_id: i32,
) -> ServiceResult<()>
where
    R: ActivityWriter + ?Sized,
{
    let activity_id = path_id(ActivityId::new(activity_id))?;

    repo.delete_activity(activity_id, user.tenant_id)?;
    Ok(())
}

#[cfg(all(test, feature = "test-mocks"))]
mod tests {
    use super::*;
    use crate::domain::activity::ActivityType;
    use crate::domain::types::ActivitySubject;
    use crate::domain::user::UserRole;
    use crate::repository::errors::RepositoryError;
    use crate::repository::mock::MockRepository;
    use crate::services::test_support::{now, user_with_role};

    #[test]
    fn complete_marks_activity_done() {
        let user = user_with_role(UserRole::Member);
        let mut repo = MockRepository::new();
        repo.expect_complete_activity()
            .times(1)
            .returning(|id, tenant_id| {
                Ok(Activity {
                    id,
                    tenant_id,
                    activity_type: ActivityType::Task,
                    subject: ActivitySubject::new("Send proposal").unwrap(),
                    description: None,
                    due_at: None,
                    completed: true,
                    contact_id: None,
                    deal_id: None,
                    created_at: now(),
                    updated_at: now(),
                })
            });

        let activity = complete_activity(&repo, &user, 4).unwrap();
        assert!(activity.completed);
        assert_eq!(activity.id.get(), 4);
    }

    #[test]
    fn completing_missing_activity_is_not_found() {
        let user = user_with_role(UserRole::Member);
        let mut repo = MockRepository::new();
        repo.expect_complete_activity()
            .returning(|_, _| Err(RepositoryError::NotFound));

        assert!(matches!(
            complete_activity(&repo, &user, 4),
            Err(ServiceError::NotFound)
        ));
    }

    #[test]
    fn create_rejects_unknown_deal() {
        let user = user_with_role(UserRole::Member);
        let mut repo = MockRepository::new();
        repo.expect_get_deal_by_id().returning(|_, _| Ok(None));
        repo.expect_create_activity().never();

        let form = ActivityForm {
            activity_type: ActivityType::Call,
            subject: "Follow up".into(),
            description: None,
            due_at: None,
            completed: false,
            contact_id: None,
            deal_id: Some(12),
        };
        assert!(matches!(
            create_activity(&repo, &user, form),
            Err(ServiceError::Form(_))
        ));
    }
}
