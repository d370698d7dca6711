use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::activity::{
    Activity as DomainActivity, NewActivity as DomainNewActivity,
    UpdateActivity as DomainUpdateActivity,
};
use crate::domain::types::{
    ActivityId, ActivitySubject, ContactId, DealId, SanitizedText, TenantId, TypeConstraintError,
};
use crate::models::tenant::Tenant;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Tenant, foreign_key = tenant_id))]
#[diesel(table_name = crate::schema::activities)]
/// Diesel model for [`crate::domain::activity::Activity`].
pub struct Activity {
    pub id: i32,
    pub tenant_id: i32,
    pub activity_type: String,
    pub subject: String,
    pub description: Option<String>,
    pub due_at: Option<NaiveDateTime>,
    pub completed: bool,
    pub contact_id: Option<i32>,
    pub deal_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::activities)]
pub struct NewActivity<'a> {
    pub tenant_id: i32,
    pub activity_type: &'a str,
    pub subject: &'a str,
    pub description: Option<&'a str>,
    pub due_at: Option<NaiveDateTime>,
    pub completed: bool,
    pub contact_id: Option<i32>,
    pub deal_id: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::activities)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateActivity<'a> {
    pub activity_type: &'a str,
    pub subject: &'a str,
    pub description: Option<&'a str>,
    pub due_at: Option<NaiveDateTime>,
    pub completed: bool,
    pub contact_id: Option<i32>,
    pub deal_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Activity> for DomainActivity {
    type Error = TypeConstraintError;

    fn try_from(activity: Activity) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ActivityId::new(activity.id)?,
            tenant_id: TenantId::new(activity.tenant_id)?,
            activity_type: activity.activity_type.parse()?,
            subject: ActivitySubject::new(activity.subject)?,
            description: activity.description.map(SanitizedText::new).transpose()?,
            due_at: activity.due_at,
            completed: activity.completed,
            contact_id: activity.contact_id.map(ContactId::new).transpose()?,
            deal_id: activity.deal_id.map(DealId::new).transpose()?,
            created_at: activity.created_at,
            updated_at: activity.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewActivity> for NewActivity<'a> {
    fn from(activity: &'a DomainNewActivity) -> Self {
        Self {
            tenant_id: activity.tenant_id.get(),
            activity_type: activity.activity_type.as_str(),
            subject: activity.subject.as_str(),
            description: activity.description.as_ref().map(SanitizedText::as_str),
            due_at: activity.due_at,
            completed: activity.completed,
            contact_id: activity.contact_id.map(ContactId::get),
            deal_id: activity.deal_id.map(DealId::get),
        }
    }
}

impl<'a> UpdateActivity<'a> {
    pub fn new(activity: &'a DomainUpdateActivity, updated_at: NaiveDateTime) -> Self {
        Self {
            activity_type: activity.activity_type.as_str(),
            subject: activity.subject.as_str(),
            description: activity.description.as_ref().map(SanitizedText::as_str),
            due_at: activity.due_at,
            completed: activity.completed,
            contact_id: activity.contact_id.map(ContactId::get),
            deal_id: activity.deal_id.map(DealId::get),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::ActivityType;
    use chrono::{Duration, Utc};

    #[test]
    fn activity_into_domain_and_overdue() {
        let now = Utc::now().naive_utc();
        let db = Activity {
            id: 4,
            tenant_id: 1,
            activity_type: "call".into(),
            subject: "Follow up".into(),
            description: None,
            due_at: Some(now - Duration::hours(2)),
            completed: false,
            contact_id: Some(3),
            deal_id: None,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainActivity::try_from(db).expect("valid activity");
        assert_eq!(domain.activity_type, ActivityType::Call);
        assert!(domain.is_overdue(now));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let now = Utc::now().naive_utc();
        let db = Activity {
            id: 4,
            tenant_id: 1,
            activity_type: "fax".into(),
            subject: "Follow up".into(),
            description: None,
            due_at: None,
            completed: false,
            contact_id: None,
            deal_id: None,
            created_at: now,
            updated_at: now,
        };
        assert!(DomainActivity::try_from(db).is_err());
    }
}
