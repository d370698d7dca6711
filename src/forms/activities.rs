use chrono::NaiveDateTime;
use serde::Deserialize;
use validator::Validate;

use crate::domain::activity::{ActivityType, NewActivity, UpdateActivity};
use crate::domain::types::{
    ActivitySubject, ContactId, DealId, SanitizedText, TenantId, optional_value,
};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Body of activity create and update requests.
pub struct ActivityForm {
    pub activity_type: ActivityType,
    #[validate(length(min = 1, max = 200))]
    pub subject: String,
    pub description: Option<String>,
    pub due_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed: bool,
    pub contact_id: Option<i32>,
    pub deal_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActivityPayload {
    pub activity_type: ActivityType,
    pub subject: ActivitySubject,
    pub description: Option<SanitizedText>,
    pub due_at: Option<NaiveDateTime>,
    pub completed: bool,
    pub contact_id: Option<ContactId>,
    pub deal_id: Option<DealId>,
}

impl TryFrom<ActivityForm> for ActivityPayload {
    type Error = FormError;

    fn try_from(form: ActivityForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            activity_type: form.activity_type,
            subject: ActivitySubject::new(form.subject)?,
            description: optional_value(form.description, SanitizedText::new)?,
            due_at: form.due_at,
            completed: form.completed,
            contact_id: form.contact_id.map(ContactId::new).transpose()?,
            deal_id: form.deal_id.map(DealId::new).transpose()?,
        })
    }
}

impl ActivityPayload {
    pub fn into_new_activity(self, tenant_id: TenantId) -> NewActivity {
        NewActivity {
            tenant_id,
            activity_type: self.activity_type,
            subject: self.subject,
            description: self.description,
            due_at: self.due_at,
            completed: self.completed,
            contact_id: self.contact_id,
            deal_id: self.deal_id,
        }
    }

    pub fn into_update_activity(self) -> UpdateActivity {
        UpdateActivity {
            activity_type: self.activity_type,
            subject: self.subject,
            description: self.description,
            due_at: self.due_at,
            completed: self.completed,
            contact_id: self.contact_id,
            deal_id: self.deal_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// Query string of the activity list.
pub struct ActivityListParams {
    pub page: Option<usize>,
    pub activity_type: Option<ActivityType>,
    pub completed: Option<bool>,
    pub contact_id: Option<i32>,
    pub deal_id: Option<i32>,
}
