use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{ActivityId, ActivitySubject, ContactId, DealId, SanitizedText, TenantId};

text_enum!(
    /// Kind of interaction recorded as an activity.
    ActivityType {
        Call => "call",
        Email => "email",
        Meeting => "meeting",
        Task => "task",
        Note => "note",
    }
);

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub id: ActivityId,
    pub tenant_id: TenantId,
    pub activity_type: ActivityType,
    pub subject: ActivitySubject,
    pub description: Option<SanitizedText>,
    pub due_at: Option<NaiveDateTime>,
    pub completed: bool,
    pub contact_id: Option<ContactId>,
    pub deal_id: Option<DealId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Activity {
    /// Open activities whose due time has passed.
    pub fn is_overdue(&self, now: NaiveDateTime) -> bool {
        !self.completed && self.due_at.is_some_and(|due| due < now)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewActivity {
    pub tenant_id: TenantId,
    pub activity_type: ActivityType,
    pub subject: ActivitySubject,
    pub description: Option<SanitizedText>,
    pub due_at: Option<NaiveDateTime>,
    pub completed: bool,
    pub contact_id: Option<ContactId>,
    pub deal_id: Option<DealId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateActivity {
    pub activity_type: ActivityType,
    pub subject: ActivitySubject,
    pub description: Option<SanitizedText>,
    pub due_at: Option<NaiveDateTime>,
    pub completed: bool,
    pub contact_id: Option<ContactId>,
    pub deal_id: Option<DealId>,
}
