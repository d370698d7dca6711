use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{
    CompanyId, ContactId, EmailAddress, PersonName, PhoneNumber, SanitizedText, TenantId,
};

text_enum!(
    /// Lifecycle status of a contact.
    ContactStatus {
        Lead => "lead",
        Prospect => "prospect",
        Customer => "customer",
        Inactive => "inactive",
    }
);

impl Default for ContactStatus {
    fn default() -> Self {
        ContactStatus::Lead
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub tenant_id: TenantId,
    pub company_id: Option<CompanyId>,
    pub first_name: PersonName,
    pub last_name: String,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub position: Option<String>,
    pub status: ContactStatus,
    pub notes: Option<SanitizedText>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Contact {
    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.to_string()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewContact {
    pub tenant_id: TenantId,
    pub company_id: Option<CompanyId>,
    pub first_name: PersonName,
    pub last_name: String,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub position: Option<String>,
    pub status: ContactStatus,
    pub notes: Option<SanitizedText>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateContact {
    pub company_id: Option<CompanyId>,
    pub first_name: PersonName,
    pub last_name: String,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub position: Option<String>,
    pub status: ContactStatus,
    pub notes: Option<SanitizedText>,
}
