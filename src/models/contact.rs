use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::contact::{
    Contact as DomainContact, NewContact as DomainNewContact, UpdateContact as DomainUpdateContact,
};
use crate::domain::types::{
    CompanyId, ContactId, EmailAddress, PersonName, PhoneNumber, SanitizedText, TenantId,
    TypeConstraintError,
};
use crate::models::tenant::Tenant;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Tenant, foreign_key = tenant_id))]
#[diesel(table_name = crate::schema::contacts)]
/// Diesel model for [`crate::domain::contact::Contact`].
pub struct Contact {
    pub id: i32,
    pub tenant_id: i32,
    pub company_id: Option<i32>,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub position: Option<String>,
    pub status: String,
    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::contacts)]
/// Insertable form of [`Contact`].
pub struct NewContact<'a> {
    pub tenant_id: i32,
    pub company_id: Option<i32>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub position: Option<&'a str>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::contacts)]
#[diesel(treat_none_as_null = true)]
/// Data used when updating a [`Contact`] record.
pub struct UpdateContact<'a> {
    pub company_id: Option<i32>,
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub position: Option<&'a str>,
    pub status: &'a str,
    pub notes: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Contact> for DomainContact {
    type Error = TypeConstraintError;

    fn try_from(contact: Contact) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ContactId::new(contact.id)?,
            tenant_id: TenantId::new(contact.tenant_id)?,
            company_id: contact.company_id.map(CompanyId::new).transpose()?,
            first_name: PersonName::new(contact.first_name)?,
            last_name: contact.last_name,
            email: contact.email.map(EmailAddress::new).transpose()?,
            phone: contact.phone.map(PhoneNumber::new).transpose()?,
            position: contact.position,
            status: contact.status.parse()?,
            notes: contact.notes.map(SanitizedText::new).transpose()?,
            created_at: contact.created_at,
            updated_at: contact.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewContact> for NewContact<'a> {
    fn from(contact: &'a DomainNewContact) -> Self {
        Self {
            tenant_id: contact.tenant_id.get(),
            company_id: contact.company_id.map(CompanyId::get),
            first_name: contact.first_name.as_str(),
            last_name: contact.last_name.as_str(),
            email: contact.email.as_ref().map(EmailAddress::as_str),
            phone: contact.phone.as_ref().map(PhoneNumber::as_str),
            position: contact.position.as_deref(),
            status: contact.status.as_str(),
            notes: contact.notes.as_ref().map(SanitizedText::as_str),
        }
    }
}

impl<'a> UpdateContact<'a> {
    pub fn new(contact: &'a DomainUpdateContact, updated_at: NaiveDateTime) -> Self {
        Self {
            company_id: contact.company_id.map(CompanyId::get),
            first_name: contact.first_name.as_str(),
            last_name: contact.last_name.as_str(),
            email: contact.email.as_ref().map(EmailAddress::as_str),
            phone: contact.phone.as_ref().map(PhoneNumber::as_str),
            position: contact.position.as_deref(),
            status: contact.status.as_str(),
            notes: contact.notes.as_ref().map(SanitizedText::as_str),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::contact::ContactStatus;
    use chrono::Utc;

    #[test]
    fn contact_into_domain() {
        let now = Utc::now().naive_utc();
        let db = Contact {
            id: 1,
            tenant_id: 2,
            company_id: Some(5),
            first_name: "Jane".into(),
            last_name: "Doe".into(),
            email: Some("jane@acme.io".into()),
            phone: Some("+14155552671".into()),
            position: None,
            status: "customer".into(),
            notes: None,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainContact::try_from(db).expect("valid contact");
        assert_eq!(domain.company_id.map(CompanyId::get), Some(5));
        assert_eq!(domain.status, ContactStatus::Customer);
        assert_eq!(domain.full_name(), "Jane Doe");
    }

    #[test]
    fn from_domain_new_contact() {
        let domain = DomainNewContact {
            tenant_id: TenantId::new(1).unwrap(),
            company_id: None,
            first_name: PersonName::new("Jane").unwrap(),
            last_name: String::new(),
            email: Some(EmailAddress::new("jane@acme.io").unwrap()),
            phone: None,
            position: Some("CTO".into()),
            status: ContactStatus::Prospect,
            notes: None,
        };
        let insertable: NewContact = (&domain).into();
        assert_eq!(insertable.email, Some("jane@acme.io"));
        assert_eq!(insertable.status, "prospect");
        assert_eq!(insertable.position, Some("CTO"));
    }
}
