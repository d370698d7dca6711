use std::collections::HashMap;
use std::io::Read;

use actix_multipart::form::{MultipartForm, tempfile::TempFile};
use serde::Deserialize;
use validator::Validate;

use crate::domain::contact::{ContactStatus, NewContact, UpdateContact};
use crate::domain::types::{
    CompanyId, EmailAddress, PersonName, PhoneNumber, SanitizedText, TenantId,
    TypeConstraintError, optional_value,
};
use crate::forms::{FormError, trimmed};

#[derive(Debug, Deserialize, Validate)]
/// Body of contact create and update requests.
pub struct ContactForm {
    #[validate(length(min = 1, max = 100))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    #[validate(length(max = 100))]
    pub position: Option<String>,
    pub status: Option<ContactStatus>,
    pub notes: Option<String>,
    pub company_id: Option<i32>,
}

/// Validated contact fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ContactPayload {
    pub company_id: Option<CompanyId>,
    pub first_name: PersonName,
    pub last_name: String,
    pub email: Option<EmailAddress>,
    pub phone: Option<PhoneNumber>,
    pub position: Option<String>,
    pub status: ContactStatus,
    pub notes: Option<SanitizedText>,
}

impl TryFrom<ContactForm> for ContactPayload {
    type Error = FormError;

    fn try_from(form: ContactForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            company_id: form.company_id.map(CompanyId::new).transpose()?,
            first_name: PersonName::new(form.first_name)?,
            last_name: form.last_name.trim().to_string(),
            email: optional_value(form.email, EmailAddress::new)?,
            phone: optional_value(form.phone, PhoneNumber::new)?,
            position: trimmed(form.position),
            status: form.status.unwrap_or_default(),
            notes: optional_value(form.notes, SanitizedText::new)?,
        })
    }
}

impl ContactPayload {
    pub fn into_new_contact(self, tenant_id: TenantId) -> NewContact {
        NewContact {
            tenant_id,
            company_id: self.company_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            status: self.status,
            notes: self.notes,
        }
    }

    pub fn into_update_contact(self) -> UpdateContact {
        UpdateContact {
            company_id: self.company_id,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            position: self.position,
            status: self.status,
            notes: self.notes,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// Query string of the contact list.
pub struct ContactListParams {
    pub page: Option<usize>,
    pub search: Option<String>,
    pub status: Option<ContactStatus>,
    pub company_id: Option<i32>,
}

#[derive(MultipartForm)]
/// Multipart upload of a contacts CSV file.
pub struct ImportContactsForm {
    #[multipart(limit = "10MB")]
    pub csv: TempFile,
}

impl ImportContactsForm {
    /// Parses the uploaded file into contacts for the given tenant.
    pub fn parse(&self, tenant_id: TenantId) -> Result<ContactImport, FormError> {
        let file = self
            .csv
            .file
            .reopen()
            .map_err(|err| FormError::Csv(err.to_string()))?;
        parse_contacts_csv(file, tenant_id)
    }
}

/// Outcome of parsing a contacts CSV file.
#[derive(Debug, Default)]
pub struct ContactImport {
    pub contacts: Vec<NewContact>,
    pub skipped: usize,
}

const CSV_COLUMNS: [&str; 6] = ["first_name", "last_name", "email", "phone", "position", "status"];

/// Reads contacts from CSV with a header row. Header names are matched
/// case-insensitively and unknown columns are ignored. Rows that fail
/// validation are counted in [`ContactImport::skipped`].
pub fn parse_contacts_csv<R: Read>(reader: R, tenant_id: TenantId) -> Result<ContactImport, FormError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let columns: HashMap<&'static str, usize> = {
        let headers = rdr.headers()?;
        CSV_COLUMNS
            .iter()
            .filter_map(|name| {
                headers
                    .iter()
                    .position(|header| header.eq_ignore_ascii_case(name))
                    .map(|index| (*name, index))
            })
            .collect()
    };

    if !columns.contains_key("first_name") {
        return Err(FormError::Csv("missing first_name column".to_string()));
    }

    let mut import = ContactImport::default();

    for (line, record) in rdr.records().enumerate() {
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                log::warn!("Skipping unreadable csv row {}: {err}", line + 2);
                import.skipped += 1;
                continue;
            }
        };

        let field = |name: &str| {
            columns
                .get(name)
                .and_then(|index| record.get(*index))
                .map(str::to_string)
        };

        match contact_from_row(tenant_id, field) {
            Ok(contact) => import.contacts.push(contact),
            Err(err) => {
                log::warn!("Skipping invalid csv row {}: {err}", line + 2);
                import.skipped += 1;
            }
        }
    }

    Ok(import)
}

fn contact_from_row<F>(tenant_id: TenantId, field: F) -> Result<NewContact, TypeConstraintError>
where
    F: Fn(&str) -> Option<String>,
{
    let status = match trimmed(field("status")) {
        Some(status) => status.parse()?,
        None => ContactStatus::default(),
    };

    Ok(NewContact {
        tenant_id,
        company_id: None,
        first_name: PersonName::new(field("first_name").unwrap_or_default())?,
        last_name: field("last_name").unwrap_or_default(),
        email: optional_value(field("email"), EmailAddress::new)?,
        phone: optional_value(field("phone"), PhoneNumber::new)?,
        position: trimmed(field("position")),
        status,
        notes: None,
    })
}
