use serde::Serialize;

use crate::domain::company::Company;
use crate::domain::contact::Contact;

/// A company together with the contacts linked to it.
#[derive(Debug, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub contacts: Vec<Contact>,
}
