use serde::Deserialize;
use validator::Validate;

use crate::domain::company::{NewCompany, UpdateCompany};
use crate::domain::types::{CompanyName, PhoneNumber, TenantId, WebsiteUrl, optional_value};
use crate::forms::{FormError, trimmed};

#[derive(Debug, Deserialize, Validate)]
/// Body of company create and update requests.
pub struct CompanyForm {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(length(max = 100))]
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    #[validate(length(max = 500))]
    pub address: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompanyPayload {
    pub name: CompanyName,
    pub industry: Option<String>,
    pub website: Option<WebsiteUrl>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
}

impl TryFrom<CompanyForm> for CompanyPayload {
    type Error = FormError;

    fn try_from(form: CompanyForm) -> Result<Self, Self::Error> {
        form.validate()?;

        Ok(Self {
            name: CompanyName::new(form.name)?,
            industry: trimmed(form.industry),
            website: optional_value(form.website, WebsiteUrl::new)?,
            phone: optional_value(form.phone, PhoneNumber::new)?,
            address: trimmed(form.address),
        })
    }
}

impl CompanyPayload {
    pub fn into_new_company(self, tenant_id: TenantId) -> NewCompany {
        NewCompany {
            tenant_id,
            name: self.name,
            industry: self.industry,
            website: self.website,
            phone: self.phone,
            address: self.address,
        }
    }

    pub fn into_update_company(self) -> UpdateCompany {
        UpdateCompany {
            name: self.name,
            industry: self.industry,
            website: self.website,
            phone: self.phone,
            address: self.address,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// Query string of the company list.
pub struct CompanyListParams {
    pub page: Option<usize>,
    pub search: Option<String>,
}
