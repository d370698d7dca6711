use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::company::{
    Company as DomainCompany, NewCompany as DomainNewCompany, UpdateCompany as DomainUpdateCompany,
};
use crate::domain::types::{
    CompanyId, CompanyName, PhoneNumber, TenantId, TypeConstraintError, WebsiteUrl,
};
use crate::models::tenant::Tenant;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Tenant, foreign_key = tenant_id))]
#[diesel(table_name = crate::schema::companies)]
/// Diesel model for [`crate::domain::company::Company`].
pub struct Company {
    pub id: i32,
    pub tenant_id: i32,
    pub name: String,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::companies)]
pub struct NewCompany<'a> {
    pub tenant_id: i32,
    pub name: &'a str,
    pub industry: Option<&'a str>,
    pub website: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::companies)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateCompany<'a> {
    pub name: &'a str,
    pub industry: Option<&'a str>,
    pub website: Option<&'a str>,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Company> for DomainCompany {
    type Error = TypeConstraintError;

    fn try_from(company: Company) -> Result<Self, Self::Error> {
        Ok(Self {
            id: CompanyId::new(company.id)?,
            tenant_id: TenantId::new(company.tenant_id)?,
            name: CompanyName::new(company.name)?,
            industry: company.industry,
            website: company.website.map(WebsiteUrl::new).transpose()?,
            phone: company.phone.map(PhoneNumber::new).transpose()?,
            address: company.address,
            created_at: company.created_at,
            updated_at: company.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewCompany> for NewCompany<'a> {
    fn from(company: &'a DomainNewCompany) -> Self {
        Self {
            tenant_id: company.tenant_id.get(),
            name: company.name.as_str(),
            industry: company.industry.as_deref(),
            website: company.website.as_ref().map(WebsiteUrl::as_str),
            phone: company.phone.as_ref().map(PhoneNumber::as_str),
            address: company.address.as_deref(),
        }
    }
}

impl<'a> UpdateCompany<'a> {
    pub fn new(company: &'a DomainUpdateCompany, updated_at: NaiveDateTime) -> Self {
        Self {
            name: company.name.as_str(),
            industry: company.industry.as_deref(),
            website: company.website.as_ref().map(WebsiteUrl::as_str),
            phone: company.phone.as_ref().map(PhoneNumber::as_str),
            address: company.address.as_deref(),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn company_into_domain() {
        let now = Utc::now().naive_utc();
        let db = Company {
            id: 9,
            tenant_id: 1,
            name: "Acme".into(),
            industry: Some("Retail".into()),
            website: Some("https://acme.example".into()),
            phone: None,
            address: None,
            created_at: now,
            updated_at: now,
        };
        let domain = DomainCompany::try_from(db).expect("valid company");
        assert_eq!(domain.name.as_str(), "Acme");
        assert_eq!(
            domain.website.as_ref().map(WebsiteUrl::as_str),
            Some("https://acme.example")
        );
    }

    #[test]
    fn update_carries_timestamp() {
        let now = Utc::now().naive_utc();
        let domain = DomainUpdateCompany {
            name: CompanyName::new("Globex").unwrap(),
            industry: None,
            website: None,
            phone: None,
            address: Some("Main St".into()),
        };
        let update = UpdateCompany::new(&domain, now);
        assert_eq!(update.name, "Globex");
        assert_eq!(update.address, Some("Main St"));
        assert_eq!(update.updated_at, now);
    }
}
