use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, CompanyName, PhoneNumber, TenantId, WebsiteUrl};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Company {
    pub id: CompanyId,
    pub tenant_id: TenantId,
    pub name: CompanyName,
    pub industry: Option<String>,
    pub website: Option<WebsiteUrl>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewCompany {
    pub tenant_id: TenantId,
    pub name: CompanyName,
    pub industry: Option<String>,
    pub website: Option<WebsiteUrl>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateCompany {
    pub name: CompanyName,
    pub industry: Option<String>,
    pub website: Option<WebsiteUrl>,
    pub phone: Option<PhoneNumber>,
    pub address: Option<String>,
}
