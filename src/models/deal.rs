use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::deal::{
    Deal as DomainDeal, NewDeal as DomainNewDeal, UpdateDeal as DomainUpdateDeal,
};
use crate::domain::types::{
    CompanyId, ContactId, DealAmount, DealId, DealTitle, Probability, TenantId,
    TypeConstraintError,
};
use crate::models::tenant::Tenant;

#[derive(Debug, Clone, Identifiable, Queryable, Selectable, Associations)]
#[diesel(belongs_to(Tenant, foreign_key = tenant_id))]
#[diesel(table_name = crate::schema::deals)]
/// Diesel model for [`crate::domain::deal::Deal`].
pub struct Deal {
    pub id: i32,
    pub tenant_id: i32,
    pub title: String,
    pub amount: f64,
    pub stage: String,
    pub probability: i32,
    pub expected_close_date: Option<NaiveDate>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::deals)]
pub struct NewDeal<'a> {
    pub tenant_id: i32,
    pub title: &'a str,
    pub amount: f64,
    pub stage: &'a str,
    pub probability: i32,
    pub expected_close_date: Option<NaiveDate>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
}

#[derive(AsChangeset)]
#[diesel(table_name = crate::schema::deals)]
#[diesel(treat_none_as_null = true)]
pub struct UpdateDeal<'a> {
    pub title: &'a str,
    pub amount: f64,
    pub stage: &'a str,
    pub probability: i32,
    pub expected_close_date: Option<NaiveDate>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Deal> for DomainDeal {
    type Error = TypeConstraintError;

    fn try_from(deal: Deal) -> Result<Self, Self::Error> {
        Ok(Self {
            id: DealId::new(deal.id)?,
            tenant_id: TenantId::new(deal.tenant_id)?,
            title: DealTitle::new(deal.title)?,
            amount: DealAmount::new(deal.amount)?,
            stage: deal.stage.parse()?,
            probability: Probability::new(deal.probability)?,
            expected_close_date: deal.expected_close_date,
            contact_id: deal.contact_id.map(ContactId::new).transpose()?,
            company_id: deal.company_id.map(CompanyId::new).transpose()?,
            created_at: deal.created_at,
            updated_at: deal.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewDeal> for NewDeal<'a> {
    fn from(deal: &'a DomainNewDeal) -> Self {
        Self {
            tenant_id: deal.tenant_id.get(),
            title: deal.title.as_str(),
            amount: deal.amount.get(),
            stage: deal.stage.as_str(),
            probability: deal.probability.get(),
            expected_close_date: deal.expected_close_date,
            contact_id: deal.contact_id.map(ContactId::get),
            company_id: deal.company_id.map(CompanyId::get),
        }
    }
}

impl<'a> UpdateDeal<'a> {
    pub fn new(deal: &'a DomainUpdateDeal, updated_at: NaiveDateTime) -> Self {
        Self {
            title: deal.title.as_str(),
            amount: deal.amount.get(),
            stage: deal.stage.as_str(),
            probability: deal.probability.get(),
            expected_close_date: deal.expected_close_date,
            contact_id: deal.contact_id.map(ContactId::get),
            company_id: deal.company_id.map(CompanyId::get),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::deal::DealStage;
    use chrono::Utc;

    #[test]
    fn deal_into_domain() {
        let now = Utc::now().naive_utc();
        let db = Deal {
            id: 1,
            tenant_id: 1,
            title: "Renewal".into(),
            amount: 1200.5,
            stage: "negotiation".into(),
            probability: 75,
            expected_close_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            contact_id: None,
            company_id: Some(2),
            created_at: now,
            updated_at: now,
        };
        let domain = DomainDeal::try_from(db).expect("valid deal");
        assert_eq!(domain.stage, DealStage::Negotiation);
        assert_eq!(domain.amount.get(), 1200.5);
        assert_eq!(domain.company_id.map(CompanyId::get), Some(2));
    }

    #[test]
    fn out_of_range_probability_is_rejected() {
        let now = Utc::now().naive_utc();
        let db = Deal {
            id: 1,
            tenant_id: 1,
            title: "Renewal".into(),
            amount: 10.0,
            stage: "proposal".into(),
            probability: 140,
            expected_close_date: None,
            contact_id: None,
            company_id: None,
            created_at: now,
            updated_at: now,
        };
        assert_eq!(
            DomainDeal::try_from(db),
            Err(TypeConstraintError::InvalidProbability)
        );
    }
}
