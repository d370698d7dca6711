use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CompanyId, ContactId, DealAmount, DealId, DealTitle, Probability, TenantId};

text_enum!(
    /// Position of a deal in the sales pipeline.
    DealStage {
        Prospecting => "prospecting",
        Qualification => "qualification",
        Proposal => "proposal",
        Negotiation => "negotiation",
        ClosedWon => "closed_won",
        ClosedLost => "closed_lost",
    }
);

impl DealStage {
    /// Win probability assumed when none is supplied.
    pub const fn default_probability(self) -> i32 {
        match self {
            DealStage::Prospecting => 10,
            DealStage::Qualification => 25,
            DealStage::Proposal => 50,
            DealStage::Negotiation => 75,
            DealStage::ClosedWon => 100,
            DealStage::ClosedLost => 0,
        }
    }

    pub const fn is_closed(self) -> bool {
        matches!(self, DealStage::ClosedWon | DealStage::ClosedLost)
    }
}

impl Default for DealStage {
    fn default() -> Self {
        DealStage::Prospecting
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Deal {
    pub id: DealId,
    pub tenant_id: TenantId,
    pub title: DealTitle,
    pub amount: DealAmount,
    pub stage: DealStage,
    pub probability: Probability,
    pub expected_close_date: Option<NaiveDate>,
    pub contact_id: Option<ContactId>,
    pub company_id: Option<CompanyId>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Clone, Debug, PartialEq)]
pub struct NewDeal {
    pub tenant_id: TenantId,
    pub title: DealTitle,
    pub amount: DealAmount,
    pub stage: DealStage,
    pub probability: Probability,
    pub expected_close_date: Option<NaiveDate>,
    pub contact_id: Option<ContactId>,
    pub company_id: Option<CompanyId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct UpdateDeal {
    pub title: DealTitle,
    pub amount: DealAmount,
    pub stage: DealStage,
    pub probability: Probability,
    pub expected_close_date: Option<NaiveDate>,
    pub contact_id: Option<ContactId>,
    pub company_id: Option<CompanyId>,
}
