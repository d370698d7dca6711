use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::deal::{DealStage, NewDeal, UpdateDeal};
use crate::domain::types::{CompanyId, ContactId, DealAmount, DealTitle, Probability, TenantId};
use crate::forms::FormError;

#[derive(Debug, Deserialize, Validate)]
/// Body of deal create and update requests.
pub struct DealForm {
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[serde(default)]
    pub amount: f64,
    pub stage: Option<DealStage>,
    /// Falls back to the stage default when omitted.
    pub probability: Option<i32>,
    pub expected_close_date: Option<NaiveDate>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DealPayload {
    pub title: DealTitle,
    pub amount: DealAmount,
    pub stage: DealStage,
    pub probability: Probability,
    pub expected_close_date: Option<NaiveDate>,
    pub contact_id: Option<ContactId>,
    pub company_id: Option<CompanyId>,
}

impl TryFrom<DealForm> for DealPayload {
    type Error = FormError;

    fn try_from(form: DealForm) -> Result<Self, Self::Error> {
        form.validate()?;

        let stage = form.stage.unwrap_or_default();
        let probability = form
            .probability
            .unwrap_or_else(|| stage.default_probability());

        Ok(Self {
            title: DealTitle::new(form.title)?,
            amount: DealAmount::new(form.amount)?,
            stage,
            probability: Probability::new(probability)?,
            expected_close_date: form.expected_close_date,
            contact_id: form.contact_id.map(ContactId::new).transpose()?,
            company_id: form.company_id.map(CompanyId::new).transpose()?,
        })
    }
}

impl DealPayload {
    pub fn into_new_deal(self, tenant_id: TenantId) -> NewDeal {
        NewDeal {
            tenant_id,
            title: self.title,
            amount: self.amount,
            stage: self.stage,
            probability: self.probability,
            expected_close_date: self.expected_close_date,
            contact_id: self.contact_id,
            company_id: self.company_id,
        }
    }

    pub fn into_update_deal(self) -> UpdateDeal {
        UpdateDeal {
            title: self.title,
            amount: self.amount,
            stage: self.stage,
            probability: self.probability,
            expected_close_date: self.expected_close_date,
            contact_id: self.contact_id,
            company_id: self.company_id,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// Query string of the deal list.
pub struct DealListParams {
    pub page: Option<usize>,
    pub search: Option<String>,
    pub stage: Option<DealStage>,
    pub contact_id: Option<i32>,
    pub company_id: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::TypeConstraintError;

    fn form(stage: Option<DealStage>, probability: Option<i32>, amount: f64) -> DealForm {
        DealForm {
            title: "Renewal".into(),
            amount,
            stage,
            probability,
            expected_close_date: None,
            contact_id: None,
            company_id: None,
        }
    }

    #[test]
    fn probability_defaults_from_stage() {
        let payload = DealPayload::try_from(form(Some(DealStage::Negotiation), None, 10.0)).unwrap();
        assert_eq!(payload.probability.get(), 75);

        let payload = DealPayload::try_from(form(None, None, 10.0)).unwrap();
        assert_eq!(payload.stage, DealStage::Prospecting);
        assert_eq!(payload.probability.get(), 10);

        let payload = DealPayload::try_from(form(Some(DealStage::Proposal), Some(65), 10.0)).unwrap();
        assert_eq!(payload.probability.get(), 65);
    }

    #[test]
    fn rejects_negative_amount_and_out_of_range_probability() {
        assert!(matches!(
            DealPayload::try_from(form(None, None, -1.0)),
            Err(FormError::Value(TypeConstraintError::InvalidAmount))
        ));
        assert!(matches!(
            DealPayload::try_from(form(None, Some(101), 1.0)),
            Err(FormError::Value(TypeConstraintError::InvalidProbability))
        ));
    }
}
