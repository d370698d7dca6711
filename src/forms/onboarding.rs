use serde::Deserialize;

use crate::domain::onboarding::{OnboardingStep, StepSubmission, WorkspaceConfiguration};
use crate::domain::tenant::BillingPlan;
use crate::domain::tool::find_tool;
use crate::domain::types::TenantName;
use crate::forms::{FormError, trimmed};

#[derive(Debug, Deserialize)]
#[serde(tag = "step", rename_all = "snake_case")]
/// A wizard step submission, discriminated by its `step` field.
pub enum OnboardingForm {
    Configuration {
        company_name: String,
        industry: Option<String>,
        team_size: Option<String>,
    },
    Tools {
        #[serde(default)]
        tools: Vec<String>,
    },
    Billing {
        plan: BillingPlan,
    },
}

impl OnboardingForm {
    /// The wizard step named by the `step` field.
    pub fn step(&self) -> OnboardingStep {
        match self {
            OnboardingForm::Configuration { .. } => OnboardingStep::Configuration,
            OnboardingForm::Tools { .. } => OnboardingStep::Tools,
            OnboardingForm::Billing { .. } => OnboardingStep::Billing,
        }
    }
}

impl TryFrom<OnboardingForm> for StepSubmission {
    type Error = FormError;

    fn try_from(form: OnboardingForm) -> Result<Self, Self::Error> {
        match form {
            OnboardingForm::Configuration {
                company_name,
                industry,
                team_size,
            } => {
                let company_name = TenantName::new(company_name)?;
                Ok(StepSubmission::Configuration(WorkspaceConfiguration {
                    company_name: company_name.into_inner(),
                    industry: trimmed(industry),
                    team_size: trimmed(team_size),
                }))
            }
            OnboardingForm::Tools { tools } => {
                let tools = tools
                    .into_iter()
                    .map(|tool| {
                        let tool = tool.trim().to_string();
                        match find_tool(&tool) {
                            Some(_) => Ok(tool),
                            None => Err(FormError::UnknownTool(tool)),
                        }
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(StepSubmission::Tools(tools))
            }
            OnboardingForm::Billing { plan } => Ok(StepSubmission::Billing(plan)),
        }
    }
}
