//! Tenant onboarding wizard.
//!
//! The wizard is a fixed, linear sequence of steps. Each submission must match
//! the current step and moves the state forward by exactly one step; the state
//! is stored as JSON on the tenant row.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::tenant::BillingPlan;

text_enum!(
    /// Stage of the onboarding wizard.
    OnboardingStep {
        Configuration => "configuration",
        Tools => "tools",
        Billing => "billing",
        Completed => "completed",
    }
);

impl OnboardingStep {
    /// The step that follows this one. `Completed` is terminal.
    pub const fn next(self) -> Self {
        match self {
            OnboardingStep::Configuration => OnboardingStep::Tools,
            OnboardingStep::Tools => OnboardingStep::Billing,
            OnboardingStep::Billing | OnboardingStep::Completed => OnboardingStep::Completed,
        }
    }

    /// Zero-based position in the wizard.
    pub fn position(self) -> usize {
        Self::ALL
            .iter()
            .position(|step| *step == self)
            .unwrap_or(Self::ALL.len())
    }
}

/// Workspace details captured by the first step.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorkspaceConfiguration {
    pub company_name: String,
    pub industry: Option<String>,
    pub team_size: Option<String>,
}

/// Payload submitted for a single wizard step.
#[derive(Clone, Debug, PartialEq)]
pub enum StepSubmission {
    Configuration(WorkspaceConfiguration),
    Tools(Vec<String>),
    Billing(BillingPlan),
}

impl StepSubmission {
    /// The step this payload belongs to.
    pub fn step(&self) -> OnboardingStep {
        match self {
            StepSubmission::Configuration(_) => OnboardingStep::Configuration,
            StepSubmission::Tools(_) => OnboardingStep::Tools,
            StepSubmission::Billing(_) => OnboardingStep::Billing,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum OnboardingError {
    #[error("onboarding is already completed")]
    AlreadyCompleted,

    #[error("step mismatch: expected {expected}, got {submitted}")]
    StepMismatch {
        expected: OnboardingStep,
        submitted: OnboardingStep,
    },
}

/// Persisted progress of the wizard.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OnboardingState {
    pub current_step: OnboardingStep,
    pub configuration: Option<WorkspaceConfiguration>,
    pub selected_tools: Vec<String>,
    pub billing_plan: Option<BillingPlan>,
    pub completed_at: Option<NaiveDateTime>,
}

impl Default for OnboardingState {
    fn default() -> Self {
        Self {
            current_step: OnboardingStep::Configuration,
            configuration: None,
            selected_tools: Vec::new(),
            billing_plan: None,
            completed_at: None,
        }
    }
}

impl OnboardingState {
    /// Restores the state from its stored JSON. Empty or unreadable values
    /// start a fresh wizard.
    pub fn from_json(raw: &str) -> Self {
        if raw.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str(raw) {
            Ok(state) => state,
            Err(err) => {
                log::warn!("Discarding unreadable onboarding state: {err}");
                Self::default()
            }
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn is_completed(&self) -> bool {
        self.current_step == OnboardingStep::Completed
    }

    /// Steps already passed, in wizard order.
    pub fn completed_steps(&self) -> Vec<OnboardingStep> {
        OnboardingStep::ALL
            .iter()
            .copied()
            .filter(|step| {
                *step != OnboardingStep::Completed && step.position() < self.current_step.position()
            })
            .collect()
    }

    /// Checks that `submitted` is the step the wizard is waiting for.
    pub fn accepts(&self, submitted: OnboardingStep) -> Result<(), OnboardingError> {
        if self.is_completed() {
            return Err(OnboardingError::AlreadyCompleted);
        }
        if submitted != self.current_step {
            return Err(OnboardingError::StepMismatch {
                expected: self.current_step,
                submitted,
            });
        }
        Ok(())
    }

    /// Applies a submission for the current step and moves to the next one.
    pub fn advance(
        &mut self,
        submission: StepSubmission,
        now: NaiveDateTime,
    ) -> Result<OnboardingStep, OnboardingError> {
        self.accepts(submission.step())?;

        match submission {
            StepSubmission::Configuration(configuration) => {
                self.configuration = Some(configuration);
            }
            StepSubmission::Tools(tools) => {
                let mut selected: Vec<String> = Vec::with_capacity(tools.len());
                for tool in tools {
                    if !selected.contains(&tool) {
                        selected.push(tool);
                    }
                }
                self.selected_tools = selected;
            }
            StepSubmission::Billing(plan) => {
                self.billing_plan = Some(plan);
                self.completed_at = Some(now);
            }
        }

        self.current_step = self.current_step.next();
        Ok(self.current_step)
    }
}
