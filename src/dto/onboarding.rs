use serde::Serialize;

use crate::domain::onboarding::{OnboardingState, OnboardingStep};

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct StepStatus {
    pub step: OnboardingStep,
    pub completed: bool,
    pub current: bool,
}

/// Wizard progress as shown to the client.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct OnboardingStatus {
    pub state: OnboardingState,
    pub steps: Vec<StepStatus>,
    pub completed: bool,
}

impl From<OnboardingState> for OnboardingStatus {
    fn from(state: OnboardingState) -> Self {
        let done = state.completed_steps();
        let steps = OnboardingStep::ALL
            .iter()
            .filter(|step| **step != OnboardingStep::Completed)
            .map(|step| StepStatus {
                step: *step,
                completed: done.contains(step),
                current: *step == state.current_step,
            })
            .collect();

        Self {
            completed: state.is_completed(),
            steps,
            state,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_points_at_configuration() {
        let status = OnboardingStatus::from(OnboardingState::default());
        assert!(!status.completed);
        assert_eq!(status.steps.len(), 3);
        assert!(status.steps[0].current);
        assert!(status.steps.iter().all(|s| !s.completed));
    }
}
