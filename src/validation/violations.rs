//! Plan violations.

use thiserror::Error;

/// A structural problem found while validating a plan.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PlanViolation {
    #[error("plan name is empty")]
    EmptyPlanName,

    #[error("plan has no steps")]
    NoSteps,

    #[error("step #{index} has an empty name")]
    EmptyStepName { index: usize },

    #[error("step name '{name}' is used more than once")]
    DuplicateStepName { name: String },

    #[error("custom rule failed: {message}")]
    CustomRuleFailed { message: String },
}
