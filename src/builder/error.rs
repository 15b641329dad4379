//! Build and run errors for plans.

use crate::core::ActionError;
use crate::journal::RunReport;
use crate::validation::PlanViolation;
use thiserror::Error;

/// Errors that can occur when building a plan.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Plan name not specified. Call .name(name) before .build()")]
    MissingName,

    #[error("Plan '{plan}' is invalid: {}", join_violations(.violations))]
    Invalid {
        plan: String,
        violations: Vec<PlanViolation>,
    },
}

fn join_violations(violations: &[PlanViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A plan run stopped at a failing step.
///
/// The report is complete: the failing step is marked failed and every
/// later step skipped.
#[derive(Debug, Error)]
#[error("step '{step}' failed: {source}")]
pub struct PlanError {
    pub step: String,
    #[source]
    pub source: ActionError,
    pub report: Box<RunReport>,
}
