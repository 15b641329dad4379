//! Validation rules for plans using Validation.

use crate::validation::outline::PlanOutline;
use crate::validation::violations::PlanViolation;
use std::collections::HashSet;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;

/// Result of validating a plan: success, or every violation found.
pub type PlanValidation = Validation<(), NonEmptyVec<PlanViolation>>;

/// Type alias for custom rule functions
pub type PlanRule = Box<dyn Fn(&PlanOutline) -> PlanValidation + Send + Sync>;

/// Rules a plan must satisfy before it can run.
/// Uses Validation to accumulate ALL violations.
pub struct PlanRules {
    pub(crate) allow_empty: bool,
    pub(crate) custom_rules: Vec<PlanRule>,
}

impl PlanRules {
    pub fn new() -> Self {
        Self {
            allow_empty: false,
            custom_rules: Vec::new(),
        }
    }

    /// Accept plans without steps.
    pub fn allow_empty(mut self, allow: bool) -> Self {
        self.allow_empty = allow;
        self
    }

    /// Add a custom validation rule
    pub fn require<F>(mut self, rule: F) -> Self
    where
        F: Fn(&PlanOutline) -> PlanValidation + Send + Sync + 'static,
    {
        self.custom_rules.push(Box::new(rule));
        self
    }

    /// Add a simple predicate rule with error message
    pub fn require_pred<F>(mut self, predicate: F, error_msg: String) -> Self
    where
        F: Fn(&PlanOutline) -> bool + Send + Sync + 'static,
    {
        let rule = move |outline: &PlanOutline| {
            if predicate(outline) {
                Validation::success(())
            } else {
                Validation::fail(PlanViolation::CustomRuleFailed {
                    message: error_msg.clone(),
                })
            }
        };
        self.custom_rules.push(Box::new(rule));
        self
    }

    /// Validate `outline` against every rule, accumulating ALL violations.
    pub fn validate(&self, outline: &PlanOutline) -> PlanValidation {
        let mut checks: Vec<PlanValidation> = vec![check_plan_name(outline)];

        if !self.allow_empty {
            checks.push(check_has_steps(outline));
        }
        checks.extend(check_step_names(outline));

        for rule in &self.custom_rules {
            checks.push(rule(outline));
        }

        Validation::all_vec(checks).map(|_| ())
    }
}

impl Default for PlanRules {
    fn default() -> Self {
        Self::new()
    }
}

/// Validate a plan with the default rules.
pub fn validate_plan(outline: &PlanOutline) -> PlanValidation {
    PlanRules::default().validate(outline)
}

fn check_plan_name(outline: &PlanOutline) -> PlanValidation {
    if outline.name.trim().is_empty() {
        Validation::fail(PlanViolation::EmptyPlanName)
    } else {
        Validation::success(())
    }
}

fn check_has_steps(outline: &PlanOutline) -> PlanValidation {
    if outline.steps.is_empty() {
        Validation::fail(PlanViolation::NoSteps)
    } else {
        Validation::success(())
    }
}

// Each duplicated name is reported once, at its second occurrence.
fn check_step_names(outline: &PlanOutline) -> Vec<PlanValidation> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut checks = Vec::new();

    for (index, name) in outline.steps.iter().enumerate() {
        if name.trim().is_empty() {
            checks.push(Validation::fail(PlanViolation::EmptyStepName { index }));
            continue;
        }
        if !seen.insert(name.as_str()) && reported.insert(name.as_str()) {
            checks.push(Validation::fail(PlanViolation::DuplicateStepName {
                name: name.clone(),
            }));
        }
    }

    checks
}
