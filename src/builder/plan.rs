//! Named plans of provisioning steps.

use crate::builder::error::{BuildError, PlanError};
use crate::core::{apply_list, Action, ActionError, BoxedAction, Context};
use crate::journal::{RunReport, StepOutcome, StepRecord};
use crate::validation::{PlanOutline, PlanRules};
use chrono::Utc;
use std::fmt;
use stillwater::validation::Validation;
use tracing::{debug, info, info_span, warn};

/// One named step of a plan.
pub struct Step {
    name: String,
    action: BoxedAction,
}

impl Step {
    pub fn new<A: Action + 'static>(name: impl Into<String>, action: A) -> Self {
        Self {
            name: name.into(),
            action: Box::new(action),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Action for Step {
    fn apply(&self, ctx: &Context<'_>) -> Result<(), ActionError> {
        let span = info_span!("step", step = %self.name);
        let _entered = span.enter();
        debug!("step started");
        let result = self.action.apply(ctx);
        debug!(ok = result.is_ok(), "step finished");
        result
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Step").field("name", &self.name).finish()
    }
}

/// A validated, named, ordered list of steps.
///
/// As an [`Action`] a plan behaves like an action list: steps run in
/// order and the first failure stops it. [`Plan::run`] does the same while
/// keeping a [`RunReport`].
///
/// # Example
///
/// ```rust
/// use stepwise::builder::PlanBuilder;
/// use stepwise::core::{message, CapturedOutput, Context, NoSession};
///
/// let plan = PlanBuilder::new()
///     .name("hello")
///     .step("greet", message("hello"))
///     .step("part", message("bye"))
///     .build()
///     .unwrap();
///
/// let sink = CapturedOutput::new();
/// let report = plan.run(&Context::new(&sink, &NoSession, false)).unwrap();
///
/// assert!(report.succeeded());
/// assert_eq!(sink.lines(), vec!["hello", "bye"]);
/// ```
#[derive(Debug)]
pub struct Plan {
    name: String,
    steps: Vec<Step>,
}

impl Plan {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn outline(&self) -> PlanOutline {
        PlanOutline::new(self.name.clone(), self.steps.iter().map(|s| s.name.clone()))
    }

    /// Run every step in order, recording the outcome of each.
    ///
    /// On failure the returned error carries the step name, the original
    /// error and the full report.
    pub fn run(&self, ctx: &Context<'_>) -> Result<RunReport, PlanError> {
        let span = info_span!("plan", plan = %self.name);
        let _entered = span.enter();

        let mut report = RunReport::new(self.name.clone(), ctx.use_elevated());
        let mut failure: Option<(String, ActionError)> = None;

        for step in &self.steps {
            if failure.is_some() {
                report.record(StepRecord::skipped(step.name.clone()));
                continue;
            }

            let started_at = Utc::now();
            let result = step.apply(ctx);
            let finished_at = Utc::now();

            let outcome = match result {
                Ok(()) => StepOutcome::Succeeded,
                Err(err) => {
                    warn!(step = %step.name, error = %err, "step failed");
                    let outcome = StepOutcome::Failed {
                        error: err.to_string(),
                    };
                    failure = Some((step.name.clone(), err));
                    outcome
                }
            };
            report.record(StepRecord::completed(
                step.name.clone(),
                outcome,
                started_at,
                finished_at,
            ));
        }

        report.finish();
        info!(run_id = %report.id, succeeded = failure.is_none(), "plan run finished");

        match failure {
            None => Ok(report),
            Some((step, source)) => Err(PlanError {
                step,
                source,
                report: Box::new(report),
            }),
        }
    }
}

impl Action for Plan {
    fn apply(&self, ctx: &Context<'_>) -> Result<(), ActionError> {
        let span = info_span!("plan", plan = %self.name);
        let _entered = span.enter();
        apply_list(&self.steps, ctx)
    }
}

/// Builder for constructing plans with a fluent API.
pub struct PlanBuilder {
    name: Option<String>,
    steps: Vec<Step>,
    rules: PlanRules,
}

impl PlanBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            name: None,
            steps: Vec::new(),
            rules: PlanRules::default(),
        }
    }

    /// Set the plan name (required).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Append a named step.
    pub fn step<A: Action + 'static>(mut self, name: impl Into<String>, action: A) -> Self {
        self.steps.push(Step::new(name, action));
        self
    }

    /// Append several pre-built steps at once.
    pub fn steps(mut self, steps: impl IntoIterator<Item = Step>) -> Self {
        self.steps.extend(steps);
        self
    }

    /// Replace the validation rules.
    pub fn rules(mut self, rules: PlanRules) -> Self {
        self.rules = rules;
        self
    }

    /// Build the plan.
    /// Returns an error listing every rule violation.
    pub fn build(self) -> Result<Plan, BuildError> {
        let name = self.name.ok_or(BuildError::MissingName)?;
        let plan = Plan {
            name,
            steps: self.steps,
        };

        match self.rules.validate(&plan.outline()) {
            Validation::Success(_) => Ok(plan),
            Validation::Failure(errors) => Err(BuildError::Invalid {
                plan: plan.name,
                violations: errors.iter().cloned().collect(),
            }),
        }
    }
}

impl Default for PlanBuilder {
    fn default() -> Self {
        Self::new()
    }
}
