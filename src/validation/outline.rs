//! What validation rules get to see of a plan.

/// Name-level view of a plan, independent of the actions it carries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlanOutline {
    pub name: String,
    pub steps: Vec<String>,
}

impl PlanOutline {
    pub fn new<I, S>(name: impl Into<String>, steps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            steps: steps.into_iter().map(Into::into).collect(),
        }
    }

    pub fn contains(&self, step: &str) -> bool {
        self.steps.iter().any(|s| s == step)
    }

    /// Position of `step`, if present.
    pub fn position(&self, step: &str) -> Option<usize> {
        self.steps.iter().position(|s| s == step)
    }
}
