//! Per-step records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// What happened to one step of a plan run.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    Succeeded,
    Failed { error: String },
    /// Never started because an earlier step failed.
    Skipped,
}

/// Record of a single step.
///
/// Skipped steps carry no timestamps.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub name: String,
    pub outcome: StepOutcome,
    pub started_at: Option<DateTime<Utc>>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl StepRecord {
    pub fn completed(
        name: impl Into<String>,
        outcome: StepOutcome,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: name.into(),
            outcome,
            started_at: Some(started_at),
            finished_at: Some(finished_at),
        }
    }

    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            outcome: StepOutcome::Skipped,
            started_at: None,
            finished_at: None,
        }
    }

    pub fn ran(&self) -> bool {
        !matches!(self.outcome, StepOutcome::Skipped)
    }

    /// Wall time spent in the step, if it ran.
    pub fn duration(&self) -> Option<Duration> {
        match (self.started_at, self.finished_at) {
            (Some(start), Some(end)) => end.signed_duration_since(start).to_std().ok(),
            _ => None,
        }
    }
}
