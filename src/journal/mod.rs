//! Run journal for plans.
//!
//! Every [`Plan::run`](crate::builder::Plan::run) produces a [`RunReport`]
//! that says which steps ran, which one failed, and which were skipped.
//! Reports can be stored as JSON or binary to audit provisioning runs after
//! the fact.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

pub mod error;
pub mod record;

pub use error::JournalError;
pub use record::{StepOutcome, StepRecord};

/// Version identifier for report format
pub const REPORT_VERSION: u32 = 1;

/// Serializable journal of one plan run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Report format version
    pub version: u32,

    /// Unique run identifier
    pub id: Uuid,

    /// Name of the plan that ran
    pub plan: String,

    /// Whether the run used elevated privileges
    pub use_elevated: bool,

    pub started_at: DateTime<Utc>,

    /// Unset while the run is in progress
    pub finished_at: Option<DateTime<Utc>>,

    /// One record per plan step, in plan order
    pub steps: Vec<StepRecord>,
}

impl RunReport {
    pub fn new(plan: impl Into<String>, use_elevated: bool) -> Self {
        Self {
            version: REPORT_VERSION,
            id: Uuid::new_v4(),
            plan: plan.into(),
            use_elevated,
            started_at: Utc::now(),
            finished_at: None,
            steps: Vec::new(),
        }
    }

    pub fn record(&mut self, record: StepRecord) {
        self.steps.push(record);
    }

    /// Mark the run as finished now.
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn is_finished(&self) -> bool {
        self.finished_at.is_some()
    }

    /// True when the run finished and every step succeeded.
    pub fn succeeded(&self) -> bool {
        self.is_finished()
            && self
                .steps
                .iter()
                .all(|s| matches!(s.outcome, StepOutcome::Succeeded))
    }

    /// The step that stopped the run, if any.
    pub fn failed_step(&self) -> Option<&StepRecord> {
        self.steps
            .iter()
            .find(|s| matches!(s.outcome, StepOutcome::Failed { .. }))
    }

    pub fn skipped_steps(&self) -> impl Iterator<Item = &StepRecord> {
        self.steps.iter().filter(|s| !s.ran())
    }

    /// Total run time. `None` until the run finishes.
    pub fn duration(&self) -> Option<Duration> {
        self.finished_at
            .and_then(|end| end.signed_duration_since(self.started_at).to_std().ok())
    }

    pub fn to_json(&self) -> Result<String, JournalError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| JournalError::SerializationFailed(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, JournalError> {
        let report: Self = serde_json::from_str(json)
            .map_err(|e| JournalError::DeserializationFailed(e.to_string()))?;
        report.check_version()
    }

    pub fn to_binary(&self) -> Result<Vec<u8>, JournalError> {
        bincode::serialize(self).map_err(|e| JournalError::SerializationFailed(e.to_string()))
    }

    pub fn from_binary(bytes: &[u8]) -> Result<Self, JournalError> {
        let report: Self = bincode::deserialize(bytes)
            .map_err(|e| JournalError::DeserializationFailed(e.to_string()))?;
        report.check_version()
    }

    fn check_version(self) -> Result<Self, JournalError> {
        if self.version == REPORT_VERSION {
            Ok(self)
        } else {
            Err(JournalError::UnsupportedVersion {
                found: self.version,
                supported: REPORT_VERSION,
            })
        }
    }
}
