//! Reporte de ejecución: estado terminal y conteos por stage.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::ArtifactName;
use crate::stage::{SkipReason, StageDefinition, StageOutcome, StageState};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub key: String,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageReport {
    pub stage: String,
    pub output: ArtifactName,
    pub state: StageState,
    pub total: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failures: Vec<FailureRecord>,
    pub fingerprint: Option<String>,
}

impl StageReport {
    pub(crate) fn from_outcome(outcome: StageOutcome) -> Self {
        let state = outcome.state();
        Self { stage: outcome.stage,
               output: outcome.output,
               state,
               total: outcome.total,
               processed: outcome.processed,
               skipped: outcome.skipped,
               failures: outcome.failures
                                .into_iter()
                                .map(|f| FailureRecord { key: f.key, error: f.error.to_string() })
                                .collect(),
               fingerprint: outcome.fingerprint }
    }

    pub(crate) fn skipped(stage: &dyn StageDefinition, reason: SkipReason) -> Self {
        Self { stage: stage.id().to_string(),
               output: stage.output(),
               state: StageState::Skipped(reason),
               total: 0,
               processed: 0,
               skipped: 0,
               failures: Vec::new(),
               fingerprint: None }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub stages: Vec<StageReport>,
}

impl RunReport {
    pub fn stage(&self, id: &str) -> Option<&StageReport> {
        self.stages.iter().find(|s| s.stage == id)
    }

    pub fn count(&self, pred: impl Fn(&StageState) -> bool) -> usize {
        self.stages.iter().filter(|s| pred(&s.state)).count()
    }

    /// Todos los stages terminaron `Completed`.
    pub fn is_clean(&self) -> bool {
        !self.stages.is_empty() && self.count(|s| *s == StageState::Completed) == self.stages.len()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "run {} ({} ms)", self.run_id, (self.finished_at - self.started_at).num_milliseconds())?;
        for s in &self.stages {
            writeln!(f,
                     "  {:<14} {:<40} processed={:<4} skipped={:<4} -> {}",
                     s.stage, s.state.to_string(), s.processed, s.skipped, s.output)?;
        }
        Ok(())
    }
}
