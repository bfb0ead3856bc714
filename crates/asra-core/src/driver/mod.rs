//! Pipeline Driver: ejecuta los stages en orden fijo y agrega un reporte.
//!
//! El driver nunca propaga un error más allá del límite de un stage: un
//! stage sin inputs queda `Skipped` y se evalúa el siguiente, que puede
//! encontrar sus inputs de una ejecución anterior.

mod builder;
mod report;

pub use builder::DriverBuilder;
pub use report::{FailureRecord, RunReport, StageReport};

use std::sync::Arc;

use chrono::Utc;
use log::{info, warn};
use uuid::Uuid;

use crate::cancel::CancellationToken;
use crate::errors::DriverError;
use crate::event::{EventSink, PipelineEventKind};
use crate::processor::ItemProcessor;
use crate::stage::{run_stage, SkipReason, StageDefinition, StageEnv, StageState};
use crate::store::ArtifactStore;

pub struct PipelineDriver<S: ArtifactStore> {
    store: S,
    stages: Vec<Box<dyn StageDefinition>>,
    processor: Box<dyn ItemProcessor>,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
}

impl<S: ArtifactStore> PipelineDriver<S> {
    /// Crea un builder con procesamiento secuencial y sink de log por defecto.
    pub fn builder(store: S) -> DriverBuilder<S> {
        DriverBuilder::new(store)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn stage_ids(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.id()).collect()
    }

    /// Ejecuta todos los stages en orden.
    pub fn run(&self) -> RunReport {
        let selected: Vec<&dyn StageDefinition> = self.stages.iter().map(|s| s.as_ref()).collect();
        self.execute(selected)
    }

    /// Ejecuta sólo los stages indicados, respetando el orden del pipeline.
    pub fn run_selected(&self, ids: &[&str]) -> Result<RunReport, DriverError> {
        if let Some(unknown) = ids.iter().find(|id| !self.stages.iter().any(|s| s.id() == **id)) {
            return Err(DriverError::UnknownStage(unknown.to_string()));
        }
        let selected: Vec<&dyn StageDefinition> = self.stages
                                                      .iter()
                                                      .filter(|s| ids.contains(&s.id()))
                                                      .map(|s| s.as_ref())
                                                      .collect();
        Ok(self.execute(selected))
    }

    fn execute(&self, selected: Vec<&dyn StageDefinition>) -> RunReport {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        let sink: &dyn EventSink = self.sink.as_ref();
        sink.emit(run_id, PipelineEventKind::RunStarted { stage_count: selected.len() });
        info!("run:start run={run_id} stages={:?} processor={}",
              selected.iter().map(|s| s.id()).collect::<Vec<_>>(),
              self.processor.name());

        let env = StageEnv { run_id,
                             store: &self.store,
                             processor: self.processor.as_ref(),
                             sink,
                             cancel: &self.cancel };

        let mut reports = Vec::with_capacity(selected.len());
        for (index, stage) in selected.into_iter().enumerate() {
            let mut state = StageState::Pending;
            if self.cancel.is_cancelled() {
                advance(&mut state, StageState::Skipped(SkipReason::Cancelled));
                sink.emit(run_id,
                          PipelineEventKind::StageSkipped { stage: stage.id().to_string(),
                                                            reason: SkipReason::Cancelled });
                reports.push(StageReport::skipped(stage, SkipReason::Cancelled));
                continue;
            }

            advance(&mut state, StageState::Running);
            sink.emit(run_id, PipelineEventKind::StageStarted { stage: stage.id().to_string(), index });

            match run_stage(stage, &env) {
                Ok(outcome) => {
                    advance(&mut state, outcome.state());
                    sink.emit(run_id,
                              PipelineEventKind::StageFinished { stage: outcome.stage.clone(),
                                                                 state: state.clone(),
                                                                 processed: outcome.processed,
                                                                 skipped: outcome.skipped,
                                                                 fingerprint: outcome.fingerprint.clone() });
                    reports.push(StageReport::from_outcome(outcome));
                }
                Err(err) => {
                    warn!("stage:abort run={run_id} {err}");
                    let reason = SkipReason::from(err);
                    advance(&mut state, StageState::Skipped(reason.clone()));
                    sink.emit(run_id,
                              PipelineEventKind::StageSkipped { stage: stage.id().to_string(),
                                                                reason: reason.clone() });
                    reports.push(StageReport::skipped(stage, reason));
                }
            }
        }

        let report = RunReport { run_id,
                                 started_at,
                                 finished_at: Utc::now(),
                                 stages: reports };
        sink.emit(run_id,
                  PipelineEventKind::RunFinished { completed: report.count(|s| *s == StageState::Completed),
                                                   partial: report.count(|s| *s == StageState::Partial),
                                                   skipped: report.count(|s| matches!(s, StageState::Skipped(_))),
                                                   cancelled: report.count(|s| *s == StageState::Cancelled) });
        report
    }
}

fn advance(state: &mut StageState, next: StageState) {
    debug_assert!(state.can_advance_to(&next), "invalid stage transition {state} -> {next}");
    *state = next;
}
