//! Ejecución de un stage: cargar inputs -> procesar items -> persistir.

use log::{info, warn};
use uuid::Uuid;

use super::{PrimaryInput, StageContext, StageDefinition, StageInputs, StageState};
use crate::cancel::CancellationToken;
use crate::errors::StageError;
use crate::event::EventSink;
use crate::model::{artifact_fingerprint, ArtifactName, WorkItem};
use crate::processor::{ItemFailure, ItemProcessor, ProcessContext};
use crate::store::ArtifactStore;

/// Colaboradores compartidos por todos los stages de una ejecución.
pub struct StageEnv<'a> {
    pub run_id: Uuid,
    pub store: &'a dyn ArtifactStore,
    pub processor: &'a dyn ItemProcessor,
    pub sink: &'a dyn EventSink,
    pub cancel: &'a CancellationToken,
}

/// Resultado de un stage que llegó a procesar items.
#[derive(Debug, Clone)]
pub struct StageOutcome {
    pub stage: String,
    pub output: ArtifactName,
    pub total: usize,
    pub processed: usize,
    pub skipped: usize,
    pub failures: Vec<ItemFailure>,
    /// Hash del artifact escrito; `None` si no se escribió (cancelación).
    pub fingerprint: Option<String>,
}

impl StageOutcome {
    pub fn written(&self) -> bool {
        self.fingerprint.is_some()
    }

    pub fn state(&self) -> StageState {
        if !self.written() {
            StageState::Cancelled
        } else if self.skipped == 0 {
            StageState::Completed
        } else {
            StageState::Partial
        }
    }
}

/// Ejecuta `stage` completo.
///
/// Falla rápido (sin trabajo ni escritura) si el input principal o algún
/// secundario no existe o está mal formado. Si llega a procesar, escribe el
/// artifact de salida aunque quede vacío; sólo una cancelación con items
/// pendientes evita la escritura.
pub fn run_stage(stage: &dyn StageDefinition, env: &StageEnv<'_>) -> Result<StageOutcome, StageError> {
    let stage_id = stage.id();
    let items = load_primary(stage, env)?;
    let inputs = load_secondary(stage, env)?;
    let output = stage.output();
    let total = items.len();
    info!("stage:items stage={stage_id} total={total} processor={}", env.processor.name());

    let ctx = StageContext { stage_id, inputs: &inputs, store: env.store };
    let transform = |item: &WorkItem| stage.transform(item, &ctx);
    let pctx = ProcessContext { run_id: env.run_id, stage_id, sink: env.sink, cancel: env.cancel };
    let outcome = env.processor.process(&pctx, items, &transform);
    debug_assert_eq!(outcome.total(), total);

    let fingerprint = if outcome.was_cancelled() {
        warn!("stage:cancelled stage={stage_id} pending={} (output {output} left untouched)",
              outcome.cancelled.len());
        None
    } else {
        env.store
           .save(&output, &outcome.outputs)
           .map_err(|e| StageError::Store { stage: stage_id.to_string(), detail: e.to_string() })?;
        Some(artifact_fingerprint(&outcome.outputs))
    };

    Ok(StageOutcome { stage: stage_id.to_string(),
                      output,
                      total,
                      processed: outcome.processed(),
                      skipped: outcome.skipped(),
                      failures: outcome.failures,
                      fingerprint })
}

fn load_primary(stage: &dyn StageDefinition, env: &StageEnv<'_>) -> Result<Vec<WorkItem>, StageError> {
    match stage.primary() {
        PrimaryInput::Artifact(name) => {
            let artifact = env.store
                              .load(&name)
                              .map_err(|e| StageError::from_load(stage.id(), name.as_str(), e))?;
            Ok(artifact.into_iter().map(|(key, payload)| WorkItem { key, payload }).collect())
        }
        PrimaryInput::Source(source) => {
            let label = source.describe();
            let items = source.load().map_err(|e| StageError::from_source(stage.id(), &label, e))?;
            if items.is_empty() {
                return Err(StageError::MissingInput { stage: stage.id().to_string(), input: label });
            }
            Ok(items)
        }
    }
}

fn load_secondary(stage: &dyn StageDefinition, env: &StageEnv<'_>) -> Result<StageInputs, StageError> {
    let mut inputs = StageInputs::new();
    for name in stage.secondary() {
        let artifact = env.store
                          .load(&name)
                          .map_err(|e| StageError::from_load(stage.id(), name.as_str(), e))?;
        inputs.insert(name, artifact);
    }
    Ok(inputs)
}
