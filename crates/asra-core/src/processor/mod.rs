//! Item Processor: aplica un transform a cada item aislando los fallos.
//!
//! Política única de recuperación: registrar y omitir. Sin reintentos.
//! Contrato común a todas las estrategias:
//! - el resultado contiene exactamente las claves cuyo transform tuvo éxito
//!   con un payload no vacío;
//! - `processed + skipped == total`;
//! - los eventos `ItemFailed` se emiten en el orden de entrada.

mod bounded;
mod sequential;

pub use bounded::BoundedProcessor;
pub use sequential::SequentialProcessor;

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

use serde_json::Value;
use uuid::Uuid;

use crate::cancel::CancellationToken;
use crate::errors::ItemTransformError;
use crate::event::{EventSink, PipelineEventKind};
use crate::model::{is_empty_payload, ArtifactMap, WorkItem};

/// Transform por item. Debe ser `Sync` para que las estrategias concurrentes
/// puedan compartirlo entre hilos.
pub type ItemTransform<'a> = dyn Fn(&WorkItem) -> Result<Value, ItemTransformError> + Sync + 'a;

/// Contexto que el stage entrega al processor.
pub struct ProcessContext<'a> {
    pub run_id: Uuid,
    pub stage_id: &'a str,
    pub sink: &'a dyn EventSink,
    pub cancel: &'a CancellationToken,
}

/// Fallo registrado de un item (no se persiste en el artifact).
#[derive(Debug, Clone, PartialEq)]
pub struct ItemFailure {
    pub key: String,
    pub error: ItemTransformError,
}

/// Resultado de procesar una colección.
#[derive(Debug, Default, Clone)]
pub struct ProcessOutcome {
    pub outputs: ArtifactMap,
    pub failures: Vec<ItemFailure>,
    /// Claves no intentadas por cancelación.
    pub cancelled: Vec<String>,
}

impl ProcessOutcome {
    pub fn processed(&self) -> usize {
        self.outputs.len()
    }

    pub fn skipped(&self) -> usize {
        self.failures.len() + self.cancelled.len()
    }

    pub fn total(&self) -> usize {
        self.processed() + self.skipped()
    }

    pub fn was_cancelled(&self) -> bool {
        !self.cancelled.is_empty()
    }
}

/// Estrategia de ejecución de un lote de items.
pub trait ItemProcessor: Send + Sync {
    fn name(&self) -> &str;

    fn process(&self, ctx: &ProcessContext<'_>, items: Vec<WorkItem>, transform: &ItemTransform<'_>) -> ProcessOutcome;
}

/// Resultado de intentar (o no) un item.
pub(crate) enum Attempt {
    Done(Result<Value, ItemTransformError>),
    NotStarted,
}

/// Ejecuta el transform de un item con aislamiento total: errores, payloads
/// vacíos y pánicos se convierten en `ItemTransformError`.
pub(crate) fn attempt(item: &WorkItem, transform: &ItemTransform<'_>) -> Result<Value, ItemTransformError> {
    match catch_unwind(AssertUnwindSafe(|| transform(item))) {
        Ok(Ok(value)) if is_empty_payload(&value) => Err(ItemTransformError::EmptyPayload),
        Ok(result) => result,
        Err(panic) => {
            let msg = panic.downcast_ref::<&str>()
                           .map(|s| s.to_string())
                           .or_else(|| panic.downcast_ref::<String>().cloned())
                           .unwrap_or_else(|| "non-string panic payload".to_string());
            Err(ItemTransformError::Panicked(msg))
        }
    }
}

/// Ensambla el `ProcessOutcome` a partir de los intentos en orden de entrada.
pub(crate) fn collect(ctx: &ProcessContext<'_>, attempts: Vec<(String, Attempt)>) -> ProcessOutcome {
    let mut outcome = ProcessOutcome::default();
    for (key, att) in attempts {
        match att {
            Attempt::NotStarted => outcome.cancelled.push(key),
            Attempt::Done(Ok(value)) => {
                log::debug!("item:ok stage={} key={key:?}", ctx.stage_id);
                outcome.outputs.insert(key, value);
            }
            Attempt::Done(Err(error)) => fail(ctx, &mut outcome, key, error),
        }
    }
    if outcome.was_cancelled() {
        ctx.sink.emit(ctx.run_id,
                      PipelineEventKind::ItemsCancelled { stage: ctx.stage_id.to_string(),
                                                          count: outcome.cancelled.len() });
    }
    outcome
}

fn fail(ctx: &ProcessContext<'_>, outcome: &mut ProcessOutcome, key: String, error: ItemTransformError) {
    ctx.sink.emit(ctx.run_id,
                  PipelineEventKind::ItemFailed { stage: ctx.stage_id.to_string(),
                                                  key: key.clone(),
                                                  error: error.clone() });
    outcome.failures.push(ItemFailure { key, error });
}

/// Marca las claves repetidas: sólo la primera aparición se ejecuta, las
/// demás cuentan como fallo para no romper la ley de conservación.
pub(crate) fn duplicate_flags(items: &[WorkItem]) -> Vec<bool> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(items.len());
    items.iter().map(|i| !seen.insert(i.key.as_str())).collect()
}
