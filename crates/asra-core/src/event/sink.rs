use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use uuid::Uuid;

use super::{PipelineEvent, PipelineEventKind};

/// Colaborador de observabilidad. Recibe eventos en orden de emisión.
pub trait EventSink: Send + Sync {
    fn emit(&self, run_id: Uuid, kind: PipelineEventKind);
}

/// Reenvía un evento al facade `log` con su nivel.
pub fn log_event(run_id: Uuid, kind: &PipelineEventKind) {
    log::log!(target: "asra::pipeline", kind.level(), "{} run={run_id}", kind.message());
}

/// Sink que sólo escribe en el log.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogEventSink;

impl EventSink for LogEventSink {
    fn emit(&self, run_id: Uuid, kind: PipelineEventKind) {
        log_event(run_id, &kind);
    }
}

/// Sink que conserva los eventos (además de loguearlos).
#[derive(Debug, Default)]
pub struct InMemoryEventSink {
    inner: Mutex<Vec<PipelineEvent>>,
}

impl InMemoryEventSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<PipelineEvent> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Claves de los items fallidos de `stage`, en orden de emisión.
    pub fn failed_keys(&self, stage: &str) -> Vec<String> {
        self.events()
            .into_iter()
            .filter_map(|e| match e.kind {
                PipelineEventKind::ItemFailed { stage: s, key, .. } if s == stage => Some(key),
                _ => None,
            })
            .collect()
    }
}

impl EventSink for InMemoryEventSink {
    fn emit(&self, run_id: Uuid, kind: PipelineEventKind) {
        log_event(run_id, &kind);
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = guard.len() as u64;
        guard.push(PipelineEvent { seq, run_id, kind, ts: Utc::now() });
    }
}

impl<S: EventSink + ?Sized> EventSink for &S {
    fn emit(&self, run_id: Uuid, kind: PipelineEventKind) {
        (**self).emit(run_id, kind)
    }
}
