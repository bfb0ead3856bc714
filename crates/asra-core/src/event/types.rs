//! Tipos de evento del pipeline y estructura `PipelineEvent`.
//!
//! Cada ejecución del driver emite eventos a un `EventSink`. Los eventos son
//! el canal de diagnóstico: un item que falla no deja rastro en el artifact,
//! sólo un `ItemFailed` aquí (y en el log).
use chrono::{DateTime, Utc};
use log::Level;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::ItemTransformError;
use crate::stage::{SkipReason, StageState};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PipelineEventKind {
    /// Inicio de una ejecución del driver.
    RunStarted { stage_count: usize },
    /// Un stage pasó a `Running`. No implica que sus inputs existan.
    StageStarted { stage: String, index: usize },
    /// Un item falló y fue omitido del artifact de salida.
    ItemFailed { stage: String, key: String, error: ItemTransformError },
    /// Items no intentados porque se pidió cancelación.
    ItemsCancelled { stage: String, count: usize },
    /// El stage no se ejecutó (o se abortó) sin escribir output.
    StageSkipped { stage: String, reason: SkipReason },
    /// El stage terminó; `fingerprint` es el hash del artifact escrito.
    StageFinished {
        stage: String,
        state: StageState,
        processed: usize,
        skipped: usize,
        fingerprint: Option<String>,
    },
    /// Cierre de la ejecución con el conteo de estados terminales.
    RunFinished { completed: usize, partial: usize, skipped: usize, cancelled: usize },
}

impl PipelineEventKind {
    pub fn level(&self) -> Level {
        match self {
            Self::ItemFailed { .. } | Self::ItemsCancelled { .. } | Self::StageSkipped { .. } => Level::Warn,
            Self::StageFinished { state: StageState::Partial, .. } => Level::Warn,
            Self::RunStarted { .. } | Self::RunFinished { .. } => Level::Info,
            Self::StageStarted { .. } => Level::Debug,
            Self::StageFinished { .. } => Level::Info,
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::RunStarted { stage_count } => format!("run:start stages={stage_count}"),
            Self::StageStarted { stage, index } => format!("stage:start stage={stage} index={index}"),
            Self::ItemFailed { stage, key, error } => format!("item:failed stage={stage} key={key:?} error={error}"),
            Self::ItemsCancelled { stage, count } => format!("item:cancelled stage={stage} count={count}"),
            Self::StageSkipped { stage, reason } => format!("stage:skipped stage={stage} reason={reason}"),
            Self::StageFinished { stage, state, processed, skipped, .. } => {
                format!("stage:done stage={stage} state={state} processed={processed} skipped={skipped}")
            }
            Self::RunFinished { completed, partial, skipped, cancelled } => {
                format!("run:done completed={completed} partial={partial} skipped={skipped} cancelled={cancelled}")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineEvent {
    pub seq: u64, // asignado por el sink (orden de emisión)
    pub run_id: Uuid,
    pub kind: PipelineEventKind,
    pub ts: DateTime<Utc>,
}
