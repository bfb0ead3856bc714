use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::StageError;

/// Estado de un stage dentro de una ejecución.
///
/// Transiciones válidas:
/// - `Pending` -> `Running`
/// - `Pending` -> `Skipped(Cancelled)` (cancelación antes de empezar)
/// - `Running` -> `Completed` | `Partial` | `Skipped` | `Cancelled`
///
/// No existe un estado `Failed`: el peor caso es `Skipped` o un artifact vacío.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "reason", rename_all = "snake_case")]
pub enum StageState {
    Pending,
    Running,
    /// Todos los items produjeron payload.
    Completed,
    /// Algunos items fallaron; el artifact contiene sólo los éxitos.
    Partial,
    /// El stage no escribió output.
    Skipped(SkipReason),
    /// Se pidió cancelación con items pendientes; el artifact previo queda intacto.
    Cancelled,
}

impl StageState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Pending | Self::Running)
    }

    pub fn can_advance_to(&self, next: &StageState) -> bool {
        match (self, next) {
            (Self::Pending, Self::Running) => true,
            (Self::Pending, Self::Skipped(SkipReason::Cancelled)) => true,
            (Self::Running, n) => n.is_terminal(),
            _ => false,
        }
    }
}

impl fmt::Display for StageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => f.write_str("pending"),
            Self::Running => f.write_str("running"),
            Self::Completed => f.write_str("completed"),
            Self::Partial => f.write_str("partial"),
            Self::Skipped(reason) => write!(f, "skipped ({reason})"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Motivo por el que un stage terminó sin escribir output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    MissingInput { input: String },
    MalformedInput { artifact: String, detail: String },
    StoreFailure { detail: String },
    Cancelled,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingInput { input } => write!(f, "missing input {input}"),
            Self::MalformedInput { artifact, detail } => write!(f, "malformed {artifact}: {detail}"),
            Self::StoreFailure { detail } => write!(f, "store failure: {detail}"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

impl From<StageError> for SkipReason {
    fn from(err: StageError) -> Self {
        match err {
            StageError::MissingInput { input, .. } => Self::MissingInput { input },
            StageError::Format { artifact, detail, .. } => Self::MalformedInput { artifact, detail },
            StageError::Store { detail, .. } => Self::StoreFailure { detail },
        }
    }
}
