//! Errores del core.
//!
//! Tres niveles, de menor a mayor alcance:
//! - `ItemTransformError`: afecta a un único item; el `ItemProcessor` lo
//!   registra y continúa con el siguiente.
//! - `StoreError`: fallo del `ArtifactStore` al leer/escribir un artifact.
//! - `StageError`: aborta un stage completo; el driver lo traduce a un estado
//!   `Skipped` y continúa con el siguiente stage.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error de un item individual. Nunca sale del `ItemProcessor`.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum ItemTransformError {
    #[error("collaborator call failed: {0}")] Collaborator(String),
    #[error("transform produced an empty payload")] EmptyPayload,
    #[error("payload does not conform: {0}")] NonConforming(String),
    #[error("input payload could not be decoded: {0}")] Decode(String),
    #[error("duplicate item key")] DuplicateKey,
    #[error("transform panicked: {0}")] Panicked(String),
}

/// Errores del store de artifacts.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum StoreError {
    #[error("artifact not found: {0}")]
    NotFound(String),
    #[error("malformed artifact {name}: {detail}")]
    Format { name: String, detail: String },
    #[error("io failure on {name}: {detail}")]
    Io { name: String, detail: String },
}

/// Error de una fuente de items que no es un artifact (p. ej. un directorio).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SourceError {
    #[error("source unavailable: {0}")]
    Unavailable(String),
    #[error("source unreadable: {0}")]
    Unreadable(String),
}

/// Error que aborta un stage antes (o en lugar) de escribir su output.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum StageError {
    #[error("stage '{stage}' is missing required input '{input}'")]
    MissingInput { stage: String, input: String },
    #[error("stage '{stage}' could not read '{artifact}': {detail}")]
    Format { stage: String, artifact: String, detail: String },
    #[error("stage '{stage}' store failure: {detail}")]
    Store { stage: String, detail: String },
}

impl StageError {
    /// Traduce un `StoreError` producido al cargar `input` en el error de
    /// stage correspondiente.
    pub fn from_load(stage: &str, input: &str, err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => Self::MissingInput { stage: stage.to_string(),
                                                            input: input.to_string() },
            StoreError::Format { detail, .. } => Self::Format { stage: stage.to_string(),
                                                                 artifact: input.to_string(),
                                                                 detail },
            StoreError::Io { detail, .. } => Self::Store { stage: stage.to_string(), detail },
        }
    }

    pub fn from_source(stage: &str, input: &str, err: SourceError) -> Self {
        match err {
            SourceError::Unavailable(_) => Self::MissingInput { stage: stage.to_string(),
                                                                input: input.to_string() },
            SourceError::Unreadable(detail) => Self::Store { stage: stage.to_string(), detail },
        }
    }

    pub fn stage(&self) -> &str {
        match self {
            Self::MissingInput { stage, .. } | Self::Format { stage, .. } | Self::Store { stage, .. } => stage,
        }
    }
}

/// Error de configuración del driver (no de ejecución).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum DriverError {
    #[error("unknown stage '{0}'")]
    UnknownStage(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_on_load_becomes_missing_input() {
        let err = StageError::from_load("hypothesis", "literature_analysis.json",
                                        StoreError::NotFound("literature_analysis.json".into()));
        assert_eq!(err,
                   StageError::MissingInput { stage: "hypothesis".into(),
                                              input: "literature_analysis.json".into() });
        assert_eq!(err.stage(), "hypothesis");
    }

    #[test]
    fn format_on_load_keeps_detail() {
        let err = StageError::from_load("visualization", "experimental_analysis.json",
                                        StoreError::Format { name: "experimental_analysis.json".into(),
                                                             detail: "expected object".into() });
        assert!(err.to_string().contains("expected object"));
    }
}
