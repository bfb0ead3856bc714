//! Errores de persistencia en disco.
//! Se traducen a `StoreError` en el límite con el core.

use std::io;
use std::path::Path;

use asra_core::errors::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("not found: {0}")]
    NotFound(String),
    #[error("invalid json in {path}: {detail}")]
    InvalidJson { path: String, detail: String },
    #[error("io error on {path}: {source}")]
    Io { path: String, source: io::Error },
    #[error("serialization error: {0}")]
    Serialize(String),
    #[error("invalid relative path: {0}")]
    InvalidPath(String),
}

impl PersistenceError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io { path: path.display().to_string(), source }
    }
}

impl From<PersistenceError> for StoreError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::NotFound(name) => StoreError::NotFound(name),
            PersistenceError::InvalidJson { path, detail } => StoreError::Format { name: path, detail },
            PersistenceError::Io { path, source } => StoreError::Io { name: path, detail: source.to_string() },
            PersistenceError::Serialize(detail) => StoreError::Io { name: "<serialize>".into(), detail },
            PersistenceError::InvalidPath(path) => StoreError::Io { name: path.clone(),
                                                                    detail: "path escapes outputs directory".into() },
        }
    }
}
