use asra_core::errors::ItemTransformError;
use thiserror::Error;

/// Errores de los colaboradores externos (modelos, APIs, lectores).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum ProviderError {
    #[error("empty input: {0}")]
    EmptyInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("directory unavailable: {0}")]
    Unavailable(String),
    #[error("io error: {0}")]
    Io(String),
}

impl From<ProviderError> for ItemTransformError {
    fn from(err: ProviderError) -> Self {
        ItemTransformError::Collaborator(err.to_string())
    }
}
