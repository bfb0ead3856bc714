use asra_core::errors::DriverError;
use asra_persistence::PersistenceError;
use thiserror::Error;

/// Errores del binario. Los fallos de items y stages nunca llegan aquí: se
/// resuelven dentro del driver y se reflejan en el `RunReport`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Error de configuración: {0}")]
    Config(String),
    #[error("Error en IO: {0}")]
    Io(#[from] std::io::Error),
    #[error("Error de persistencia: {0}")]
    Persistence(#[from] PersistenceError),
    #[error("Error del pipeline: {0}")]
    Driver(#[from] DriverError),
    #[error("Error interno: {0}")]
    Internal(String),
}

impl From<rayon::ThreadPoolBuildError> for AppError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        Self::Config(format!("worker pool: {err}"))
    }
}
