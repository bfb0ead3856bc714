//! Almacenamiento de artifacts.
//!
//! Contrato compartido por todos los stages:
//! - `load` falla con `NotFound` si el artifact no existe y con `Format` si
//!   el contenido no es un objeto JSON.
//! - `save` reemplaza por completo cualquier versión previa (nunca mezcla) y
//!   es todo-o-nada desde el punto de vista del llamador.
//!
//! Un mismo directorio/store no admite dos pipelines escribiendo a la vez; no
//! hay locking, es responsabilidad del llamador.

mod memory;

pub use memory::InMemoryArtifactStore;

use crate::errors::StoreError;
use crate::model::{ArtifactMap, ArtifactName};

pub trait ArtifactStore: Send + Sync {
    fn load(&self, name: &ArtifactName) -> Result<ArtifactMap, StoreError>;
    fn save(&self, name: &ArtifactName, artifact: &ArtifactMap) -> Result<(), StoreError>;
    fn exists(&self, name: &ArtifactName) -> bool;
    /// Guarda un fichero binario auxiliar (p. ej. una imagen) en `relative_path`
    /// y devuelve su ubicación.
    fn write_blob(&self, relative_path: &str, bytes: &[u8]) -> Result<String, StoreError>;
}

impl<S: ArtifactStore + ?Sized> ArtifactStore for &S {
    fn load(&self, name: &ArtifactName) -> Result<ArtifactMap, StoreError> {
        (**self).load(name)
    }
    fn save(&self, name: &ArtifactName, artifact: &ArtifactMap) -> Result<(), StoreError> {
        (**self).save(name, artifact)
    }
    fn exists(&self, name: &ArtifactName) -> bool {
        (**self).exists(name)
    }
    fn write_blob(&self, relative_path: &str, bytes: &[u8]) -> Result<String, StoreError> {
        (**self).write_blob(relative_path, bytes)
    }
}
