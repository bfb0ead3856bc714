use indexmap::IndexMap;
use serde_json::Value;

use crate::errors::{ItemTransformError, SourceError};
use crate::model::{ArtifactMap, ArtifactName, WorkItem};
use crate::store::ArtifactStore;

/// Fuente de items que no es un artifact: documentos crudos, datasets...
pub trait ItemSource: Send + Sync {
    /// Descripción usada en errores y logs (p. ej. la ruta del directorio).
    fn describe(&self) -> String;

    /// Items en orden determinista. Una fuente sin items equivale a un input
    /// ausente.
    fn load(&self) -> Result<Vec<WorkItem>, SourceError>;
}

/// Input principal de un stage: define la colección de items.
pub enum PrimaryInput<'a> {
    Artifact(ArtifactName),
    Source(&'a dyn ItemSource),
}

impl PrimaryInput<'_> {
    pub fn describe(&self) -> String {
        match self {
            Self::Artifact(name) => name.to_string(),
            Self::Source(src) => src.describe(),
        }
    }
}

/// Artifacts secundarios ya cargados, disponibles para cruzar datos.
#[derive(Debug, Default, Clone)]
pub struct StageInputs {
    secondary: IndexMap<ArtifactName, ArtifactMap>,
}

impl StageInputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: ArtifactName, artifact: ArtifactMap) {
        self.secondary.insert(name, artifact);
    }

    pub fn get(&self, name: &ArtifactName) -> Option<&ArtifactMap> {
        self.secondary.get(name)
    }

    /// Como `get`, pero la ausencia es un error del item.
    pub fn require(&self, name: &ArtifactName) -> Result<&ArtifactMap, ItemTransformError> {
        self.get(name)
            .ok_or_else(|| ItemTransformError::NonConforming(format!("secondary input {name} not loaded")))
    }
}

/// Contexto entregado al transform de cada item.
pub struct StageContext<'a> {
    pub stage_id: &'a str,
    pub inputs: &'a StageInputs,
    pub store: &'a dyn ArtifactStore,
}

/// Trait que define un Stage. Las implementaciones deben ser puras respecto
/// a sus inputs (salvo la llamada al colaborador externo).
pub trait StageDefinition: Send + Sync {
    /// Identificador estable y único dentro del pipeline.
    fn id(&self) -> &str;

    /// Nombre opcional amigable.
    fn name(&self) -> &str {
        self.id()
    }

    fn primary(&self) -> PrimaryInput<'_>;

    /// Artifacts adicionales requeridos. Todos deben existir.
    fn secondary(&self) -> Vec<ArtifactName> {
        Vec::new()
    }

    fn output(&self) -> ArtifactName;

    fn transform(&self, item: &WorkItem, ctx: &StageContext<'_>) -> Result<Value, ItemTransformError>;
}
