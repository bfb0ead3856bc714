use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{PrimaryInput, StageContext, StageDefinition};
use crate::errors::ItemTransformError;
use crate::model::{ArtifactName, PayloadSpec, WorkItem};

/// Interfaz de alto nivel para definir stages con tipos fuertes.
///
/// Implementadores escriben `run_typed` con tipos concretos; el adaptador de
/// abajo decodifica el payload de entrada, valida el de salida y expone el
/// stage como `StageDefinition` neutral.
pub trait TypedStage: Send + Sync {
    /// Payload de cada item del input principal.
    type Input: DeserializeOwned;
    /// Payload producido por item.
    type Output: PayloadSpec;

    /// Identificador estable del stage.
    const ID: &'static str;

    fn primary_input(&self) -> PrimaryInput<'_>;

    fn secondary_inputs(&self) -> Vec<ArtifactName> {
        Vec::new()
    }

    fn output_artifact(&self) -> ArtifactName;

    fn run_typed(&self, key: &str, input: Self::Input, ctx: &StageContext<'_>)
                 -> Result<Self::Output, ItemTransformError>;
}

// -------------------------------------------------------------
// Adaptador: cualquier `TypedStage` implementa `StageDefinition`.
// -------------------------------------------------------------
impl<T: TypedStage> StageDefinition for T {
    fn id(&self) -> &str {
        T::ID
    }

    fn primary(&self) -> PrimaryInput<'_> {
        self.primary_input()
    }

    fn secondary(&self) -> Vec<ArtifactName> {
        self.secondary_inputs()
    }

    fn output(&self) -> ArtifactName {
        self.output_artifact()
    }

    fn transform(&self, item: &WorkItem, ctx: &StageContext<'_>) -> Result<Value, ItemTransformError> {
        let input: T::Input =
            serde_json::from_value(item.payload.clone()).map_err(|e| ItemTransformError::Decode(e.to_string()))?;
        self.run_typed(&item.key, input, ctx)?.into_payload()
    }
}
