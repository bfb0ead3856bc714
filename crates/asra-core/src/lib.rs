//! asra-core: pipeline de artifacts por etapas.
//!
//! Piezas, de las hojas hacia arriba:
//! - `store`: persistencia de artifacts JSON con reemplazo completo.
//! - `processor`: aplicación de un transform por item con aislamiento de fallos.
//! - `stage`: contrato de un stage y su runner.
//! - `driver`: orden de ejecución y reporte agregado.
pub mod cancel;
pub mod constants;
pub mod driver;
pub mod errors;
pub mod event;
pub mod hashing;
pub mod model;
pub mod processor;
pub mod stage;
pub mod store;

pub use cancel::CancellationToken;
pub use driver::{DriverBuilder, PipelineDriver, RunReport, StageReport};
pub use errors::{DriverError, ItemTransformError, SourceError, StageError, StoreError};
pub use event::{EventSink, InMemoryEventSink, LogEventSink, PipelineEvent, PipelineEventKind};
pub use model::{ArtifactMap, ArtifactName, PayloadSpec, WorkItem};
pub use processor::{BoundedProcessor, ItemProcessor, ProcessOutcome, SequentialProcessor};
pub use stage::{run_stage, ItemSource, PrimaryInput, SkipReason, StageContext, StageDefinition, StageEnv, StageState,
                TypedStage};
pub use store::{ArtifactStore, InMemoryArtifactStore};

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};
    use serde_json::json;
    use std::sync::Arc;

    // Payload tipado mínimo para un stage de prueba.
    #[derive(Serialize, Deserialize)]
    struct Doubled {
        value: i64,
    }

    impl PayloadSpec for Doubled {
        fn validate(&self) -> Result<(), String> {
            if self.value < 0 { Err("negative".into()) } else { Ok(()) }
        }
    }

    #[derive(Deserialize)]
    struct Number {
        n: i64,
    }

    struct DoubleStage;

    impl TypedStage for DoubleStage {
        type Input = Number;
        type Output = Doubled;
        const ID: &'static str = "double";

        fn primary_input(&self) -> PrimaryInput<'_> {
            PrimaryInput::Artifact(ArtifactName::from_static("numbers.json"))
        }

        fn output_artifact(&self) -> ArtifactName {
            ArtifactName::from_static("doubled.json")
        }

        fn run_typed(&self, _key: &str, input: Number, _ctx: &StageContext<'_>) -> Result<Doubled, ItemTransformError> {
            Ok(Doubled { value: input.n * 2 })
        }
    }

    #[test]
    fn typed_stage_decodes_validates_and_persists() {
        let store = InMemoryArtifactStore::new();
        let mut numbers = ArtifactMap::new();
        numbers.insert("a".into(), json!({"n": 2}));
        numbers.insert("b".into(), json!({"n": -1})); // salida negativa: no conforme
        numbers.insert("c".into(), json!({"wrong": true})); // no decodifica
        store.save(&ArtifactName::from_static("numbers.json"), &numbers).unwrap();

        let sink = Arc::new(InMemoryEventSink::new());
        let driver = PipelineDriver::builder(store).add_stage(DoubleStage).sink(sink.clone()).build();
        let report = driver.run();

        let stage = report.stage("double").expect("double report");
        assert_eq!(stage.state, StageState::Partial);
        assert_eq!((stage.processed, stage.skipped, stage.total), (1, 2, 3));

        let out = driver.store().load(&ArtifactName::from_static("doubled.json")).unwrap();
        assert_eq!(out.get("a"), Some(&json!({"value": 4})));
        assert_eq!(out.len(), 1);
        assert_eq!(sink.failed_keys("double"), vec!["b".to_string(), "c".to_string()]);
    }
}
