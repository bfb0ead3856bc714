//! AnalysisStage (fuente: directorio de datasets)
//!
//! La respuesta del analizador se decodifica a `ExperimentalAnalysis`; una
//! forma inesperada cuenta como `NonConforming`, no como error de input.

use std::sync::Arc;

use asra_core::constants::EXPERIMENTAL_ANALYSIS;
use asra_core::errors::ItemTransformError;
use asra_core::model::ArtifactName;
use asra_core::stage::{PrimaryInput, StageContext, TypedStage};
use asra_providers::{DatasetAnalyzer, RawDocument};

use crate::artifacts::ExperimentalAnalysis;
use crate::source::DirectorySource;

pub struct AnalysisStage {
    datasets: DirectorySource,
    analyzer: Arc<dyn DatasetAnalyzer>,
}

impl AnalysisStage {
    pub fn new(datasets: DirectorySource, analyzer: Arc<dyn DatasetAnalyzer>) -> Self {
        Self { datasets, analyzer }
    }
}

impl TypedStage for AnalysisStage {
    type Input = RawDocument;
    type Output = ExperimentalAnalysis;
    const ID: &'static str = "analysis";

    fn primary_input(&self) -> PrimaryInput<'_> {
        PrimaryInput::Source(&self.datasets)
    }

    fn output_artifact(&self) -> ArtifactName {
        EXPERIMENTAL_ANALYSIS
    }

    fn run_typed(&self, key: &str, input: RawDocument, _ctx: &StageContext<'_>)
                 -> Result<ExperimentalAnalysis, ItemTransformError> {
        let raw = self.analyzer.analyze(key, &input.content)?;
        serde_json::from_value(raw).map_err(|e| ItemTransformError::NonConforming(e.to_string()))
    }
}
