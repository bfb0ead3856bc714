//! LiteratureStage (fuente: directorio de papers)
//!
//! - Un item por paper; la clave es el título (nombre del fichero).
//! - Produce `LiteratureInsights` con los puntos clave del texto.

use std::sync::Arc;

use asra_core::constants::LITERATURE_ANALYSIS;
use asra_core::errors::ItemTransformError;
use asra_core::model::ArtifactName;
use asra_core::stage::{PrimaryInput, StageContext, TypedStage};
use asra_providers::{RawDocument, Summarizer};

use crate::artifacts::LiteratureInsights;
use crate::source::DirectorySource;

pub struct LiteratureStage {
    papers: DirectorySource,
    summarizer: Arc<dyn Summarizer>,
}

impl LiteratureStage {
    pub fn new(papers: DirectorySource, summarizer: Arc<dyn Summarizer>) -> Self {
        Self { papers, summarizer }
    }
}

impl TypedStage for LiteratureStage {
    type Input = RawDocument;
    type Output = LiteratureInsights;
    const ID: &'static str = "literature";

    fn primary_input(&self) -> PrimaryInput<'_> {
        PrimaryInput::Source(&self.papers)
    }

    fn output_artifact(&self) -> ArtifactName {
        LITERATURE_ANALYSIS
    }

    fn run_typed(&self, _key: &str, input: RawDocument, _ctx: &StageContext<'_>)
                 -> Result<LiteratureInsights, ItemTransformError> {
        let ranked = self.summarizer.embed_and_rank(&input.content)?;
        Ok(LiteratureInsights { key_insights: ranked.key_points, importance_scores: ranked.scores })
    }
}
