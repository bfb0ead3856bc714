//! HypothesisStage: `literature_analysis.json` -> `generated_hypotheses.json`.
//! El contexto de cada paper es la unión de sus puntos clave.

use std::sync::Arc;

use asra_core::constants::{GENERATED_HYPOTHESES, LITERATURE_ANALYSIS};
use asra_core::errors::ItemTransformError;
use asra_core::model::ArtifactName;
use asra_core::stage::{PrimaryInput, StageContext, TypedStage};
use asra_providers::HypothesisGenerator;

use crate::artifacts::{HypothesisRecord, LiteratureInsights};

pub struct HypothesisStage {
    generator: Arc<dyn HypothesisGenerator>,
}

impl HypothesisStage {
    pub fn new(generator: Arc<dyn HypothesisGenerator>) -> Self {
        Self { generator }
    }
}

impl TypedStage for HypothesisStage {
    type Input = LiteratureInsights;
    type Output = HypothesisRecord;
    const ID: &'static str = "hypothesis";

    fn primary_input(&self) -> PrimaryInput<'_> {
        PrimaryInput::Artifact(LITERATURE_ANALYSIS)
    }

    fn output_artifact(&self) -> ArtifactName {
        GENERATED_HYPOTHESES
    }

    fn run_typed(&self, _key: &str, input: LiteratureInsights, _ctx: &StageContext<'_>)
                 -> Result<HypothesisRecord, ItemTransformError> {
        let context = input.key_insights.join(" ");
        let generated_hypothesis = self.generator.generate_hypothesis(&context)?;
        Ok(HypothesisRecord { context, generated_hypothesis })
    }
}
