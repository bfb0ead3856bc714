//! VisualizationStage
//!
//! - Primario: `generated_hypotheses.json` (un item por hipótesis).
//! - Secundario: `experimental_analysis.json`, requerido. Si falta, el stage
//!   no se ejecuta y `visualization_metadata.json` queda intacto.
//! - Cada imagen se guarda bajo `visualizations/` y el artifact registra su
//!   ubicación.

use std::collections::BTreeMap;
use std::sync::Arc;

use asra_core::constants::{EXPERIMENTAL_ANALYSIS, GENERATED_HYPOTHESES, VISUALIZATION_DIR, VISUALIZATION_METADATA};
use asra_core::errors::ItemTransformError;
use asra_core::hashing::hash_str;
use asra_core::model::{ArtifactMap, ArtifactName};
use asra_core::stage::{PrimaryInput, StageContext, TypedStage};
use asra_providers::VisualRenderer;
use log::debug;

use crate::artifacts::{ExperimentalAnalysis, HypothesisRecord};

const TOP_FEATURES: usize = 3;

pub struct VisualizationStage {
    renderer: Arc<dyn VisualRenderer>,
}

impl VisualizationStage {
    pub fn new(renderer: Arc<dyn VisualRenderer>) -> Self {
        Self { renderer }
    }
}

impl TypedStage for VisualizationStage {
    type Input = HypothesisRecord;
    type Output = String;
    const ID: &'static str = "visualization";

    fn primary_input(&self) -> PrimaryInput<'_> {
        PrimaryInput::Artifact(GENERATED_HYPOTHESES)
    }

    fn secondary_inputs(&self) -> Vec<ArtifactName> {
        vec![EXPERIMENTAL_ANALYSIS]
    }

    fn output_artifact(&self) -> ArtifactName {
        VISUALIZATION_METADATA
    }

    fn run_typed(&self, key: &str, input: HypothesisRecord, ctx: &StageContext<'_>)
                 -> Result<String, ItemTransformError> {
        let analysis = ctx.inputs.require(&EXPERIMENTAL_ANALYSIS)?;
        let prompt = build_prompt(&input, &strongest_features(analysis, TOP_FEATURES));
        let image = self.renderer.render_visual(&prompt)?;
        let relative = format!("{VISUALIZATION_DIR}/{}.{}", file_stem(key), image.extension);
        debug!("visualization:render key={key:?} file={relative} bytes={}", image.bytes.len());
        ctx.store
           .write_blob(&relative, &image.bytes)
           .map_err(|e| ItemTransformError::Collaborator(format!("could not store image: {e}")))
    }
}

/// Features con mayor importancia en cualquiera de los datasets.
///
/// Entradas que no decodifican como `ExperimentalAnalysis` se ignoran.
pub fn strongest_features(analysis: &ArtifactMap, n: usize) -> Vec<(String, f64)> {
    let mut best: BTreeMap<String, f64> = BTreeMap::new();
    for payload in analysis.values() {
        let Ok(parsed) = serde_json::from_value::<ExperimentalAnalysis>(payload.clone()) else {
            continue;
        };
        for (feature, score) in parsed.ranked_features() {
            let slot = best.entry(feature.to_string()).or_insert(score);
            if score > *slot {
                *slot = score;
            }
        }
    }
    let mut ranked: Vec<(String, f64)> = best.into_iter().collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    ranked.truncate(n);
    ranked
}

pub fn build_prompt(record: &HypothesisRecord, features: &[(String, f64)]) -> String {
    let mut prompt = format!("Scientific illustration of: {}", record.statement());
    if !features.is_empty() {
        let factors: Vec<String> = features.iter().map(|(f, s)| format!("{f} ({s:.2})")).collect();
        prompt.push_str(&format!(" Key experimental factors: {}.", factors.join(", ")));
    }
    prompt
}

/// Nombre de fichero estable y único por clave.
pub fn file_stem(key: &str) -> String {
    let mut slug = String::with_capacity(key.len());
    for c in key.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
        } else if !slug.ends_with('_') {
            slug.push('_');
        }
    }
    let slug = slug.trim_matches('_');
    let slug = if slug.is_empty() { "item" } else { slug };
    let short: String = slug.chars().take(48).collect();
    format!("{short}_{}", &hash_str(key)[..8])
}
