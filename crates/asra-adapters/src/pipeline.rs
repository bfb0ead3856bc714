//! Ensamblado del pipeline estándar: colaboradores + stages en orden.

use std::path::Path;
use std::sync::Arc;

use asra_core::stage::StageDefinition;
use asra_providers::{CorrelationAnalyzer, DatasetAnalyzer, DirectoryLoader, FrequencySummarizer, HypothesisGenerator,
                     ItemLoader, Summarizer, SvgRenderer, TemplateHypothesisGenerator, VisualRenderer};

use crate::source::DirectorySource;
use crate::stages::{AnalysisStage, HypothesisStage, LiteratureStage, VisualizationStage};

/// Orden fijo de ejecución.
pub const STAGE_ORDER: [&str; 4] = ["literature", "hypothesis", "analysis", "visualization"];

/// Parámetros de los colaboradores locales.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolkitSettings {
    pub summarizer_model: String,
    pub hypothesis_model: String,
    pub visualization_model: String,
    pub top_k: usize,
}

/// Colaboradores construidos una vez por ejecución e inyectados en los stages.
#[derive(Clone)]
pub struct Toolkit {
    pub papers: Arc<dyn ItemLoader>,
    pub datasets: Arc<dyn ItemLoader>,
    pub summarizer: Arc<dyn Summarizer>,
    pub generator: Arc<dyn HypothesisGenerator>,
    pub analyzer: Arc<dyn DatasetAnalyzer>,
    pub renderer: Arc<dyn VisualRenderer>,
}

impl Toolkit {
    /// Implementaciones locales deterministas (sin red).
    pub fn local(settings: &ToolkitSettings) -> Self {
        Self { papers: Arc::new(DirectoryLoader::papers()),
               datasets: Arc::new(DirectoryLoader::datasets()),
               summarizer: Arc::new(FrequencySummarizer::new(&settings.summarizer_model, settings.top_k)),
               generator: Arc::new(TemplateHypothesisGenerator::new(&settings.hypothesis_model)),
               analyzer: Arc::new(CorrelationAnalyzer::new()),
               renderer: Arc::new(SvgRenderer::new(&settings.visualization_model)) }
    }

    pub fn describe(&self) -> String {
        format!("summarizer={} generator={} analyzer={} renderer={}",
                self.summarizer.get_name(),
                self.generator.get_name(),
                self.analyzer.get_name(),
                self.renderer.get_name())
    }
}

/// Los cuatro stages en orden: Literature -> Hypothesis -> Analysis -> Visualization.
pub fn standard_stages(toolkit: &Toolkit, papers_dir: &Path, datasets_dir: &Path) -> Vec<Box<dyn StageDefinition>> {
    vec![Box::new(LiteratureStage::new(DirectorySource::new(toolkit.papers.clone(), papers_dir),
                                       toolkit.summarizer.clone())),
         Box::new(HypothesisStage::new(toolkit.generator.clone())),
         Box::new(AnalysisStage::new(DirectorySource::new(toolkit.datasets.clone(), datasets_dir),
                                     toolkit.analyzer.clone())),
         Box::new(VisualizationStage::new(toolkit.renderer.clone()))]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_order_matches_stage_ids() {
        let settings = ToolkitSettings { summarizer_model: "s".into(),
                                         hypothesis_model: "h".into(),
                                         visualization_model: "v".into(),
                                         top_k: 3 };
        let toolkit = Toolkit::local(&settings);
        let stages = standard_stages(&toolkit, Path::new("papers"), Path::new("data"));
        let ids: Vec<&str> = stages.iter().map(|s| s.id()).collect();
        assert_eq!(ids, STAGE_ORDER);
        assert!(toolkit.describe().contains("summarizer=s"));
    }
}
