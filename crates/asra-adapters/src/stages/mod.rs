//! Stages concretos del pipeline de investigación.

pub mod analysis;
pub mod hypothesis;
pub mod literature;
pub mod visualization;

pub use analysis::AnalysisStage;
pub use hypothesis::HypothesisStage;
pub use literature::LiteratureStage;
pub use visualization::VisualizationStage;
