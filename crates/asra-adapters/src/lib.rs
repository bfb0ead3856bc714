//! asra-adapters
//!
//! Stages concretos del pipeline de investigación sobre los contratos de
//! `asra-core`, más los payloads tipados de cada artifact.
//!
//! - `artifacts`: forma y validación de cada entrada de artifact.
//! - `source`: directorio de documentos como `ItemSource`.
//! - `stages`: Literature, Hypothesis, Analysis, Visualization.
//! - `pipeline`: `Toolkit` de colaboradores y orden estándar.

pub mod artifacts;
pub mod pipeline;
pub mod source;
pub mod stages;

pub use artifacts::{ExperimentalAnalysis, HypothesisRecord, LiteratureInsights};
pub use pipeline::{standard_stages, Toolkit, ToolkitSettings, STAGE_ORDER};
pub use source::DirectorySource;
pub use stages::{AnalysisStage, HypothesisStage, LiteratureStage, VisualizationStage};
