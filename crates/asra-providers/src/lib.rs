//! asra-providers
//!
//! Colaboradores externos del pipeline detrás de traits estrechos, más
//! implementaciones locales deterministas para ejecutar sin red.

pub mod analyzer;
pub mod error;
pub mod hypothesis;
pub mod loader;
pub mod renderer;
pub mod summarizer;
mod text;
pub mod traits;

pub use analyzer::CorrelationAnalyzer;
pub use error::ProviderError;
pub use hypothesis::TemplateHypothesisGenerator;
pub use loader::DirectoryLoader;
pub use renderer::SvgRenderer;
pub use summarizer::FrequencySummarizer;
pub use traits::{DatasetAnalyzer, HypothesisGenerator, ItemLoader, RankedPoints, RawDocument, RenderedImage,
                 Summarizer, VisualRenderer};
