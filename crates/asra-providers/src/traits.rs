//! Interfaces estrechas hacia los colaboradores externos.
//!
//! Cada stage recibe sus colaboradores ya construidos; las implementaciones
//! aplican sus propios timeouts. Las locales de este crate son deterministas.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ProviderError;

/// Documento crudo leído de un directorio de inputs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub key: String,
    pub content: String,
    pub path: PathBuf,
}

/// Puntos clave de un texto con su relevancia en `[0, 1]`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RankedPoints {
    pub key_points: Vec<String>,
    pub scores: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedImage {
    pub bytes: Vec<u8>,
    /// Extensión de fichero sin punto (`svg`, `png`...).
    pub extension: String,
}

pub trait ItemLoader: Send + Sync {
    fn get_name(&self) -> &str;
    /// Documentos de `dir` en orden determinista y con claves únicas.
    fn load_items(&self, dir: &Path) -> Result<Vec<RawDocument>, ProviderError>;
}

pub trait Summarizer: Send + Sync {
    fn get_name(&self) -> &str;
    fn embed_and_rank(&self, text: &str) -> Result<RankedPoints, ProviderError>;
}

pub trait HypothesisGenerator: Send + Sync {
    fn get_name(&self) -> &str;
    /// Devuelve la hipótesis como documento JSON (se espera un objeto).
    fn generate_hypothesis(&self, context: &str) -> Result<Value, ProviderError>;
}

pub trait DatasetAnalyzer: Send + Sync {
    fn get_name(&self) -> &str;
    fn analyze(&self, name: &str, content: &str) -> Result<Value, ProviderError>;
}

pub trait VisualRenderer: Send + Sync {
    fn get_name(&self) -> &str;
    fn render_visual(&self, prompt: &str) -> Result<RenderedImage, ProviderError>;
}
