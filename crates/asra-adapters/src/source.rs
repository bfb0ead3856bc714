//! Directorio de documentos crudos como fuente de items de un stage.

use std::path::PathBuf;
use std::sync::Arc;

use asra_core::errors::SourceError;
use asra_core::model::WorkItem;
use asra_core::stage::ItemSource;
use asra_providers::{ItemLoader, ProviderError};

/// Un item por documento; la clave es la del documento y el payload el
/// `RawDocument` serializado.
#[derive(Clone)]
pub struct DirectorySource {
    loader: Arc<dyn ItemLoader>,
    dir: PathBuf,
}

impl DirectorySource {
    pub fn new(loader: Arc<dyn ItemLoader>, dir: impl Into<PathBuf>) -> Self {
        Self { loader, dir: dir.into() }
    }
}

impl ItemSource for DirectorySource {
    fn describe(&self) -> String {
        self.dir.display().to_string()
    }

    fn load(&self) -> Result<Vec<WorkItem>, SourceError> {
        let docs = self.loader.load_items(&self.dir).map_err(|e| match e {
                                                          ProviderError::Unavailable(d) => SourceError::Unavailable(d),
                                                          other => SourceError::Unreadable(other.to_string()),
                                                      })?;
        docs.into_iter()
            .map(|doc| {
                let payload = serde_json::to_value(&doc).map_err(|e| SourceError::Unreadable(e.to_string()))?;
                Ok(WorkItem::new(doc.key, payload))
            })
            .collect()
    }
}
