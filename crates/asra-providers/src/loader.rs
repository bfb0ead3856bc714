//! Lectura de documentos crudos desde un directorio.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};

use crate::error::ProviderError;
use crate::traits::{ItemLoader, RawDocument};

/// Lee los ficheros de un directorio filtrando por extensión.
///
/// - Orden: nombre de fichero ascendente.
/// - Clave: el nombre sin extensión; si ya está en uso se usa el nombre
///   completo del fichero.
/// - `.gitkeep`, ocultos y subdirectorios se ignoran.
#[derive(Debug, Clone)]
pub struct DirectoryLoader {
    extensions: Vec<String>,
}

impl DirectoryLoader {
    pub fn new<I, S>(extensions: I) -> Self
        where I: IntoIterator<Item = S>,
              S: Into<String>
    {
        Self { extensions: extensions.into_iter().map(|e| e.into().to_ascii_lowercase()).collect() }
    }

    /// Papers en texto plano.
    pub fn papers() -> Self {
        Self::new(["txt", "md"])
    }

    pub fn datasets() -> Self {
        Self::new(["csv"])
    }

    fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|e| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(e)))
            .unwrap_or(false)
    }

    fn candidates(&self, dir: &Path) -> Result<Vec<PathBuf>, ProviderError> {
        if !dir.is_dir() {
            return Err(ProviderError::Unavailable(dir.display().to_string()));
        }
        let entries = fs::read_dir(dir).map_err(|e| ProviderError::Io(format!("{}: {e}", dir.display())))?;
        let mut paths = Vec::new();
        for entry in entries {
            let path = entry.map_err(|e| ProviderError::Io(e.to_string()))?.path();
            let hidden = path.file_name().and_then(|n| n.to_str()).map(|n| n.starts_with('.')).unwrap_or(true);
            if path.is_file() && !hidden && self.accepts(&path) {
                paths.push(path);
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl ItemLoader for DirectoryLoader {
    fn get_name(&self) -> &str {
        "directory"
    }

    fn load_items(&self, dir: &Path) -> Result<Vec<RawDocument>, ProviderError> {
        let mut seen = HashSet::new();
        let mut docs = Vec::new();
        for path in self.candidates(dir)? {
            let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            let key = if seen.contains(&stem) {
                let full = path.file_name().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
                warn!("loader:key_clash stem={stem:?} using={full:?}");
                full
            } else {
                stem
            };
            seen.insert(key.clone());
            let bytes = fs::read(&path).map_err(|e| ProviderError::Io(format!("{}: {e}", path.display())))?;
            let content = String::from_utf8_lossy(&bytes).into_owned();
            debug!("loader:read key={key:?} bytes={}", bytes.len());
            docs.push(RawDocument { key, content, path });
        }
        Ok(docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_sorted_and_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_paper.txt"), "second").unwrap();
        fs::write(dir.path().join("a_paper.TXT"), "first").unwrap();
        fs::write(dir.path().join("figure.png"), [0u8, 1]).unwrap();
        fs::write(dir.path().join(".gitkeep"), "").unwrap();

        let docs = DirectoryLoader::papers().load_items(dir.path()).unwrap();

        let keys: Vec<_> = docs.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["a_paper", "b_paper"]);
        assert_eq!(docs[0].content, "first");
    }

    #[test]
    fn clashing_stems_get_distinct_keys() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("paper.md"), "md").unwrap();
        fs::write(dir.path().join("paper.txt"), "txt").unwrap();

        let docs = DirectoryLoader::papers().load_items(dir.path()).unwrap();

        let keys: Vec<_> = docs.iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, vec!["paper", "paper.txt"]);
    }

    #[test]
    fn missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = DirectoryLoader::datasets().load_items(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ProviderError::Unavailable(_)));
    }
}
