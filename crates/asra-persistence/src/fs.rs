//! `ArtifactStore` sobre el sistema de ficheros.
//!
//! Cada artifact es un fichero JSON bajo `root`. La escritura es atómica:
//! fichero temporal en el mismo directorio, `fsync` y rename vía
//! `NamedTempFile::persist`. Un lector nunca ve un documento a medias.
//!
//! Sin locking: dos pipelines sobre el mismo directorio a la vez es un error
//! del llamador.

use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use asra_core::errors::StoreError;
use asra_core::model::{ArtifactMap, ArtifactName};
use asra_core::store::ArtifactStore;
use log::debug;
use serde::Serialize;
use tempfile::NamedTempFile;

use crate::error::PersistenceError;

#[derive(Debug, Clone)]
pub struct FsArtifactStore {
    root: PathBuf,
}

impl FsArtifactStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_of(&self, name: &ArtifactName) -> PathBuf {
        self.root.join(name.as_str())
    }

    pub(crate) fn read(&self, name: &ArtifactName) -> Result<ArtifactMap, PersistenceError> {
        let path = self.path_of(name);
        let bytes = match fs::read(&path) {
            Ok(b) => b,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(PersistenceError::NotFound(name.to_string())),
            Err(e) => return Err(PersistenceError::io(&path, e)),
        };
        serde_json::from_slice::<ArtifactMap>(&bytes).map_err(|e| PersistenceError::InvalidJson { path: name.to_string(),
                                                                                                    detail: e.to_string() })
    }

    /// Resuelve una ruta relativa sin permitir salir de `root`.
    fn resolve(&self, relative_path: &str) -> Result<PathBuf, PersistenceError> {
        let rel = Path::new(relative_path);
        let escapes = rel.components().any(|c| !matches!(c, Component::Normal(_)));
        if relative_path.is_empty() || escapes {
            return Err(PersistenceError::InvalidPath(relative_path.to_string()));
        }
        Ok(self.root.join(rel))
    }
}

/// Serializa `value` como JSON indentado con salto de línea final.
pub fn to_pretty_bytes<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, PersistenceError> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(|e| PersistenceError::Serialize(e.to_string()))?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Escribe `bytes` en `path` de forma atómica, creando los directorios padre.
pub fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), PersistenceError> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| PersistenceError::io(&dir, e))?;
    let mut tmp = NamedTempFile::new_in(&dir).map_err(|e| PersistenceError::io(&dir, e))?;
    tmp.write_all(bytes).map_err(|e| PersistenceError::io(tmp.path(), e))?;
    tmp.as_file().sync_all().map_err(|e| PersistenceError::io(path, e))?;
    tmp.persist(path).map_err(|e| PersistenceError::io(path, e.error))?;
    debug!("fs:write path={} bytes={}", path.display(), bytes.len());
    Ok(())
}

impl ArtifactStore for FsArtifactStore {
    fn load(&self, name: &ArtifactName) -> Result<ArtifactMap, StoreError> {
        Ok(self.read(name)?)
    }

    fn save(&self, name: &ArtifactName, artifact: &ArtifactMap) -> Result<(), StoreError> {
        let bytes = to_pretty_bytes(artifact)?;
        write_atomic(&self.path_of(name), &bytes)?;
        Ok(())
    }

    fn exists(&self, name: &ArtifactName) -> bool {
        self.path_of(name).is_file()
    }

    fn write_blob(&self, relative_path: &str, bytes: &[u8]) -> Result<String, StoreError> {
        let path = self.resolve(relative_path)?;
        write_atomic(&path, bytes)?;
        Ok(path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_rejects_escaping_paths() {
        let store = FsArtifactStore::new("/tmp/out");
        assert!(store.resolve("../etc/passwd").is_err());
        assert!(store.resolve("/abs.svg").is_err());
        assert!(store.resolve("").is_err());
        assert_eq!(store.resolve("visualizations/a.svg").unwrap(), PathBuf::from("/tmp/out/visualizations/a.svg"));
    }

    #[test]
    fn pretty_bytes_end_with_newline() {
        let mut map = ArtifactMap::new();
        map.insert("a".into(), serde_json::json!(1));
        let bytes = to_pretty_bytes(&map).unwrap();
        assert_eq!(bytes.last(), Some(&b'\n'));
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n  \"a\": 1\n}\n");
    }
}
