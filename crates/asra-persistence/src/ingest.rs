//! Copia de ficheros de entrada al directorio de datos con detección de
//! duplicados por contenido (SHA-256).

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::error::PersistenceError;
use crate::fs::write_atomic;

/// Resultado por fichero. `is_new == false` indica que ya existía un fichero
/// con el mismo contenido (y `path` apunta a él).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum IngestResult {
    Saved { file: String, path: PathBuf, is_new: bool },
    Failed { file: String, error: String },
}

impl IngestResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, Self::Saved { is_new: false, .. })
    }
}

pub fn content_hash(bytes: &[u8]) -> String {
    let digest = Sha256::digest(bytes);
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

/// Ingesta `files` en `target_dir`, uno a uno y en orden. Un fallo en un
/// fichero no detiene a los demás.
pub fn ingest_files(files: &[PathBuf], target_dir: &Path) -> Result<Vec<IngestResult>, PersistenceError> {
    fs::create_dir_all(target_dir).map_err(|e| PersistenceError::io(target_dir, e))?;
    let mut known = existing_hashes(target_dir)?;
    let results: Vec<IngestResult> = files.iter().map(|src| ingest_one(src, target_dir, &mut known)).collect();
    info!("ingest:done dir={} files={} new={} duplicates={} failed={}",
          target_dir.display(),
          results.len(),
          results.iter().filter(|r| r.is_success() && !r.is_duplicate()).count(),
          results.iter().filter(|r| r.is_duplicate()).count(),
          results.iter().filter(|r| !r.is_success()).count());
    Ok(results)
}

fn ingest_one(src: &Path, target_dir: &Path, known: &mut HashMap<String, PathBuf>) -> IngestResult {
    let file = src.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    match copy_unless_duplicate(src, &file, target_dir, known) {
        Ok((path, is_new)) => IngestResult::Saved { file, path, is_new },
        Err(err) => {
            warn!("ingest:failed file={file:?} error={err}");
            IngestResult::Failed { file, error: err.to_string() }
        }
    }
}

fn copy_unless_duplicate(src: &Path, file: &str, target_dir: &Path, known: &mut HashMap<String, PathBuf>)
                         -> Result<(PathBuf, bool), PersistenceError> {
    if file.is_empty() || file == ".gitkeep" {
        return Err(PersistenceError::InvalidPath(src.display().to_string()));
    }
    let bytes = fs::read(src).map_err(|e| PersistenceError::io(src, e))?;
    let hash = content_hash(&bytes);
    if let Some(existing) = known.get(&hash) {
        warn!("ingest:duplicate file={file:?} existing={}", existing.display());
        return Ok((existing.clone(), false));
    }
    let dest = target_dir.join(file);
    write_atomic(&dest, &bytes)?;
    known.insert(hash, dest.clone());
    Ok((dest, true))
}

fn existing_hashes(dir: &Path) -> Result<HashMap<String, PathBuf>, PersistenceError> {
    let mut known = HashMap::new();
    let entries = fs::read_dir(dir).map_err(|e| PersistenceError::io(dir, e))?;
    for entry in entries {
        let path = entry.map_err(|e| PersistenceError::io(dir, e))?.path();
        if !path.is_file() || path.file_name().is_some_and(|n| n == ".gitkeep") {
            continue;
        }
        let bytes = fs::read(&path).map_err(|e| PersistenceError::io(&path, e))?;
        known.entry(content_hash(&bytes)).or_insert(path);
    }
    Ok(known)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_is_hex_sha256() {
        assert_eq!(content_hash(b"abc"), "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad");
    }
}
