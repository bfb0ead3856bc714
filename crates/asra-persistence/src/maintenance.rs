//! Limpieza de los directorios de datos.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

use asra_core::constants::{VISUALIZATION_DIR, VISUALIZATION_METADATA};
use log::{info, warn};

use crate::config::DataLayout;
use crate::error::PersistenceError;
use crate::fs::FsArtifactStore;

const KEEP_FILE: &str = ".gitkeep";

/// Resultado de una limpieza.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ClearSummary {
    pub files_removed: usize,
    pub dirs_removed: usize,
}

/// Borra ficheros y subdirectorios de papers, datos experimentales y
/// outputs. Conserva `.gitkeep` y los propios directorios; uno inexistente
/// se ignora.
pub fn clear_all(layout: &DataLayout) -> Result<ClearSummary, PersistenceError> {
    let mut summary = ClearSummary::default();
    for dir in layout.managed_dirs() {
        clear_dir(dir, &mut summary)?;
    }
    info!("clear:done files={} dirs={}", summary.files_removed, summary.dirs_removed);
    Ok(summary)
}

/// Borra de `visualizations/` las imágenes que el metadata vigente ya no
/// referencia. Sin metadata legible no se toca nada. Devuelve cuántas borró.
pub fn prune_stale_blobs(store: &FsArtifactStore) -> Result<usize, PersistenceError> {
    let metadata = match store.read(&VISUALIZATION_METADATA) {
        Ok(map) => map,
        Err(PersistenceError::NotFound(_)) => return Ok(0),
        Err(e) => return Err(e),
    };
    let referenced: HashSet<OsString> = metadata.values()
                                                .filter_map(|v| v.as_str())
                                                .filter_map(|loc| Path::new(loc).file_name().map(OsString::from))
                                                .collect();
    let dir = store.root().join(VISUALIZATION_DIR);
    if !dir.is_dir() {
        return Ok(0);
    }
    let mut removed = 0;
    for entry in fs::read_dir(&dir).map_err(|e| PersistenceError::io(&dir, e))? {
        let entry = entry.map_err(|e| PersistenceError::io(&dir, e))?;
        let path = entry.path();
        if !path.is_file() || referenced.contains(&entry.file_name()) {
            continue;
        }
        fs::remove_file(&path).map_err(|e| PersistenceError::io(&path, e))?;
        removed += 1;
    }
    if removed > 0 {
        info!("prune:done dir={} removed={removed} kept={}", dir.display(), referenced.len());
    }
    Ok(removed)
}

fn clear_dir(dir: &Path, summary: &mut ClearSummary) -> Result<(), PersistenceError> {
    if !dir.is_dir() {
        warn!("clear:skip dir={} (not found)", dir.display());
        return Ok(());
    }
    let entries = fs::read_dir(dir).map_err(|e| PersistenceError::io(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| PersistenceError::io(dir, e))?;
        let path = entry.path();
        if entry.file_name() == KEEP_FILE {
            continue;
        }
        let file_type = entry.file_type().map_err(|e| PersistenceError::io(&path, e))?;
        if file_type.is_dir() {
            fs::remove_dir_all(&path).map_err(|e| PersistenceError::io(&path, e))?;
            summary.dirs_removed += 1;
        } else {
            fs::remove_file(&path).map_err(|e| PersistenceError::io(&path, e))?;
            summary.files_removed += 1;
        }
    }
    Ok(())
}
