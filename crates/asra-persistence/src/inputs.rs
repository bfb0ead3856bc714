//! Inventario y borrado individual de los documentos de entrada.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::config::DataLayout;
use crate::error::PersistenceError;

const KEEP_FILE: &str = ".gitkeep";

/// Directorio de entrada sobre el que opera `list` / `delete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Papers,
    Data,
}

impl InputKind {
    pub const ALL: [InputKind; 2] = [InputKind::Papers, InputKind::Data];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Papers => "papers",
            Self::Data => "data",
        }
    }

    pub fn dir<'a>(&self, layout: &'a DataLayout) -> &'a Path {
        match self {
            Self::Papers => &layout.papers_dir,
            Self::Data => &layout.experimental_dir,
        }
    }
}

impl fmt::Display for InputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for InputKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "papers" => Ok(Self::Papers),
            "data" => Ok(Self::Data),
            other => Err(format!("unknown input kind '{other}' (expected papers or data)")),
        }
    }
}

/// Un fichero de entrada con su tamaño y fecha de modificación.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputFile {
    pub name: String,
    pub path: PathBuf,
    pub size_bytes: u64,
    /// `None` si la plataforma no expone mtime.
    pub modified: Option<DateTime<Utc>>,
}

/// Lista los ficheros de `dir` ordenados por nombre, sin `.gitkeep` ni
/// subdirectorios. Un directorio inexistente equivale a uno vacío.
pub fn list_inputs(dir: &Path) -> Result<Vec<InputFile>, PersistenceError> {
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(PersistenceError::io(dir, e)),
    };
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| PersistenceError::io(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| PersistenceError::io(&path, e))?;
        if !meta.is_file() || entry.file_name() == KEEP_FILE {
            continue;
        }
        files.push(InputFile { name: entry.file_name().to_string_lossy().into_owned(),
                               path,
                               size_bytes: meta.len(),
                               modified: meta.modified().ok().map(DateTime::<Utc>::from) });
    }
    files.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(files)
}

/// Borra un único fichero de `dir`. `name` debe ser un nombre simple, no una
/// ruta; `.gitkeep` no se puede borrar.
pub fn delete_input(dir: &Path, name: &str) -> Result<PathBuf, PersistenceError> {
    let mut components = Path::new(name).components();
    let simple = matches!((components.next(), components.next()), (Some(Component::Normal(_)), None));
    if !simple || name == KEEP_FILE {
        return Err(PersistenceError::InvalidPath(name.to_string()));
    }
    let path = dir.join(name);
    if !path.is_file() {
        return Err(PersistenceError::NotFound(path.display().to_string()));
    }
    fs::remove_file(&path).map_err(|e| PersistenceError::io(&path, e))?;
    info!("inputs:deleted path={}", path.display());
    Ok(path)
}
