//! Layout de directorios de datos desde variables de entorno.
//! Usa `ASRA_DATA_DIR` (por defecto `data`) como raíz.
//!
//! El `.env` se busca primero desde el directorio actual hacia arriba y, si
//! no hay ninguno, dentro de la raíz de datos (`<ASRA_DATA_DIR>/.env`).

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use once_cell::sync::Lazy;

use crate::error::PersistenceError;

pub const DATA_DIR_VAR: &str = "ASRA_DATA_DIR";
pub const DEFAULT_DATA_DIR: &str = "data";

/// Fichero `.env` efectivamente cargado, si hubo alguno.
static DOTENV_FILE: Lazy<Option<PathBuf>> = Lazy::new(|| {
    if let Ok(path) = dotenvy::dotenv() {
        return Some(path);
    }
    load_first_dotenv(&[Path::new(&data_root_from_env()).join(".env")])
});

/// Carga el primer `.env` existente de `candidates`. Las variables ya
/// presentes en el entorno no se sobrescriben.
pub fn load_first_dotenv(candidates: &[PathBuf]) -> Option<PathBuf> {
    let loaded = candidates.iter().find(|p| p.is_file() && dotenvy::from_path(p).is_ok()).cloned();
    match &loaded {
        Some(path) => debug!("config:dotenv path={}", path.display()),
        None => debug!("config:dotenv none candidates={}", candidates.len()),
    }
    loaded
}

fn data_root_from_env() -> String {
    env::var(DATA_DIR_VAR).ok().filter(|v| !v.trim().is_empty()).unwrap_or_else(|| DEFAULT_DATA_DIR.into())
}

pub const PAPERS_DIR: &str = "research_papers";
pub const EXPERIMENTAL_DIR: &str = "experimental_data";
pub const OUTPUTS_DIR: &str = "outputs";
pub const RUN_REPORTS_DIR: &str = "run_reports";
pub const LOG_FILE: &str = "asra.log";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLayout {
    pub root: PathBuf,
    pub papers_dir: PathBuf,
    pub experimental_dir: PathBuf,
    pub outputs_dir: PathBuf,
}

impl DataLayout {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self { papers_dir: root.join(PAPERS_DIR),
               experimental_dir: root.join(EXPERIMENTAL_DIR),
               outputs_dir: root.join(OUTPUTS_DIR),
               root }
    }

    pub fn from_env() -> Self {
        init_dotenv();
        Self::new(data_root_from_env())
    }

    /// Directorios de inputs y outputs, en el orden en que se limpian.
    pub fn managed_dirs(&self) -> [&Path; 3] {
        [self.papers_dir.as_path(), self.experimental_dir.as_path(), self.outputs_dir.as_path()]
    }

    pub fn run_reports_dir(&self) -> PathBuf {
        self.outputs_dir.join(RUN_REPORTS_DIR)
    }

    /// Log de texto plano de la aplicación, junto a los artifacts.
    pub fn log_file(&self) -> PathBuf {
        self.outputs_dir.join(LOG_FILE)
    }

    /// Crea los directorios si no existen.
    pub fn prepare(&self) -> Result<(), PersistenceError> {
        for dir in self.managed_dirs() {
            fs::create_dir_all(dir).map_err(|e| PersistenceError::io(dir, e))?;
        }
        Ok(())
    }
}

/// Carga el `.env` (una sola vez) y devuelve cuál se usó.
pub fn init_dotenv() -> Option<&'static Path> {
    DOTENV_FILE.as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layout_nests_under_root() {
        let layout = DataLayout::new("/tmp/asra");
        assert_eq!(layout.papers_dir, PathBuf::from("/tmp/asra/research_papers"));
        assert_eq!(layout.experimental_dir, PathBuf::from("/tmp/asra/experimental_data"));
        assert_eq!(layout.run_reports_dir(), PathBuf::from("/tmp/asra/outputs/run_reports"));
        assert_eq!(layout.log_file(), PathBuf::from("/tmp/asra/outputs/asra.log"));
    }

    #[test]
    fn dotenv_falls_back_to_later_candidates() {
        let dir = tempfile::tempdir().unwrap();
        let data_env = dir.path().join("data").join(".env");
        fs::create_dir_all(data_env.parent().unwrap()).unwrap();
        fs::write(&data_env, "ASRA_DOTENV_FALLBACK_MARKER=from-data-root\n").unwrap();

        let loaded = load_first_dotenv(&[dir.path().join(".env"), data_env.clone()]);

        assert_eq!(loaded, Some(data_env));
        assert_eq!(env::var("ASRA_DOTENV_FALLBACK_MARKER").unwrap(), "from-data-root");
    }

    #[test]
    fn dotenv_without_candidates_loads_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(load_first_dotenv(&[dir.path().join(".env")]), None);
    }
}
