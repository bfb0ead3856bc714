//! asra-persistence
//!
//! Implementación en disco del `ArtifactStore` y utilidades alrededor del
//! directorio de datos.
//!
//! Módulos:
//! - `config`: layout de directorios desde `.env` / entorno.
//! - `fs`: store de artifacts con escritura atómica.
//! - `ingest`: copia de inputs con detección de duplicados.
//! - `inputs`: inventario y borrado individual de inputs.
//! - `maintenance`: limpieza de inputs y outputs, poda de imágenes huérfanas.
//! - `reports`: reportes de ejecución con marca de tiempo.
//! - `status`: inventario de artifacts.

pub mod config;
pub mod error;
pub mod fs;
pub mod ingest;
pub mod inputs;
pub mod maintenance;
pub mod reports;
pub mod status;

pub use config::{init_dotenv, DataLayout};
pub use error::PersistenceError;
pub use fs::FsArtifactStore;
pub use ingest::{ingest_files, IngestResult};
pub use inputs::{delete_input, list_inputs, InputFile, InputKind};
pub use maintenance::{clear_all, prune_stale_blobs, ClearSummary};
pub use reports::save_run_report;
pub use status::{artifact_status, ArtifactState, ArtifactStatus};
