//! Persistencia de reportes de ejecución con marca de tiempo.

use std::path::{Path, PathBuf};

use asra_core::driver::RunReport;
use chrono::{DateTime, Utc};
use log::info;

use crate::error::PersistenceError;
use crate::fs::{to_pretty_bytes, write_atomic};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// `run_<YYYYmmdd_HHMMSS>_<run8>.json`: el sufijo son los 8 primeros
/// caracteres del run id, así dos runs en el mismo segundo no se pisan.
pub fn report_file_name(report: &RunReport) -> String {
    let started: DateTime<Utc> = report.started_at;
    let run_id = report.run_id.simple().to_string();
    format!("run_{}_{}.json", started.format(TIMESTAMP_FORMAT), &run_id[..8])
}

/// Guarda `report` en `dir` y devuelve la ruta escrita.
pub fn save_run_report(dir: &Path, report: &RunReport) -> Result<PathBuf, PersistenceError> {
    let path = dir.join(report_file_name(report));
    write_atomic(&path, &to_pretty_bytes(report)?)?;
    info!("report:saved run={} path={}", report.run_id, path.display());
    Ok(path)
}
