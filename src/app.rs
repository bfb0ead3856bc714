//! Operaciones de alto nivel del binario: ejecutar, ingestar, estado,
//! inventario de inputs y limpieza.
//!
//! Cada operación recibe la configuración explícitamente; `main` decide si
//! parte de `CONFIG` o de una copia con overrides de la línea de comandos.

use std::fs::{self, File, OpenOptions};
use std::path::PathBuf;

use asra_adapters::{standard_stages, Toolkit, VisualizationStage};
use asra_core::driver::{PipelineDriver, RunReport};
use asra_core::stage::StageState;
use asra_core::{BoundedProcessor, CancellationToken, TypedStage};
use asra_persistence::{artifact_status, clear_all, delete_input, ingest_files, list_inputs, prune_stale_blobs,
                       save_run_report, ArtifactStatus, ClearSummary, DataLayout, FsArtifactStore, IngestResult,
                       InputFile, InputKind};
use log::info;

use crate::config::AppConfig;
use crate::errors::AppError;

/// Resultado de `run`: el reporte y dónde quedó guardado.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub report: RunReport,
    pub report_path: PathBuf,
}

/// Ingesta de papers y datasets por separado.
#[derive(Debug, Clone, Default)]
pub struct IngestOutput {
    pub papers: Vec<IngestResult>,
    pub datasets: Vec<IngestResult>,
}

/// Construye el pipeline estándar sobre el directorio de outputs.
pub fn build_driver(cfg: &AppConfig, cancel: CancellationToken) -> Result<PipelineDriver<FsArtifactStore>, AppError> {
    cfg.layout.prepare()?;
    let toolkit = Toolkit::local(&cfg.toolkit);
    info!("app:toolkit {} workers={}", toolkit.describe(), cfg.workers);
    let builder = PipelineDriver::builder(FsArtifactStore::new(&cfg.layout.outputs_dir))
        .add_stages(standard_stages(&toolkit, &cfg.layout.papers_dir, &cfg.layout.experimental_dir))
        .cancellation(cancel);
    let builder = if cfg.workers > 1 {
        builder.processor(BoundedProcessor::new(cfg.workers)?)
    } else {
        builder
    };
    Ok(builder.build())
}

/// Ejecuta el pipeline completo (o sólo `stage`) y guarda el reporte.
pub fn run_pipeline(cfg: &AppConfig, stage: Option<&str>, cancel: CancellationToken) -> Result<RunOutput, AppError> {
    let driver = build_driver(cfg, cancel)?;
    let report = match stage {
        Some(id) => driver.run_selected(&[id])?,
        None => driver.run(),
    };
    if visualization_rewritten(&report) {
        prune_stale_blobs(&FsArtifactStore::new(&cfg.layout.outputs_dir))?;
    }
    let report_path = save_run_report(&cfg.layout.run_reports_dir(), &report)?;
    Ok(RunOutput { report, report_path })
}

pub fn ingest(cfg: &AppConfig, papers: &[PathBuf], datasets: &[PathBuf]) -> Result<IngestOutput, AppError> {
    cfg.layout.prepare()?;
    let mut out = IngestOutput::default();
    if !papers.is_empty() {
        out.papers = ingest_files(papers, &cfg.layout.papers_dir)?;
    }
    if !datasets.is_empty() {
        out.datasets = ingest_files(datasets, &cfg.layout.experimental_dir)?;
    }
    Ok(out)
}

pub fn status(cfg: &AppConfig) -> Vec<ArtifactStatus> {
    artifact_status(&FsArtifactStore::new(&cfg.layout.outputs_dir))
}

pub fn clear(cfg: &AppConfig) -> Result<ClearSummary, AppError> {
    Ok(clear_all(&cfg.layout)?)
}

/// Las imágenes sólo se podan cuando el metadata de visualización se acaba de
/// reescribir.
fn visualization_rewritten(report: &RunReport) -> bool {
    report.stage(VisualizationStage::ID)
          .is_some_and(|s| matches!(s.state, StageState::Completed | StageState::Partial))
}

/// Inventario de papers y datasets.
pub fn list(cfg: &AppConfig) -> Result<Vec<(InputKind, Vec<InputFile>)>, AppError> {
    InputKind::ALL.into_iter()
                  .map(|kind| -> Result<_, AppError> { Ok((kind, list_inputs(kind.dir(&cfg.layout))?)) })
                  .collect()
}

/// Borra un único input; devuelve la ruta borrada.
pub fn delete(cfg: &AppConfig, kind: InputKind, name: &str) -> Result<PathBuf, AppError> {
    Ok(delete_input(kind.dir(&cfg.layout), name)?)
}

/// Abre (en modo append) el log de texto plano bajo outputs.
pub fn open_log_file(layout: &DataLayout) -> Result<File, AppError> {
    fs::create_dir_all(&layout.outputs_dir)?;
    Ok(OpenOptions::new().create(true).append(true).open(layout.log_file())?)
}
