use std::fs::File;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Mutex;

use asra_adapters::STAGE_ORDER;
use asra_core::CancellationToken;
use asra_persistence::{ArtifactState, IngestResult, InputKind};
use asra_rust::app;
use asra_rust::{AppConfig, AppError, CONFIG};
use clap::{Parser, Subcommand};
use tracing::{error, info, warn};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "asra", about = "Staged research artifact pipeline", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Ejecuta el pipeline (todos los stages o sólo uno).
    Run {
        #[arg(long, value_parser = clap::builder::PossibleValuesParser::new(STAGE_ORDER))]
        stage: Option<String>,
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Copia papers y datasets al directorio de datos, sin duplicados.
    Ingest {
        #[arg(long, num_args = 1..)]
        papers: Vec<PathBuf>,
        #[arg(long, num_args = 1..)]
        data: Vec<PathBuf>,
    },
    /// Muestra qué artifacts existen y cuántas entradas tienen.
    Status,
    /// Lista papers y datasets con tamaño y fecha de modificación.
    List,
    /// Borra un único paper o dataset por nombre de fichero.
    Delete {
        file: String,
        /// `papers` o `data`.
        #[arg(long, default_value = "papers")]
        from: InputKind,
    },
    /// Borra inputs y outputs (conserva `.gitkeep`).
    Clear,
}

/// stderr más, si se pudo abrir, una copia sin colores en `outputs/asra.log`.
fn init_tracing(log_file: Option<File>) {
    let filter = std::env::var("ASRA_LOG").ok()
                                          .and_then(|v| EnvFilter::try_new(v).ok())
                                          .or_else(|| EnvFilter::try_from_default_env().ok())
                                          .unwrap_or_else(|| EnvFilter::new("info"));
    let file_layer = log_file.map(|file| fmt::layer().with_ansi(false).with_writer(Mutex::new(file)));
    tracing_subscriber::registry().with(filter)
                                  .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                                  .with(file_layer)
                                  .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    let dotenv = asra_persistence::init_dotenv();
    let log_file = app::open_log_file(&CONFIG.layout);
    let log_error = log_file.as_ref().err().map(ToString::to_string);
    init_tracing(log_file.ok());
    if let Some(e) = log_error {
        warn!("file logging disabled: {e}");
    }
    if let Some(path) = dotenv {
        info!("loaded {}", path.display());
    }
    let cli = Cli::parse();
    match dispatch(cli.command).await {
        Ok(code) => code,
        Err(e) => {
            error!("asra: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn dispatch(command: Command) -> Result<ExitCode, AppError> {
    match command {
        Command::Run { stage, workers } => run(CONFIG.with_workers(workers), stage).await,
        Command::Ingest { papers, data } => {
            if papers.is_empty() && data.is_empty() {
                return Err(AppError::Config("nothing to ingest: pass --papers and/or --data".into()));
            }
            let out = app::ingest(&CONFIG, &papers, &data)?;
            print_ingest("papers", &out.papers);
            print_ingest("data", &out.datasets);
            let failed = out.papers.iter().chain(&out.datasets).any(|r| !r.is_success());
            Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
        }
        Command::Status => {
            let cfg: &AppConfig = &CONFIG;
            let counts: Vec<String> =
                app::list(cfg)?.iter().map(|(kind, files)| format!("{kind}: {}", files.len())).collect();
            println!("{}", counts.join("  "));
            for s in app::status(cfg) {
                match s.state {
                    ArtifactState::Present { entries } => println!("  {:<30} {entries} entries", s.name),
                    ArtifactState::Missing => println!("  {:<30} missing", s.name),
                    ArtifactState::Unreadable { detail } => println!("  {:<30} unreadable: {detail}", s.name),
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::List => {
            for (kind, files) in app::list(&CONFIG)? {
                println!("{kind} ({} files)", files.len());
                for f in files {
                    let modified = f.modified
                                    .map(|m| m.format("%Y-%m-%d %H:%M:%S").to_string())
                                    .unwrap_or_else(|| "-".into());
                    println!("  {:<40} {:>10} B  {modified}", f.name, f.size_bytes);
                }
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Delete { file, from } => {
            let path = app::delete(&CONFIG, from, &file)?;
            println!("deleted {}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Command::Clear => {
            let summary = app::clear(&CONFIG)?;
            println!("removed {} files and {} directories", summary.files_removed, summary.dirs_removed);
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// El pipeline corre en un hilo bloqueante; Ctrl-C sólo activa el token y
/// los items en curso terminan.
async fn run(cfg: AppConfig, stage: Option<String>) -> Result<ExitCode, AppError> {
    let cancel = CancellationToken::new();
    let watcher = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("cancellation requested, finishing in-flight items");
                cancel.cancel();
            }
        })
    };

    let handle = tokio::task::spawn_blocking(move || app::run_pipeline(&cfg, stage.as_deref(), cancel));
    let result = handle.await.map_err(|e| AppError::Internal(format!("pipeline task: {e}")));
    watcher.abort();

    let out = result??;
    print!("{}", out.report);
    info!("run report saved to {}", out.report_path.display());
    Ok(if out.report.is_clean() { ExitCode::SUCCESS } else { ExitCode::from(2) })
}

fn print_ingest(label: &str, results: &[IngestResult]) {
    for r in results {
        match r {
            IngestResult::Saved { file, path, is_new: true } => println!("{label}: {file} -> {}", path.display()),
            IngestResult::Saved { file, path, is_new: false } => {
                println!("{label}: {file} duplicate of {}", path.display())
            }
            IngestResult::Failed { file, error } => println!("{label}: {file} failed: {error}"),
        }
    }
}
