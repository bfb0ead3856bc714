//! ASRA Rust Library
//!
//! Este crate reúne el binario `asra` con las piezas del workspace:
//! - `config`: configuración desde `.env` / entorno (`CONFIG`).
//! - `app`: operaciones run / ingest / status / clear.
//! - `errors`: errores del binario.

pub mod app;
pub mod config;
pub mod errors;

pub use config::{AppConfig, CONFIG};
pub use errors::AppError;
