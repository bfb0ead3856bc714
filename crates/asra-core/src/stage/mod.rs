//! Stages del pipeline.
//!
//! Un stage es una función pura de sus inputs requeridos a un único artifact
//! de salida, parametrizada por un transform por item. Este módulo define:
//! - `StageDefinition`: interfaz neutral (payloads JSON) usada por el runner.
//! - `TypedStage`: interfaz de alto nivel con tipos fuertes y adaptador.
//! - `run_stage`: carga inputs, aplica el `ItemProcessor` y persiste.
//! - `StageState` / `SkipReason`: estados terminales observables.

pub mod definition;
pub mod runner;
mod status;
pub mod typed;

pub use definition::{ItemSource, PrimaryInput, StageContext, StageDefinition, StageInputs};
pub use runner::{run_stage, StageEnv, StageOutcome};
pub use status::{SkipReason, StageState};
pub use typed::TypedStage;
