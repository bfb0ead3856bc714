//! Eventos del pipeline y sinks de observabilidad.

pub mod sink;
pub mod types;

pub use sink::{log_event, EventSink, InMemoryEventSink, LogEventSink};
pub use types::{PipelineEvent, PipelineEventKind};
