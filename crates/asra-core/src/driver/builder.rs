//! Builder para `PipelineDriver`.
//!
//! El orden en que se añaden los stages es el orden de ejecución. Los
//! colaboradores (processor, sink, token) se construyen una vez y se
//! inyectan; no hay estado global.

use std::sync::Arc;

use super::PipelineDriver;
use crate::cancel::CancellationToken;
use crate::event::{EventSink, LogEventSink};
use crate::processor::{ItemProcessor, SequentialProcessor};
use crate::stage::StageDefinition;
use crate::store::ArtifactStore;

pub struct DriverBuilder<S: ArtifactStore> {
    store: S,
    stages: Vec<Box<dyn StageDefinition>>,
    processor: Box<dyn ItemProcessor>,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
}

impl<S: ArtifactStore> DriverBuilder<S> {
    pub(crate) fn new(store: S) -> Self {
        Self { store,
               stages: Vec::new(),
               processor: Box::new(SequentialProcessor),
               sink: Arc::new(LogEventSink),
               cancel: CancellationToken::new() }
    }

    /// Añade un stage al final del pipeline.
    pub fn add_stage(mut self, stage: impl StageDefinition + 'static) -> Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Añade stages ya empaquetados, en orden.
    pub fn add_stages(mut self, stages: Vec<Box<dyn StageDefinition>>) -> Self {
        self.stages.extend(stages);
        self
    }

    pub fn processor(mut self, processor: impl ItemProcessor + 'static) -> Self {
        self.processor = Box::new(processor);
        self
    }

    pub fn boxed_processor(mut self, processor: Box<dyn ItemProcessor>) -> Self {
        self.processor = processor;
        self
    }

    pub fn sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn build(self) -> PipelineDriver<S> {
        debug_assert!({
                          let mut ids: Vec<&str> = self.stages.iter().map(|s| s.id()).collect();
                          ids.sort_unstable();
                          ids.windows(2).all(|w| w[0] != w[1])
                      },
                      "stage ids must be unique");
        PipelineDriver { store: self.store,
                         stages: self.stages,
                         processor: self.processor,
                         sink: self.sink,
                         cancel: self.cancel }
    }
}
