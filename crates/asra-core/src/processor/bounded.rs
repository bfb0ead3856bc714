use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};

use super::{attempt, collect, duplicate_flags, Attempt, ItemProcessor, ItemTransform, ProcessContext, ProcessOutcome};
use crate::errors::ItemTransformError;
use crate::model::WorkItem;

/// Procesa hasta `workers` items en paralelo sobre un pool rayon propio.
///
/// Mismo contrato que `SequentialProcessor`: el fallo de un item no cancela
/// a los demás y los eventos se emiten en orden de entrada una vez terminado
/// el lote.
pub struct BoundedProcessor {
    workers: usize,
    pool: ThreadPool,
}

impl BoundedProcessor {
    pub fn new(workers: usize) -> Result<Self, ThreadPoolBuildError> {
        let workers = workers.max(1);
        let pool = ThreadPoolBuilder::new().num_threads(workers)
                                           .thread_name(|i| format!("asra-item-{i}"))
                                           .build()?;
        Ok(Self { workers, pool })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }
}

impl std::fmt::Debug for BoundedProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoundedProcessor").field("workers", &self.workers).finish()
    }
}

impl ItemProcessor for BoundedProcessor {
    fn name(&self) -> &str {
        "bounded"
    }

    fn process(&self, ctx: &ProcessContext<'_>, items: Vec<WorkItem>, transform: &ItemTransform<'_>) -> ProcessOutcome {
        let dups = duplicate_flags(&items);
        let cancel = ctx.cancel;
        let attempts: Vec<(String, Attempt)> = self.pool.install(|| {
            items.into_par_iter()
                 .zip(dups)
                 .map(|(item, dup)| {
                     if cancel.is_cancelled() {
                         return (item.key, Attempt::NotStarted);
                     }
                     let result = if dup { Err(ItemTransformError::DuplicateKey) } else { attempt(&item, transform) };
                     (item.key, Attempt::Done(result))
                 })
                 .collect()
        });
        collect(ctx, attempts)
    }
}
