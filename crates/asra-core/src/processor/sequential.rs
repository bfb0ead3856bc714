use super::{attempt, collect, duplicate_flags, Attempt, ItemProcessor, ItemTransform, ProcessContext, ProcessOutcome};
use crate::errors::ItemTransformError;
use crate::model::WorkItem;

/// Un item tras otro, en orden de entrada, en el hilo llamador.
#[derive(Debug, Default, Clone, Copy)]
pub struct SequentialProcessor;

impl ItemProcessor for SequentialProcessor {
    fn name(&self) -> &str {
        "sequential"
    }

    fn process(&self, ctx: &ProcessContext<'_>, items: Vec<WorkItem>, transform: &ItemTransform<'_>) -> ProcessOutcome {
        let dups = duplicate_flags(&items);
        let total = items.len();
        let mut attempts = Vec::with_capacity(total);
        for (index, (item, dup)) in items.into_iter().zip(dups).enumerate() {
            if ctx.cancel.is_cancelled() {
                attempts.push((item.key, Attempt::NotStarted));
                continue;
            }
            log::debug!("item:start stage={} key={:?} ({}/{total})", ctx.stage_id, item.key, index + 1);
            let result = if dup { Err(ItemTransformError::DuplicateKey) } else { attempt(&item, transform) };
            attempts.push((item.key, Attempt::Done(result)));
        }
        collect(ctx, attempts)
    }
}
