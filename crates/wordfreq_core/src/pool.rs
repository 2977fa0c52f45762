use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rayon::prelude::*;
use wordfreq_logging::{wf_debug, wf_trace};

use crate::{Concurrency, FrequencyError};

/// Shared switch that stops a running count before it finishes.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Bounded parallel map over a slice, backed by a dedicated rayon pool.
///
/// Every input is its own task, so idle workers pick up the next input as soon
/// as they finish one. `collect` on the indexed iterator keeps input order.
#[derive(Debug, Clone, Default)]
pub struct WorkerPool {
    workers: Concurrency,
    cancel: Option<CancelFlag>,
}

enum Slot<T> {
    Done(T),
    Failed(String),
    Skipped,
}

impl WorkerPool {
    pub fn new(workers: Concurrency) -> Self {
        Self {
            workers,
            cancel: None,
        }
    }

    pub fn with_cancel_flag(mut self, cancel: CancelFlag) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn workers(&self) -> Concurrency {
        self.workers
    }

    /// Runs `work` over every input and returns the results in input order.
    ///
    /// The first failing input (lowest index among those that failed, panics
    /// included) turns the whole call into `PartialComputationFailure`; results
    /// of the other inputs are dropped. A raised cancel flag yields `Cancelled`.
    pub fn run_all<I, T, E, F>(&self, inputs: &[I], work: F) -> Result<Vec<T>, FrequencyError>
    where
        I: Sync,
        T: Send,
        E: fmt::Display,
        F: Fn(&I) -> Result<T, E> + Sync,
    {
        let cancel = self.cancel.as_ref();
        if cancel.is_some_and(CancelFlag::is_cancelled) {
            return Err(FrequencyError::Cancelled);
        }
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let worker_count = self.workers.get().min(inputs.len());
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(worker_count)
            .thread_name(|worker| format!("wordfreq-worker-{worker}"))
            .build()
            .map_err(|err| FrequencyError::PartialComputationFailure {
                fragment_index: 0,
                cause: format!("failed to start worker pool: {err}"),
            })?;
        wf_debug!(
            "Running {} inputs on {} workers",
            inputs.len(),
            worker_count
        );

        let abort = AtomicBool::new(false);
        let slots: Vec<Slot<T>> = pool.install(|| {
            inputs
                .par_iter()
                .with_max_len(1)
                .enumerate()
                .map(|(index, input)| {
                    if abort.load(Ordering::SeqCst) || cancel.is_some_and(CancelFlag::is_cancelled)
                    {
                        return Slot::Skipped;
                    }
                    wf_trace!(
                        "{} takes input {}",
                        rayon::current_thread_index().unwrap_or_default(),
                        index
                    );
                    match panic::catch_unwind(AssertUnwindSafe(|| work(input))) {
                        Ok(Ok(value)) => Slot::Done(value),
                        Ok(Err(err)) => {
                            abort.store(true, Ordering::SeqCst);
                            Slot::Failed(err.to_string())
                        }
                        Err(payload) => {
                            abort.store(true, Ordering::SeqCst);
                            Slot::Failed(panic_message(payload.as_ref()))
                        }
                    }
                })
                .collect()
        });

        if cancel.is_some_and(CancelFlag::is_cancelled) {
            return Err(FrequencyError::Cancelled);
        }
        // Slots are in input order, so the first failure has the lowest index.
        if let Some((fragment_index, cause)) =
            slots.iter().enumerate().find_map(|(index, slot)| match slot {
                Slot::Failed(cause) => Some((index, cause.clone())),
                _ => None,
            })
        {
            return Err(FrequencyError::PartialComputationFailure {
                fragment_index,
                cause,
            });
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(fragment_index, slot)| match slot {
                Slot::Done(value) => Ok(value),
                Slot::Failed(cause) => Err(FrequencyError::PartialComputationFailure {
                    fragment_index,
                    cause,
                }),
                Slot::Skipped => Err(FrequencyError::PartialComputationFailure {
                    fragment_index,
                    cause: "no result recorded".to_string(),
                }),
            })
            .collect()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {message}")
    } else if let Some(message) = payload.downcast_ref::<String>() {
        format!("worker panicked: {message}")
    } else {
        "worker panicked".to_string()
    }
}
