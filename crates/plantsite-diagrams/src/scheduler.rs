//! Bounded-concurrency batch runner.
//!
//! [`BatchRunner`] collects deferred tasks and runs them in batches of at
//! most `works` at a time: tasks accumulate in input order, and whenever the
//! pending list reaches the budget the whole batch runs concurrently before
//! any further task is accepted. A straggler in one batch therefore delays
//! the start of the next even when other slots are idle; the bound on
//! in-flight work is what matters here, not latency.
//!
//! Every member of a batch runs to completion even when a sibling fails;
//! the first failure is reported once the batch has drained, and no later
//! batch is started after a failed one.

use rayon::prelude::*;

type Task<'scope, E> = Box<dyn FnOnce() -> Result<(), E> + Send + 'scope>;

/// Runs deferred tasks in concurrent batches of at most `works`.
pub struct BatchRunner<'scope, E> {
    works: usize,
    pending: Vec<Task<'scope, E>>,
}

impl<'scope, E: Send> BatchRunner<'scope, E> {
    /// Create a runner with the given concurrency budget (clamped to >= 1).
    #[must_use]
    pub fn new(works: usize) -> Self {
        let works = works.max(1);
        Self {
            works,
            pending: Vec::with_capacity(works),
        }
    }

    /// Append a deferred task, flushing the current batch if it is full.
    ///
    /// An error from the flushed batch propagates here; callers should stop
    /// pushing once `push` fails.
    pub fn push(
        &mut self,
        task: impl FnOnce() -> Result<(), E> + Send + 'scope,
    ) -> Result<(), E> {
        self.pending.push(Box::new(task));
        if self.pending.len() >= self.works {
            self.flush()
        } else {
            Ok(())
        }
    }

    /// Run any remaining tasks as a final batch.
    pub fn finish(mut self) -> Result<(), E> {
        self.flush()
    }

    /// Run all pending tasks concurrently and clear the pending list.
    ///
    /// All tasks complete before the result is inspected, so a failing task
    /// never prevents its batch siblings from finishing their own work.
    fn flush(&mut self) -> Result<(), E> {
        if self.pending.is_empty() {
            return Ok(());
        }

        let batch = std::mem::take(&mut self.pending);
        let results: Vec<Result<(), E>> =
            batch.into_par_iter().map(|task| task()).collect();

        results
            .into_iter()
            .find(Result::is_err)
            .unwrap_or(Ok(()))
    }
}
