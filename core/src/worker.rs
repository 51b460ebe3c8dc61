//! Background threads for asynchronous calls.

use tokio::runtime::{Builder, Runtime};

use crate::error::{ClientError, Result};

pub(crate) const WORKER_THREAD_NAME: &str = "simple-client-worker";

/// Runs blocking jobs on a tokio blocking pool capped at `max_in_flight`
/// threads. Jobs past the cap wait in the pool's queue.
///
/// Shutting the pool down cancels queued jobs, so whoever owns the pool must
/// keep it alive until every submitted job has run.
pub(crate) struct WorkerPool {
    runtime: Option<Runtime>,
}

impl WorkerPool {
    pub(crate) fn new(max_in_flight: usize) -> Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .max_blocking_threads(max_in_flight)
            .thread_name(WORKER_THREAD_NAME)
            .build()
            .map_err(|e| ClientError::Config(format!("starting worker pool: {e}")))?;
        Ok(Self {
            runtime: Some(runtime),
        })
    }

    /// Queue `job`. It always runs on a pool thread, never the caller's.
    pub(crate) fn submit<F>(&self, job: F)
    where
        F: FnOnce() + Send + 'static,
    {
        if let Some(runtime) = &self.runtime {
            runtime.spawn_blocking(job);
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        // A plain drop blocks, which panics on our own threads and in async code.
        if let Some(runtime) = self.runtime.take() {
            runtime.shutdown_background();
        }
    }
}
