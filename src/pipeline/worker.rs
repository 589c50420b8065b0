use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::curve::{generate, Curve, CurveParams};
use crate::error::{PipelineError, Result};

use super::LatestCell;

/// Pending request slot shared with the worker thread.
#[derive(Debug, Default)]
struct RequestSlot {
    pending: Option<(u64, CurveParams)>,
    shutdown: bool,
}

#[derive(Debug)]
struct WorkerShared {
    requests: Mutex<RequestSlot>,
    wake: Condvar,
    latest_requested: AtomicU64,
    results: LatestCell<Curve>,
}

impl WorkerShared {
    fn lock_requests(&self) -> MutexGuard<'_, RequestSlot> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_stale(&self, generation: u64) -> bool {
        generation < self.latest_requested.load(Ordering::Acquire)
    }
}

/// Generates curves on a dedicated thread, keeping only the newest request.
///
/// [`submit`](Self::submit) replaces any request the thread has not started
/// yet. Results of requests that were superseded while computing are
/// discarded, so [`take_latest`](Self::take_latest) only ever hands over the
/// curve for the most recent submission.
#[derive(Debug)]
pub struct CurveWorker {
    shared: Arc<WorkerShared>,
    handle: Option<JoinHandle<()>>,
}

impl CurveWorker {
    /// Starts the worker thread.
    ///
    /// # Errors
    ///
    /// Returns [`PipelineError::WorkerSpawn`] if the OS refuses to create the
    /// thread.
    pub fn spawn(iterations: usize) -> Result<Self> {
        let shared = Arc::new(WorkerShared {
            requests: Mutex::new(RequestSlot::default()),
            wake: Condvar::new(),
            latest_requested: AtomicU64::new(0),
            results: LatestCell::new(),
        });

        let thread_shared = Arc::clone(&shared);
        let handle = thread::Builder::new()
            .name("spirograph-curve".to_owned())
            .spawn(move || run(&thread_shared, iterations))
            .map_err(PipelineError::WorkerSpawn)?;

        Ok(Self {
            shared,
            handle: Some(handle),
        })
    }

    /// Queues `params` for generation, superseding any pending request.
    ///
    /// Returns the generation number assigned to this request.
    pub fn submit(&self, params: CurveParams) -> u64 {
        let generation = self.shared.latest_requested.fetch_add(1, Ordering::AcqRel) + 1;
        let mut requests = self.shared.lock_requests();
        if let Some((superseded, _)) = requests.pending.replace((generation, params)) {
            tracing::trace!(superseded, generation, "dropping superseded curve request");
        }
        drop(requests);
        self.shared.wake.notify_one();
        generation
    }

    /// Generation number of the most recent submission (0 before any).
    #[must_use]
    pub fn latest_requested(&self) -> u64 {
        self.shared.latest_requested.load(Ordering::Acquire)
    }

    /// Takes the finished curve for the newest submission, if it is ready.
    pub fn take_latest(&self) -> Option<Curve> {
        let (generation, curve) = self.shared.results.take()?;
        if self.shared.is_stale(generation) {
            tracing::trace!(generation, "discarding stale curve result");
            return None;
        }
        Some(curve)
    }

    /// Waits up to `timeout` for the curve of the newest submission.
    pub fn wait_latest(&self, timeout: Duration) -> Option<Curve> {
        let wanted = self.latest_requested();
        if wanted == 0 {
            return None;
        }
        self.shared
            .results
            .take_at_least(wanted, timeout)
            .map(|(_, curve)| curve)
    }
}

impl Drop for CurveWorker {
    fn drop(&mut self) {
        self.shared.lock_requests().shutdown = true;
        self.shared.wake.notify_all();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::warn!("curve worker thread panicked");
            }
        }
    }
}

fn run(shared: &WorkerShared, iterations: usize) {
    tracing::trace!(iterations, "curve worker started");
    loop {
        let (generation, params) = {
            let guard = shared.lock_requests();
            let mut requests = shared
                .wake
                .wait_while(guard, |slot| slot.pending.is_none() && !slot.shutdown)
                .unwrap_or_else(PoisonError::into_inner);
            if requests.shutdown {
                break;
            }
            match requests.pending.take() {
                Some(request) => request,
                None => continue,
            }
        };

        let curve = generate(&params, iterations);

        if shared.is_stale(generation) {
            tracing::trace!(generation, "curve superseded while computing");
            continue;
        }
        shared.results.put(generation, curve);
        tracing::trace!(generation, "curve ready");
    }
    tracing::trace!("curve worker stopped");
}
