//! Reactive recomputation: parameter changes in, fresh curves out.
//!
//! [`CurveEngine`] subscribes to a [`ParameterStore`] and republishes a new
//! [`Curve`] after every effective parameter change. Generation either runs
//! inline inside the change notification or on a [`CurveWorker`] thread,
//! whose newest result is handed back to the interactive thread by
//! [`CurveEngine::pump`].

mod cell;
mod worker;

pub use cell::LatestCell;
pub use worker::CurveWorker;

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use slotmap::{new_key_type, SlotMap};

use crate::curve::{generate, Curve, CurveParams};
use crate::error::Result;
use crate::parameter::{ParameterSnapshot, ParameterStore, SubscriptionId};

new_key_type! {
    /// Handle returned by [`CurveEngine::subscribe`].
    pub struct CurveSubscriptionId;
}

type CurveCallback = Box<dyn FnMut(&Curve)>;

/// Where curve generation runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecomputeMode {
    /// Generate synchronously inside the change notification.
    #[default]
    Inline,
    /// Generate on a worker thread; results are delivered by
    /// [`CurveEngine::pump`].
    Background,
}

struct EngineShared {
    iterations: usize,
    current: RefCell<Curve>,
    publications: Cell<u64>,
    subscribers: RefCell<SlotMap<CurveSubscriptionId, CurveCallback>>,
    worker: Option<CurveWorker>,
}

/// Owns the latest published curve and keeps it in sync with a store.
///
/// Cloning yields another handle to the same engine. Handles are confined
/// to the interactive thread; only the optional worker crosses threads.
///
/// Curve subscribers run on the interactive thread. They may read
/// [`curve`](Self::curve) but must not subscribe or unsubscribe from inside
/// the callback.
#[derive(Clone)]
pub struct CurveEngine {
    shared: Rc<EngineShared>,
}

impl CurveEngine {
    /// Creates an engine whose first curve is generated from `store`'s
    /// current values.
    ///
    /// # Errors
    ///
    /// Returns an error if the store's current values cannot produce a curve
    /// (zero minor radius) or the background worker cannot be started.
    pub fn new(store: &ParameterStore, iterations: usize, mode: RecomputeMode) -> Result<Self> {
        let params = CurveParams::new(&store.snapshot())?;
        let worker = match mode {
            RecomputeMode::Inline => None,
            RecomputeMode::Background => Some(CurveWorker::spawn(iterations)?),
        };

        Ok(Self {
            shared: Rc::new(EngineShared {
                iterations,
                current: RefCell::new(generate(&params, iterations)),
                publications: Cell::new(0),
                subscribers: RefCell::new(SlotMap::with_key()),
                worker,
            }),
        })
    }

    /// Creates an engine and binds it to `store` in one step.
    ///
    /// # Errors
    ///
    /// See [`new`](Self::new).
    pub fn attach(
        store: &mut ParameterStore,
        iterations: usize,
        mode: RecomputeMode,
    ) -> Result<Self> {
        let engine = Self::new(store, iterations, mode)?;
        engine.bind(store);
        Ok(engine)
    }

    /// Subscribes this engine to `store`'s change notifications.
    pub fn bind(&self, store: &mut ParameterStore) -> SubscriptionId {
        let engine = self.clone();
        store.subscribe(move |snapshot| engine.recompute(snapshot))
    }

    /// Recomputes from `snapshot`.
    ///
    /// Inline engines publish immediately; background engines submit the
    /// request and publish on a later [`pump`](Self::pump). A snapshot with
    /// a zero minor radius is skipped and the current curve stays published.
    pub fn recompute(&self, snapshot: &ParameterSnapshot) {
        let params = match CurveParams::new(snapshot) {
            Ok(params) => params,
            Err(err) => {
                tracing::warn!(%err, ?snapshot, "keeping previous curve");
                return;
            }
        };

        match &self.shared.worker {
            Some(worker) => {
                let generation = worker.submit(params);
                tracing::trace!(generation, "curve request submitted");
            }
            None => self.publish(generate(&params, self.shared.iterations)),
        }
    }

    /// Publishes the newest finished background result, if any.
    ///
    /// Returns whether a curve was published. Inline engines never have
    /// anything to pump.
    pub fn pump(&self) -> bool {
        let Some(curve) = self.shared.worker.as_ref().and_then(CurveWorker::take_latest) else {
            return false;
        };
        self.publish(curve);
        true
    }

    /// Like [`pump`](Self::pump), but waits up to `timeout` for the result
    /// of the newest request.
    pub fn pump_blocking(&self, timeout: Duration) -> bool {
        let Some(curve) = self
            .shared
            .worker
            .as_ref()
            .and_then(|worker| worker.wait_latest(timeout))
        else {
            return false;
        };
        self.publish(curve);
        true
    }

    /// Returns a snapshot of the latest published curve.
    #[must_use]
    pub fn curve(&self) -> Curve {
        self.shared.current.borrow().clone()
    }

    /// Number of curves published since creation (the initial curve excluded).
    #[must_use]
    pub fn publications(&self) -> u64 {
        self.shared.publications.get()
    }

    #[must_use]
    pub fn iterations(&self) -> usize {
        self.shared.iterations
    }

    #[must_use]
    pub fn mode(&self) -> RecomputeMode {
        if self.shared.worker.is_some() {
            RecomputeMode::Background
        } else {
            RecomputeMode::Inline
        }
    }

    /// Registers `callback` to receive every newly published curve.
    pub fn subscribe<F>(&self, callback: F) -> CurveSubscriptionId
    where
        F: FnMut(&Curve) + 'static,
    {
        self.shared.subscribers.borrow_mut().insert(Box::new(callback))
    }

    /// Removes a curve subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: CurveSubscriptionId) -> bool {
        self.shared.subscribers.borrow_mut().remove(id).is_some()
    }

    fn publish(&self, curve: Curve) {
        self.shared.current.replace(curve.clone());
        let count = self.shared.publications.get() + 1;
        self.shared.publications.set(count);
        tracing::debug!(publication = count, points = curve.len(), "curve published");

        for callback in self.shared.subscribers.borrow_mut().values_mut() {
            callback(&curve);
        }
    }
}

impl fmt::Debug for CurveEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CurveEngine")
            .field("iterations", &self.shared.iterations)
            .field("mode", &self.mode())
            .field("publications", &self.shared.publications.get())
            .field("subscribers", &self.shared.subscribers.borrow().len())
            .finish_non_exhaustive()
    }
}
