use std::sync::{Condvar, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// Single-slot hand-off cell that keeps only the newest value.
///
/// Values are tagged with a generation number. A value older than the one
/// already stored is dropped; a newer one overwrites an undelivered older
/// one. Readers take the value out, leaving the slot empty.
#[derive(Debug)]
pub struct LatestCell<T> {
    slot: Mutex<Option<(u64, T)>>,
    ready: Condvar,
}

impl<T> Default for LatestCell<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestCell<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slot: Mutex::new(None),
            ready: Condvar::new(),
        }
    }

    /// Stores `value` unless a newer generation is already waiting.
    ///
    /// Returns whether the value was stored.
    pub fn put(&self, generation: u64, value: T) -> bool {
        let mut slot = self.lock();
        if slot.as_ref().is_some_and(|(held, _)| *held > generation) {
            return false;
        }
        *slot = Some((generation, value));
        drop(slot);
        self.ready.notify_all();
        true
    }

    /// Takes the stored value, if any.
    pub fn take(&self) -> Option<(u64, T)> {
        self.lock().take()
    }

    /// Waits up to `timeout` for a value of at least `generation`, then takes it.
    ///
    /// Returns `None` on timeout. Older values found while waiting stay in
    /// the slot.
    pub fn take_at_least(&self, generation: u64, timeout: Duration) -> Option<(u64, T)> {
        let guard = self.lock();
        let (mut slot, _) = self
            .ready
            .wait_timeout_while(guard, timeout, |slot| {
                !slot.as_ref().is_some_and(|(held, _)| *held >= generation)
            })
            .unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|(held, _)| *held >= generation) {
            slot.take()
        } else {
            None
        }
    }

    /// Generation of the stored value, if any.
    #[must_use]
    pub fn peek_generation(&self) -> Option<u64> {
        self.lock().as_ref().map(|(generation, _)| *generation)
    }

    fn lock(&self) -> MutexGuard<'_, Option<(u64, T)>> {
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
