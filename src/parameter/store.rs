use std::fmt;

use slotmap::{new_key_type, SlotMap};

use super::{declare, Parameter, ParameterId, ParameterSnapshot};
use crate::config::SpirographConfig;

new_key_type! {
    /// Handle returned by [`ParameterStore::subscribe`].
    pub struct SubscriptionId;
}

type Callback = Box<dyn FnMut(&ParameterSnapshot)>;

/// Holds the current parameter values and notifies subscribers on change.
///
/// The store is owned by the interactive thread and passed by reference to
/// whatever needs it. Subscribers run synchronously inside [`set`](Self::set).
pub struct ParameterStore {
    parameters: [Parameter; 4],
    subscribers: SlotMap<SubscriptionId, Callback>,
}

impl ParameterStore {
    /// Creates a store with the ranges and startup values of `config`.
    #[must_use]
    pub fn new(config: &SpirographConfig) -> Self {
        Self {
            parameters: declare(config),
            subscribers: SlotMap::with_key(),
        }
    }

    /// Returns the current value of `id`.
    #[must_use]
    pub fn get(&self, id: ParameterId) -> f64 {
        self.parameters[id.index()].value()
    }

    /// Returns the full declaration of `id`, including its range.
    #[must_use]
    pub fn parameter(&self, id: ParameterId) -> &Parameter {
        &self.parameters[id.index()]
    }

    /// Returns all four parameters in display order.
    #[must_use]
    pub fn parameters(&self) -> &[Parameter; 4] {
        &self.parameters
    }

    /// Returns the current values as one tuple.
    #[must_use]
    pub fn snapshot(&self) -> ParameterSnapshot {
        ParameterSnapshot::new(
            self.get(ParameterId::MajorRadius),
            self.get(ParameterId::MinorRadius),
            self.get(ParameterId::Offset),
            self.get(ParameterId::SampleCount),
        )
    }

    /// Clamps `value` into the range of `id` and stores it.
    ///
    /// Subscribers are notified once, with the full snapshot, when the stored
    /// value actually changes. Returns whether it changed. `NaN` is ignored.
    #[allow(clippy::float_cmp)]
    pub fn set(&mut self, id: ParameterId, value: f64) -> bool {
        if value.is_nan() {
            tracing::warn!(parameter = %id, "ignoring NaN parameter value");
            return false;
        }

        let parameter = &mut self.parameters[id.index()];
        let previous = parameter.value();
        parameter.set_value(value);
        let current = parameter.value();

        if current == previous {
            return false;
        }

        tracing::debug!(parameter = %id, previous, current, "parameter changed");
        let snapshot = self.snapshot();
        for callback in self.subscribers.values_mut() {
            callback(&snapshot);
        }
        true
    }

    /// Registers `callback` to run after every effective change.
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&ParameterSnapshot) + 'static,
    {
        self.subscribers.insert(Box::new(callback))
    }

    /// Removes a subscription. Returns `false` if it was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.subscribers.remove(id).is_some()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl Default for ParameterStore {
    fn default() -> Self {
        Self::new(&SpirographConfig::default())
    }
}

impl fmt::Debug for ParameterStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParameterStore")
            .field("parameters", &self.parameters)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
