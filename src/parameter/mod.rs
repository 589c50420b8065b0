mod store;

pub use store::{ParameterStore, SubscriptionId};

use std::fmt;
use std::str::FromStr;

use crate::config::SpirographConfig;
use crate::error::{ParameterError, SpirographError};

/// Identifies one of the four spirograph inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterId {
    /// Radius of the fixed outer circle.
    MajorRadius,
    /// Radius of the rolling circle.
    MinorRadius,
    /// Distance from the rolling circle's center to the pin.
    Offset,
    /// Divisor of the full turn giving the angular step per iteration.
    SampleCount,
}

impl ParameterId {
    /// All parameters in slider display order.
    pub const ALL: [Self; 4] = [
        Self::MajorRadius,
        Self::MinorRadius,
        Self::Offset,
        Self::SampleCount,
    ];

    /// Stable key used for lookup by name.
    #[must_use]
    pub fn key(self) -> &'static str {
        match self {
            Self::MajorRadius => "majorRadius",
            Self::MinorRadius => "minorRadius",
            Self::Offset => "offset",
            Self::SampleCount => "sampleCount",
        }
    }

    /// Short caption shown next to the slider.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::MajorRadius => "Major",
            Self::MinorRadius => "Minor",
            Self::Offset => "Offset",
            Self::SampleCount => "Sample",
        }
    }

    fn index(self) -> usize {
        match self {
            Self::MajorRadius => 0,
            Self::MinorRadius => 1,
            Self::Offset => 2,
            Self::SampleCount => 3,
        }
    }
}

impl fmt::Display for ParameterId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for ParameterId {
    type Err = SpirographError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.key() == s)
            .ok_or_else(|| ParameterError::UnknownParameter(s.to_owned()).into())
    }
}

/// A named scalar with a closed range `[min, max]`.
///
/// The stored value is always inside the range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameter {
    id: ParameterId,
    min: f64,
    max: f64,
    value: f64,
}

impl Parameter {
    fn new(id: ParameterId, min: f64, max: f64, value: f64) -> Self {
        Self {
            id,
            min,
            max,
            value: value.clamp(min, max),
        }
    }

    #[must_use]
    pub fn id(&self) -> ParameterId {
        self.id
    }

    /// Lower bound of the range.
    #[must_use]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound of the range.
    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Clamps `value` into this parameter's range.
    #[must_use]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    fn set_value(&mut self, value: f64) {
        self.value = self.clamp(value);
    }
}

/// Declares the four parameters with their startup values.
///
/// The major radius starts at its maximum; the others start at half their
/// maximum.
fn declare(config: &SpirographConfig) -> [Parameter; 4] {
    [
        Parameter::new(
            ParameterId::MajorRadius,
            0.0,
            config.max_major_radius,
            config.max_major_radius,
        ),
        Parameter::new(
            ParameterId::MinorRadius,
            0.0,
            config.max_minor_radius,
            config.max_minor_radius / 2.0,
        ),
        Parameter::new(
            ParameterId::Offset,
            0.0,
            config.max_offset,
            config.max_offset / 2.0,
        ),
        Parameter::new(
            ParameterId::SampleCount,
            config.min_samples,
            config.max_samples,
            config.max_samples / 2.0,
        ),
    ]
}

/// The full tuple of current parameter values.
///
/// Change notifications always carry a complete snapshot, so a subscriber
/// never mixes values from different updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParameterSnapshot {
    pub major_radius: f64,
    pub minor_radius: f64,
    pub offset: f64,
    pub sample_count: f64,
}

impl ParameterSnapshot {
    #[must_use]
    pub fn new(major_radius: f64, minor_radius: f64, offset: f64, sample_count: f64) -> Self {
        Self {
            major_radius,
            minor_radius,
            offset,
            sample_count,
        }
    }

    /// Returns the value of `id` in this snapshot.
    #[must_use]
    pub fn get(&self, id: ParameterId) -> f64 {
        match id {
            ParameterId::MajorRadius => self.major_radius,
            ParameterId::MinorRadius => self.minor_radius,
            ParameterId::Offset => self.offset,
            ParameterId::SampleCount => self.sample_count,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for id in ParameterId::ALL {
            assert_eq!(id.key().parse::<ParameterId>().unwrap(), id);
        }
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = "radius".parse::<ParameterId>().unwrap_err();
        assert!(matches!(
            err,
            SpirographError::Parameter(ParameterError::UnknownParameter(ref k)) if k == "radius"
        ));
    }

    #[test]
    fn labels_match_slider_captions() {
        let labels: Vec<_> = ParameterId::ALL.iter().map(|id| id.label()).collect();
        assert_eq!(labels, ["Major", "Minor", "Offset", "Sample"]);
    }

    #[test]
    fn declared_defaults() {
        let params = declare(&SpirographConfig::default());
        assert_eq!(params[0].value(), 100.0);
        assert_eq!(params[1].value(), 50.0);
        assert_eq!(params[2].value(), 25.0);
        assert_eq!(params[3].value(), 50.0);
        assert_eq!(params[3].min(), 2.0);
    }

    #[test]
    fn ids_index_declaration_order() {
        let params = declare(&SpirographConfig::default());
        for id in ParameterId::ALL {
            assert_eq!(params[id.index()].id(), id);
        }
    }
}
