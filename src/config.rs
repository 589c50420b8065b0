use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Startup configuration: parameter ranges, curve resolution and stroke width.
///
/// Every field is optional in JSON; missing fields take their defaults.
///
/// ```json
/// { "maxMajorRadius": 120, "iterations": 2000 }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct SpirographConfig {
    /// Upper bound of the major radius slider.
    pub max_major_radius: f64,
    /// Upper bound of the minor radius slider.
    pub max_minor_radius: f64,
    /// Upper bound of the pin offset slider.
    pub max_offset: f64,
    /// Lower bound of the sample count slider.
    pub min_samples: f64,
    /// Upper bound of the sample count slider.
    pub max_samples: f64,
    /// Number of points per generated curve.
    pub iterations: usize,
    /// Slider increment.
    pub slider_step: f64,
    /// Stroke width of the rendered curve.
    pub stroke_width: f64,
}

impl Default for SpirographConfig {
    fn default() -> Self {
        Self {
            max_major_radius: 100.0,
            max_minor_radius: 100.0,
            max_offset: 50.0,
            min_samples: 2.0,
            max_samples: 100.0,
            iterations: crate::curve::ITERATIONS,
            slider_step: 1.0,
            stroke_width: 1.0,
        }
    }
}

impl SpirographConfig {
    /// Parses and validates a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid JSON for this type or the
    /// resulting configuration fails [`validate`](Self::validate).
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that ranges are usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("maxMajorRadius", self.max_major_radius),
            ("maxMinorRadius", self.max_minor_radius),
            ("maxOffset", self.max_offset),
            ("maxSamples", self.max_samples),
            ("sliderStep", self.slider_step),
            ("strokeWidth", self.stroke_width),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid(format!("{name} must be positive, got {value}")));
            }
        }
        if !self.min_samples.is_finite() || self.min_samples < 2.0 {
            return Err(invalid(format!(
                "minSamples must be at least 2, got {}",
                self.min_samples
            )));
        }
        if self.max_samples < self.min_samples {
            return Err(invalid(format!(
                "maxSamples ({}) is below minSamples ({})",
                self.max_samples, self.min_samples
            )));
        }
        if self.iterations == 0 {
            return Err(invalid("iterations must be at least 1".to_owned()));
        }
        Ok(())
    }
}

fn invalid(message: String) -> crate::error::SpirographError {
    ConfigError::Invalid(message).into()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::error::SpirographError;

    #[test]
    fn default_is_valid() {
        assert!(SpirographConfig::default().validate().is_ok());
    }

    #[test]
    fn empty_json_gives_defaults() {
        let config = SpirographConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SpirographConfig::default());
    }

    #[test]
    fn partial_json_overrides_fields() {
        let config =
            SpirographConfig::from_json_str(r#"{ "maxOffset": 30, "iterations": 2000 }"#).unwrap();
        assert_eq!(config.max_offset, 30.0);
        assert_eq!(config.iterations, 2000);
        assert_eq!(config.max_major_radius, 100.0);
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = SpirographConfig::from_json_str(r#"{ "maxRadius": 3 }"#).unwrap_err();
        assert!(matches!(err, SpirographError::Config(ConfigError::Parse(_))));
    }

    #[test]
    fn too_few_samples_is_rejected() {
        let err = SpirographConfig::from_json_str(r#"{ "minSamples": 1 }"#).unwrap_err();
        assert!(matches!(err, SpirographError::Config(ConfigError::Invalid(_))));
    }

    #[test]
    fn inverted_sample_range_is_rejected() {
        let config = SpirographConfig {
            min_samples: 50.0,
            max_samples: 10.0,
            ..SpirographConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_iterations_is_rejected() {
        let config = SpirographConfig {
            iterations: 0,
            ..SpirographConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
