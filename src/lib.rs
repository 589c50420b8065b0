//! Reactive spirograph curve engine.
//!
//! A [`ParameterStore`] holds the four slider values; a [`CurveEngine`]
//! bound to it regenerates the curve after every change and publishes it
//! to subscribers. [`render::ComposeFrame`] turns the latest curve and the
//! slider state into renderer-ready geometry.

pub mod config;
pub mod curve;
pub mod error;
pub mod math;
pub mod parameter;
pub mod pipeline;
pub mod render;

pub use config::SpirographConfig;
pub use curve::{generate, Curve, CurveParams, ITERATIONS};
pub use error::{Result, SpirographError};
pub use parameter::{ParameterId, ParameterSnapshot, ParameterStore};
pub use pipeline::{CurveEngine, RecomputeMode};
