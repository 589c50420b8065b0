use thiserror::Error;

/// Top-level error type for the spirograph crate.
#[derive(Debug, Error)]
pub enum SpirographError {
    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),
}

/// Errors related to parameter lookup.
#[derive(Debug, Error)]
pub enum ParameterError {
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    #[error("invalid value for {parameter}: {value}")]
    InvalidValue { parameter: &'static str, value: String },
}

/// Errors related to curve evaluation.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),

    #[error("non-finite value for {0}")]
    NonFinite(&'static str),
}

/// Errors related to frame composition and stroke tessellation.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("invalid viewport: {width} x {height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("invalid stroke parameters: {0}")]
    InvalidParameters(String),
}

/// Errors related to loading and validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// Errors related to the background recompute worker.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("failed to spawn curve worker: {0}")]
    WorkerSpawn(#[source] std::io::Error),
}

/// Convenience type alias for results using [`SpirographError`].
pub type Result<T> = std::result::Result<T, SpirographError>;
