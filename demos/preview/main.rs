//! Spirograph preview: drives the store/engine pipeline and writes one frame as SVG.
//!
//! Usage:
//! ```text
//! cargo run --example preview                                  # defaults to stdout
//! cargo run --example preview -- offset=40 sampleCount=7       # slider moves
//! cargo run --example preview -- --background --out curve.svg
//! cargo run --example preview -- --config spiro.json --size 800x600
//! ```
//!
//! Each `key=value` pair is applied through `ParameterStore::set` in order,
//! exactly like a slider move, so clamping and change suppression apply.

use std::error::Error;
use std::fs;
use std::time::Duration;

use spirograph::error::ParameterError;
use spirograph::render::{ComposeFrame, StrokeStyle, Viewport};
use spirograph::{CurveEngine, ParameterId, ParameterStore, RecomputeMode, SpirographConfig};

const WORKER_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Default)]
struct Options {
    config: Option<String>,
    out: Option<String>,
    background: bool,
    size: Option<(f64, f64)>,
    moves: Vec<(ParameterId, f64)>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Options, Box<dyn Error>> {
    let mut options = Options::default();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => options.config = Some(args.next().ok_or("--config needs a path")?),
            "--out" => options.out = Some(args.next().ok_or("--out needs a path")?),
            "--background" => options.background = true,
            "--size" => {
                let size = args.next().ok_or("--size needs WIDTHxHEIGHT")?;
                let (w, h) = size.split_once('x').ok_or("--size needs WIDTHxHEIGHT")?;
                options.size = Some((w.parse()?, h.parse()?));
            }
            other => {
                let (key, value) = other
                    .split_once('=')
                    .ok_or_else(|| format!("unexpected argument: {other}"))?;
                let id: ParameterId = key.parse()?;
                let value: f64 = value.parse().map_err(|_| ParameterError::InvalidValue {
                    parameter: id.key(),
                    value: value.to_owned(),
                })?;
                options.moves.push((id, value));
            }
        }
    }
    Ok(options)
}

fn main() -> Result<(), Box<dyn Error>> {
    // Default: WARN for everything, INFO for spirograph.
    // Override with RUST_LOG env var (e.g. RUST_LOG=spirograph=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("spirograph=info".parse().unwrap_or_default());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let options = parse_args(std::env::args().skip(1))?;

    let config = match &options.config {
        Some(path) => SpirographConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => SpirographConfig::default(),
    };
    let mode = if options.background {
        RecomputeMode::Background
    } else {
        RecomputeMode::Inline
    };

    let mut store = ParameterStore::new(&config);
    let engine = CurveEngine::attach(&mut store, config.iterations, mode)?;

    let mut changed = false;
    for (id, value) in &options.moves {
        changed |= store.set(*id, *value);
    }
    if mode == RecomputeMode::Background && changed && !engine.pump_blocking(WORKER_TIMEOUT) {
        tracing::warn!("no new curve delivered; drawing the previous curve");
    }

    let (width, height) = options.size.unwrap_or((400.0, 400.0));
    let frame = ComposeFrame::new(
        Viewport::new(width, height)?,
        StrokeStyle::new(config.stroke_width)?,
    )
    .slider_step(config.slider_step)
    .execute(&engine.curve(), &store)?;

    tracing::info!(
        runs = frame.paths.len(),
        publications = engine.publications(),
        "frame ready"
    );

    let svg = frame.to_svg();
    match &options.out {
        Some(path) => fs::write(path, svg)?,
        None => print!("{svg}"),
    }
    Ok(())
}
