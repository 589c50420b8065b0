//! Renderer-facing frame composition.
//!
//! Turns a curve snapshot and the current slider state into the geometry an
//! external GUI draws: the curve centered and scaled into a viewport,
//! clipped to its bounds and stroked as a triangle ribbon, plus one
//! [`SliderView`] per parameter.

mod slider;
mod stroke_style;
mod svg;
mod tessellate_stroke;
mod view;

pub use slider::SliderView;
pub use stroke_style::{LineJoin, StrokeStyle};
pub use tessellate_stroke::{TessellateStroke, TriangleMesh2};
pub use view::{ViewTransform, Viewport};

use crate::curve::Curve;
use crate::error::Result;
use crate::math::{clip_polyline, Point2, TOLERANCE};
use crate::parameter::{ParameterId, ParameterStore};

/// One drawable frame.
#[derive(Debug, Clone)]
pub struct Frame {
    /// Drawing area; also the clip rectangle.
    pub viewport: Viewport,
    /// Curve-local to viewport mapping used for `paths`.
    pub transform: ViewTransform,
    /// Visible polyline runs in viewport coordinates.
    pub paths: Vec<Vec<Point2>>,
    /// Stroke ribbon for each entry of `paths`.
    pub strokes: Vec<TriangleMesh2>,
    pub style: StrokeStyle,
    /// Slider rows in display order.
    pub sliders: Vec<SliderView>,
}

/// Composes a [`Frame`] from a curve and a parameter store.
#[derive(Debug, Clone, Copy)]
pub struct ComposeFrame {
    viewport: Viewport,
    style: StrokeStyle,
    slider_step: f64,
}

impl ComposeFrame {
    /// Creates a composition with step-1 sliders.
    #[must_use]
    pub fn new(viewport: Viewport, style: StrokeStyle) -> Self {
        Self {
            viewport,
            style,
            slider_step: 1.0,
        }
    }

    /// Sets the increment reported for every slider.
    #[must_use]
    pub fn slider_step(mut self, step: f64) -> Self {
        self.slider_step = step;
        self
    }

    /// Executes the composition.
    ///
    /// The view is fitted to the major radius slider's maximum, so the scale
    /// stays fixed while the sliders move.
    ///
    /// # Errors
    ///
    /// Returns an error if stroke tessellation of a visible run fails.
    pub fn execute(&self, curve: &Curve, store: &ParameterStore) -> Result<Frame> {
        let max_major = store.parameter(ParameterId::MajorRadius).max();
        let transform = ViewTransform::fit(&self.viewport, max_major);
        let mapped = transform.apply_all(curve.points());

        let mut paths = Vec::new();
        let mut strokes = Vec::new();
        for run in clip_polyline(&mapped, &self.viewport.bounds()) {
            let run = dedup_coincident(run);
            if run.len() < 2 {
                continue;
            }
            strokes.push(TessellateStroke::new(run.clone(), self.style, false).execute()?);
            paths.push(run);
        }
        tracing::trace!(runs = paths.len(), "frame composed");

        let sliders = store
            .parameters()
            .iter()
            .map(|parameter| SliderView::new(parameter, self.slider_step))
            .collect();

        Ok(Frame {
            viewport: self.viewport,
            transform,
            paths,
            strokes,
            style: self.style,
            sliders,
        })
    }
}

/// Drops points that coincide with their predecessor.
fn dedup_coincident(mut run: Vec<Point2>) -> Vec<Point2> {
    run.dedup_by(|b, a| (*b - *a).norm() < TOLERANCE);
    run
}
