use nalgebra::{Similarity2, Vector2};

use crate::error::{RenderError, Result};
use crate::math::{Point2, Rect};

/// Size of the drawing area, in renderer units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
}

impl Viewport {
    /// Creates a viewport.
    ///
    /// # Errors
    ///
    /// Returns an error if either side is not positive and finite.
    pub fn new(width: f64, height: f64) -> Result<Self> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            return Err(RenderError::InvalidViewport { width, height }.into());
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// The clip rectangle, anchored at the origin.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }
}

/// Maps curve-local coordinates into a viewport.
///
/// The curve's origin lands on the viewport center and the largest possible
/// curve (`2·max_major_radius` across) fits the shorter side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    similarity: Similarity2<f64>,
}

impl ViewTransform {
    /// Builds the transform for `viewport`.
    #[must_use]
    pub fn fit(viewport: &Viewport, max_major_radius: f64) -> Self {
        let extent = 2.0 * max_major_radius;
        let scale = (viewport.width / extent).min(viewport.height / extent);
        let center = Vector2::new(viewport.width / 2.0, viewport.height / 2.0);
        Self {
            similarity: Similarity2::new(center, 0.0, scale),
        }
    }

    /// Uniform scale factor.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.similarity.scaling()
    }

    /// Maps one point.
    #[must_use]
    pub fn apply(&self, p: &Point2) -> Point2 {
        self.similarity.transform_point(p)
    }

    /// Maps a point list, preserving order.
    #[must_use]
    pub fn apply_all(&self, points: &[Point2]) -> Vec<Point2> {
        points.iter().map(|p| self.apply(p)).collect()
    }
}
