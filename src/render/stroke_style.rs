use crate::error::{RenderError, Result};

/// How consecutive stroke segments are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Always miter (the miter length is still capped).
    Miter,
    /// Always bevel interior corners.
    Bevel,
    /// Miter, switching to bevel at sharp corners.
    #[default]
    Auto,
}

/// Style parameters for polyline stroke tessellation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle {
    width: f64,
    line_join: LineJoin,
}

impl StrokeStyle {
    /// Creates a new stroke style with [`LineJoin::Auto`].
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is not positive and finite.
    pub fn new(width: f64) -> Result<Self> {
        if !width.is_finite() || width <= 0.0 {
            return Err(RenderError::InvalidParameters(
                "stroke width must be positive".to_owned(),
            )
            .into());
        }
        Ok(Self {
            width,
            line_join: LineJoin::Auto,
        })
    }

    /// Returns a copy using `line_join`.
    #[must_use]
    pub fn with_line_join(mut self, line_join: LineJoin) -> Self {
        self.line_join = line_join;
        self
    }

    /// Returns the stroke width.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns half the stroke width.
    #[must_use]
    pub fn half_width(&self) -> f64 {
        self.width * 0.5
    }

    #[must_use]
    pub fn line_join(&self) -> LineJoin {
        self.line_join
    }
}

impl Default for StrokeStyle {
    /// A 1-unit hairline.
    fn default() -> Self {
        Self {
            width: 1.0,
            line_join: LineJoin::Auto,
        }
    }
}
