mod spirograph;

pub use spirograph::{generate, CurveParams, Spirograph};

use std::sync::Arc;

use crate::math::{Point2, Rect};

/// Default number of points per generated curve.
pub const ITERATIONS: usize = 1000;

/// An immutable, ordered sequence of curve points in local coordinates.
///
/// Cloning is cheap: clones share the same point buffer, so a renderer may
/// hold on to a snapshot while newer curves are being produced.
#[derive(Debug, Clone, PartialEq)]
pub struct Curve {
    points: Arc<[Point2]>,
}

impl Curve {
    /// Wraps an ordered point list.
    #[must_use]
    pub fn new(points: Vec<Point2>) -> Self {
        Self {
            points: points.into(),
        }
    }

    /// Returns the points in generation order.
    #[must_use]
    pub fn points(&self) -> &[Point2] {
        &self.points
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Returns whether both curves share the same point buffer.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.points, &other.points)
    }

    /// Axis-aligned bounds of all points, or `None` for an empty curve.
    #[must_use]
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let (min, max) = self
            .points
            .iter()
            .fold((*first, *first), |(min, max), p| {
                (
                    Point2::new(min.x.min(p.x), min.y.min(p.y)),
                    Point2::new(max.x.max(p.x), max.y.max(p.y)),
                )
            });
        Some(Rect::new(min, max))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::TOLERANCE;

    #[test]
    fn clones_share_storage() {
        let curve = Curve::new(vec![Point2::new(1.0, 2.0)]);
        let copy = curve.clone();
        assert!(curve.ptr_eq(&copy));
        assert!(!curve.ptr_eq(&Curve::new(vec![Point2::new(1.0, 2.0)])));
    }

    #[test]
    fn bounds_cover_all_points() {
        let curve = Curve::new(vec![
            Point2::new(-1.0, 4.0),
            Point2::new(3.0, -2.0),
            Point2::new(0.0, 0.0),
        ]);
        let b = curve.bounds().unwrap();
        assert!((b.min - Point2::new(-1.0, -2.0)).norm() < TOLERANCE);
        assert!((b.max - Point2::new(3.0, 4.0)).norm() < TOLERANCE);
    }

    #[test]
    fn empty_curve_has_no_bounds() {
        let curve = Curve::new(Vec::new());
        assert!(curve.is_empty());
        assert!(curve.bounds().is_none());
    }
}
