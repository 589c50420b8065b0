use super::{Point2, TOLERANCE};

/// An axis-aligned rectangle in the XY plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Rect {
    /// Creates a rectangle from two corners, normalizing their order.
    #[must_use]
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Creates a rectangle anchored at the origin with the given size.
    #[must_use]
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::new(Point2::origin(), Point2::new(width, height))
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> Point2 {
        nalgebra::center(&self.min, &self.max)
    }

    /// Returns whether `p` lies inside or on the boundary (within tolerance).
    #[must_use]
    pub fn contains(&self, p: &Point2) -> bool {
        p.x >= self.min.x - TOLERANCE
            && p.x <= self.max.x + TOLERANCE
            && p.y >= self.min.y - TOLERANCE
            && p.y <= self.max.y + TOLERANCE
    }
}

/// Clips segment `a -> b` against `rect` (Liang–Barsky).
///
/// Returns the visible portion, or `None` when the segment lies entirely
/// outside the rectangle.
#[must_use]
pub fn clip_segment(a: &Point2, b: &Point2, rect: &Rect) -> Option<(Point2, Point2)> {
    let d = b - a;
    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    // (p, q) pairs for the left, right, bottom and top edges.
    let edges = [
        (-d.x, a.x - rect.min.x),
        (d.x, rect.max.x - a.x),
        (-d.y, a.y - rect.min.y),
        (d.y, rect.max.y - a.y),
    ];

    for (p, q) in edges {
        if p.abs() < TOLERANCE {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    Some((a + d * t0, a + d * t1))
}

/// Clips an open polyline against `rect`.
///
/// Visible pieces of consecutive segments are joined into runs; every
/// time the polyline leaves the rectangle a new run starts. A single
/// point inside the rectangle yields a one-point run.
#[must_use]
pub fn clip_polyline(points: &[Point2], rect: &Rect) -> Vec<Vec<Point2>> {
    let mut runs: Vec<Vec<Point2>> = Vec::new();

    if points.len() == 1 {
        if rect.contains(&points[0]) {
            runs.push(vec![points[0]]);
        }
        return runs;
    }

    let mut current: Vec<Point2> = Vec::new();
    for pair in points.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        match clip_segment(a, b, rect) {
            Some((start, end)) => {
                let continues = current
                    .last()
                    .is_some_and(|last| (last - start).norm() < TOLERANCE);
                if !continues {
                    if current.len() > 1 {
                        runs.push(std::mem::take(&mut current));
                    } else {
                        current.clear();
                    }
                    current.push(start);
                }
                current.push(end);
            }
            None => {
                if current.len() > 1 {
                    runs.push(std::mem::take(&mut current));
                } else {
                    current.clear();
                }
            }
        }
    }
    if current.len() > 1 {
        runs.push(current);
    }
    runs
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn unit_square() -> Rect {
        Rect::from_size(10.0, 10.0)
    }

    #[test]
    fn segment_inside_is_unchanged() {
        let a = Point2::new(1.0, 1.0);
        let b = Point2::new(9.0, 5.0);
        let (s, e) = clip_segment(&a, &b, &unit_square()).unwrap();
        assert_abs_diff_eq!(s, a, epsilon = 1e-12);
        assert_abs_diff_eq!(e, b, epsilon = 1e-12);
    }

    #[test]
    fn segment_crossing_is_trimmed() {
        let a = Point2::new(-5.0, 5.0);
        let b = Point2::new(15.0, 5.0);
        let (s, e) = clip_segment(&a, &b, &unit_square()).unwrap();
        assert_abs_diff_eq!(s, Point2::new(0.0, 5.0), epsilon = 1e-12);
        assert_abs_diff_eq!(e, Point2::new(10.0, 5.0), epsilon = 1e-12);
    }

    #[test]
    fn segment_outside_is_rejected() {
        let a = Point2::new(-5.0, -5.0);
        let b = Point2::new(-1.0, 20.0);
        assert!(clip_segment(&a, &b, &unit_square()).is_none());
    }

    #[test]
    fn parallel_segment_outside_is_rejected() {
        let a = Point2::new(0.0, 12.0);
        let b = Point2::new(10.0, 12.0);
        assert!(clip_segment(&a, &b, &unit_square()).is_none());
    }

    #[test]
    fn polyline_inside_is_one_run() {
        let pts = vec![
            Point2::new(1.0, 1.0),
            Point2::new(5.0, 1.0),
            Point2::new(5.0, 5.0),
        ];
        let runs = clip_polyline(&pts, &unit_square());
        assert_eq!(runs.len(), 1);
        assert_eq!(runs[0].len(), 3);
    }

    #[test]
    fn polyline_leaving_and_returning_splits() {
        let pts = vec![
            Point2::new(2.0, 5.0),
            Point2::new(20.0, 5.0),
            Point2::new(20.0, 8.0),
            Point2::new(2.0, 8.0),
        ];
        let runs = clip_polyline(&pts, &unit_square());
        assert_eq!(runs.len(), 2);
        assert_abs_diff_eq!(runs[0][1], Point2::new(10.0, 5.0), epsilon = 1e-12);
        assert_abs_diff_eq!(runs[1][0], Point2::new(10.0, 8.0), epsilon = 1e-12);
    }

    #[test]
    fn clipped_points_stay_inside() {
        let rect = unit_square();
        let pts: Vec<Point2> = (0..50)
            .map(|i| {
                let t = f64::from(i) * 0.3;
                Point2::new(5.0 + 9.0 * t.cos(), 5.0 + 9.0 * t.sin())
            })
            .collect();
        for run in clip_polyline(&pts, &rect) {
            assert!(run.iter().all(|p| rect.contains(p)));
        }
    }

    #[test]
    fn rect_center_and_size() {
        let r = Rect::new(Point2::new(4.0, 6.0), Point2::new(0.0, 2.0));
        assert!((r.width() - 4.0).abs() < TOLERANCE);
        assert!((r.height() - 4.0).abs() < TOLERANCE);
        assert!((r.center() - Point2::new(2.0, 4.0)).norm() < TOLERANCE);
    }
}
