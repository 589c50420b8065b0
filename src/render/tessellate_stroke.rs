use crate::error::{RenderError, Result};
use crate::math::{Point2, Vector2};

use super::stroke_style::{LineJoin, StrokeStyle};

/// When the miter scale exceeds this limit, switch to a bevel join.
const BEVEL_THRESHOLD: f64 = 2.0;

/// A flat triangle mesh in the XY plane.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh2 {
    /// Vertex positions.
    pub vertices: Vec<Point2>,
    /// Triangle indices (each triple defines a triangle).
    pub indices: Vec<[u32; 3]>,
}

/// How a polyline vertex maps to mesh vertices at the join.
enum JoinKind {
    /// Miter join or endpoint: 2 mesh vertices (left, right).
    Miter { dir: Vector2, scale: f64 },
    /// Bevel join: 3 mesh vertices (1 shared inside + 2 split outside).
    Bevel {
        inside_dir: Vector2,
        inside_scale: f64,
        /// `true` when the inside of the bend is the right (−offset) side.
        inside_is_right: bool,
        outside_in_dir: Vector2,
        outside_out_dir: Vector2,
    },
}

/// Mesh vertex indices associated with a single polyline vertex.
struct VertexSlot {
    in_left: u32,
    in_right: u32,
    out_left: u32,
    out_right: u32,
}

/// Generates a flat ribbon triangle mesh from a polyline and stroke style.
///
/// At sharp angles (miter scale > [`BEVEL_THRESHOLD`]) an
/// [`LineJoin::Auto`] stroke uses a bevel join instead of a miter to
/// prevent spikes.
#[derive(Debug)]
pub struct TessellateStroke {
    points: Vec<Point2>,
    style: StrokeStyle,
    closed: bool,
}

impl TessellateStroke {
    /// Creates a new stroke tessellation operation.
    #[must_use]
    pub fn new(points: Vec<Point2>, style: StrokeStyle, closed: bool) -> Self {
        Self {
            points,
            style,
            closed,
        }
    }

    /// Executes the tessellation, producing a ribbon mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than 2 points are provided, or if consecutive
    /// points are coincident (zero-length segment).
    #[allow(clippy::cast_possible_truncation)]
    pub fn execute(&self) -> Result<TriangleMesh2> {
        let n = self.points.len();
        if n < 2 {
            return Err(RenderError::InvalidParameters(
                "at least 2 points are required for stroke tessellation".to_owned(),
            )
            .into());
        }

        let half_w = self.style.half_width();
        let joins = self.compute_joins()?;

        let mut vertices = Vec::with_capacity(n * 2);
        let mut slots = Vec::with_capacity(n);
        let mut bevel_tris: Vec<[u32; 3]> = Vec::new();

        for (p, join) in self.points.iter().zip(&joins) {
            let idx = vertices.len() as u32;
            match join {
                JoinKind::Miter { dir, scale } => {
                    let off = dir * half_w * *scale;
                    vertices.push(p + off);
                    vertices.push(p - off);
                    slots.push(VertexSlot {
                        in_left: idx,
                        in_right: idx + 1,
                        out_left: idx,
                        out_right: idx + 1,
                    });
                }
                JoinKind::Bevel {
                    inside_dir,
                    inside_scale,
                    inside_is_right,
                    outside_in_dir,
                    outside_out_dir,
                } => {
                    let in_off = inside_dir * half_w * *inside_scale;
                    let off_in = outside_in_dir * half_w;
                    let off_out = outside_out_dir * half_w;

                    if *inside_is_right {
                        // Left turn: outside is the +offset side.
                        vertices.extend_from_slice(&[p + off_in, p - in_off, p + off_out]);
                        slots.push(VertexSlot {
                            in_left: idx,
                            in_right: idx + 1,
                            out_left: idx + 2,
                            out_right: idx + 1,
                        });
                        bevel_tris.push([idx + 1, idx, idx + 2]);
                    } else {
                        // Right turn: outside is the −offset side.
                        vertices.extend_from_slice(&[p + in_off, p - off_in, p - off_out]);
                        slots.push(VertexSlot {
                            in_left: idx,
                            in_right: idx + 1,
                            out_left: idx,
                            out_right: idx + 2,
                        });
                        bevel_tris.push([idx, idx + 2, idx + 1]);
                    }
                }
            }
        }

        let segment_count = if self.closed { n } else { n - 1 };
        let mut indices = Vec::with_capacity(segment_count * 2 + bevel_tris.len());
        for i in 0..segment_count {
            let si = &slots[i];
            let sj = &slots[(i + 1) % n];
            indices.push([si.out_left, sj.in_left, si.out_right]);
            indices.push([si.out_right, sj.in_left, sj.in_right]);
        }
        indices.extend_from_slice(&bevel_tris);

        Ok(TriangleMesh2 { vertices, indices })
    }

    /// Determines the join kind (miter or bevel) at each polyline vertex.
    fn compute_joins(&self) -> Result<Vec<JoinKind>> {
        let n = self.points.len();
        let line_join = self.style.line_join();
        let mut joins = Vec::with_capacity(n);

        for i in 0..n {
            let is_interior = self.closed || (i > 0 && i < n - 1);

            if !is_interior {
                let seg_dir = if i == 0 {
                    self.segment_direction(0, 1)?
                } else {
                    self.segment_direction(n - 2, n - 1)?
                };
                joins.push(JoinKind::Miter {
                    dir: perp(seg_dir),
                    scale: 1.0,
                });
                continue;
            }

            let prev = if i == 0 { n - 1 } else { i - 1 };
            let next = (i + 1) % n;
            let d_prev = self.segment_direction(prev, i)?;
            let d_next = self.segment_direction(i, next)?;

            let cos_half = f64::midpoint(1.0, d_prev.dot(&d_next)).sqrt();
            let miter_scale = if cos_half > f64::EPSILON {
                1.0 / cos_half
            } else {
                f64::MAX
            };

            let use_bevel = match line_join {
                LineJoin::Miter => false,
                LineJoin::Bevel => true,
                LineJoin::Auto => miter_scale > BEVEL_THRESHOLD,
            };

            let inside_dir = perp(average_direction(d_prev, d_next));
            if use_bevel {
                joins.push(JoinKind::Bevel {
                    inside_dir,
                    inside_scale: miter_scale.min(BEVEL_THRESHOLD),
                    inside_is_right: d_prev.perp(&d_next) > 0.0,
                    outside_in_dir: perp(d_prev),
                    outside_out_dir: perp(d_next),
                });
            } else {
                joins.push(JoinKind::Miter {
                    dir: inside_dir,
                    scale: miter_scale.min(BEVEL_THRESHOLD),
                });
            }
        }

        Ok(joins)
    }

    /// Computes the normalized direction from point `a` to point `b`.
    fn segment_direction(&self, a: usize, b: usize) -> Result<Vector2> {
        let d = self.points[b] - self.points[a];
        let len = d.norm();
        if len < f64::EPSILON {
            return Err(RenderError::InvalidParameters(format!(
                "zero-length segment between points {a} and {b}"
            ))
            .into());
        }
        Ok(d / len)
    }
}

/// Returns the normalized average of two unit directions.
fn average_direction(a: Vector2, b: Vector2) -> Vector2 {
    let avg = a + b;
    let len = avg.norm();
    if len < f64::EPSILON {
        // Opposite directions: fall back to the first direction.
        a
    } else {
        avg / len
    }
}

/// Right-hand perpendicular of a unit direction, `(d.y, -d.x)`.
fn perp(dir: Vector2) -> Vector2 {
    Vector2::new(dir.y, -dir.x)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn style(width: f64) -> StrokeStyle {
        StrokeStyle::new(width).unwrap()
    }

    #[test]
    fn straight_line_two_points() {
        let points = vec![Point2::new(0.0, 0.0), Point2::new(10.0, 0.0)];
        let mesh = TessellateStroke::new(points, style(2.0), false)
            .execute()
            .unwrap();

        assert_eq!(mesh.vertices.len(), 4);
        assert_eq!(mesh.indices.len(), 2);

        let spread = (mesh.vertices[1].y - mesh.vertices[0].y).abs();
        assert!((spread - 2.0).abs() < 1e-10, "total width should be 2.0");
    }

    #[test]
    fn l_shape_uses_miter() {
        // 90° turn: miter_scale = 1.414 < BEVEL_THRESHOLD.
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(5.0, 5.0),
        ];
        let mesh = TessellateStroke::new(points, style(1.0), false)
            .execute()
            .unwrap();
        assert_eq!(mesh.vertices.len(), 6);
        assert_eq!(mesh.indices.len(), 4);
    }

    #[test]
    fn l_shape_forced_bevel() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(5.0, 0.0),
            Point2::new(5.0, 5.0),
        ];
        let mesh = TessellateStroke::new(
            points,
            style(1.0).with_line_join(LineJoin::Bevel),
            false,
        )
        .execute()
        .unwrap();
        assert_eq!(mesh.vertices.len(), 7);
        assert_eq!(mesh.indices.len(), 5);
    }

    #[test]
    fn closed_triangle_uses_bevel() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
        ];
        let mesh = TessellateStroke::new(points, style(1.0), true)
            .execute()
            .unwrap();
        // Two 45° corners bevel (3 each), the right angle miters (2).
        assert_eq!(mesh.vertices.len(), 8);
        // 3 segment quads (6) + 2 bevel triangles.
        assert_eq!(mesh.indices.len(), 8);
    }

    #[test]
    fn hairpin_uses_bevel() {
        let points = vec![
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 4.0),
            Point2::new(0.2, 0.2),
        ];
        let mesh = TessellateStroke::new(points, style(0.5), false)
            .execute()
            .unwrap();
        assert_eq!(mesh.vertices.len(), 7);
        assert_eq!(mesh.indices.len(), 5);
    }

    #[test]
    fn indices_stay_in_bounds() {
        let points: Vec<Point2> = (0..40)
            .map(|i| {
                let t = f64::from(i) * 0.7;
                Point2::new(10.0 * t.cos() + 3.0 * (5.0 * t).cos(), 10.0 * t.sin())
            })
            .collect();
        let mesh = TessellateStroke::new(points, style(1.0), false)
            .execute()
            .unwrap();
        let count = u32::try_from(mesh.vertices.len()).unwrap();
        assert!(mesh.indices.iter().flatten().all(|&i| i < count));
    }

    #[test]
    fn too_few_points_fails() {
        let op = TessellateStroke::new(vec![Point2::new(0.0, 0.0)], style(1.0), false);
        assert!(op.execute().is_err());
    }

    #[test]
    fn zero_length_segment_fails() {
        let points = vec![Point2::new(1.0, 2.0), Point2::new(1.0, 2.0)];
        let op = TessellateStroke::new(points, style(1.0), false);
        assert!(op.execute().is_err());
    }
}
