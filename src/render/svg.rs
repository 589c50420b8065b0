use std::fmt::Write as _;

use super::Frame;

/// Height of the slider label strip below the drawing area.
const LABEL_ROW_HEIGHT: f64 = 20.0;

impl Frame {
    /// Serializes the frame as a standalone SVG document.
    ///
    /// The curve runs are drawn as blue polylines clipped to the viewport;
    /// slider captions and value labels are listed underneath.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_svg(&self) -> String {
        let width = self.viewport.width();
        let height = self.viewport.height();
        let total_height = height + LABEL_ROW_HEIGHT * self.sliders.len() as f64;

        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{width}" height="{total_height}" viewBox="0 0 {width} {total_height}">"#
        );
        let _ = writeln!(
            out,
            r#"  <defs><clipPath id="viewport"><rect x="0" y="0" width="{width}" height="{height}"/></clipPath></defs>"#
        );
        let _ = writeln!(
            out,
            r#"  <g clip-path="url(#viewport)" fill="none" stroke="blue" stroke-width="{}">"#,
            self.style.width()
        );
        for path in &self.paths {
            let _ = writeln!(out, r#"    <path d="{}"/>"#, path_data(path));
        }
        out.push_str("  </g>\n");

        for (row, slider) in self.sliders.iter().enumerate() {
            let y = height + LABEL_ROW_HEIGHT * (row as f64 + 0.75);
            let _ = writeln!(
                out,
                r#"  <text x="4" y="{y}" font-size="12">{} [{}, {}] {}</text>"#,
                slider.name, slider.min, slider.max, slider.value_label
            );
        }
        out.push_str("</svg>\n");
        out
    }
}

fn path_data(points: &[crate::math::Point2]) -> String {
    let mut d = String::with_capacity(points.len() * 16);
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            d.push(' ');
        }
        let _ = write!(d, "{cmd} {:.3} {:.3}", p.x, p.y);
    }
    d
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::curve::{generate, CurveParams};
    use crate::math::Point2;
    use crate::parameter::ParameterStore;
    use crate::render::{ComposeFrame, StrokeStyle, Viewport};

    #[test]
    fn path_data_uses_move_then_lines() {
        let d = path_data(&[Point2::new(1.0, 2.0), Point2::new(3.5, 4.25)]);
        assert_eq!(d, "M 1.000 2.000 L 3.500 4.250");
    }

    #[test]
    fn svg_contains_paths_and_labels() {
        let store = ParameterStore::default();
        let curve = generate(&CurveParams::new(&store.snapshot()).unwrap(), 200);
        let frame = ComposeFrame::new(Viewport::new(300.0, 300.0).unwrap(), StrokeStyle::default())
            .execute(&curve, &store)
            .unwrap();
        let svg = frame.to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.trim_end().ends_with("</svg>"));
        assert!(svg.contains(r#"stroke-width="1""#));
        assert_eq!(svg.matches("<path ").count(), frame.paths.len());
        assert!(svg.contains("Offset [0, 50] 25"));
        assert!(svg.contains("Sample [2, 100] 50"));
    }
}
