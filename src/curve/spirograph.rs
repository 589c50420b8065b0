use std::f64::consts::TAU;

use crate::error::{GeometryError, Result};
use crate::math::{Point2, TOLERANCE};
use crate::parameter::ParameterSnapshot;

use super::Curve;

/// Validated inputs of the spirograph formula.
///
/// Holding a `CurveParams` guarantees that every value is finite, the sample
/// count is positive and the minor radius is not zero, so generation cannot
/// divide by zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveParams {
    major_radius: f64,
    minor_radius: f64,
    offset: f64,
    sample_count: f64,
}

impl CurveParams {
    /// Validates a parameter snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if any value is non-finite, the sample count is not
    /// positive, or the minor radius is zero (within tolerance).
    pub fn new(snapshot: &ParameterSnapshot) -> Result<Self> {
        let fields = [
            ("majorRadius", snapshot.major_radius),
            ("minorRadius", snapshot.minor_radius),
            ("offset", snapshot.offset),
            ("sampleCount", snapshot.sample_count),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(GeometryError::NonFinite(name).into());
            }
        }

        if snapshot.sample_count <= 0.0 {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "sampleCount",
                value: snapshot.sample_count,
                min: f64::MIN_POSITIVE,
                max: f64::MAX,
            }
            .into());
        }

        if snapshot.minor_radius.abs() < TOLERANCE {
            return Err(
                GeometryError::Degenerate("minor radius must be non-zero".into()).into(),
            );
        }

        Ok(Self {
            major_radius: snapshot.major_radius,
            minor_radius: snapshot.minor_radius,
            offset: snapshot.offset,
            sample_count: snapshot.sample_count,
        })
    }

    #[must_use]
    pub fn major_radius(&self) -> f64 {
        self.major_radius
    }

    #[must_use]
    pub fn minor_radius(&self) -> f64 {
        self.minor_radius
    }

    #[must_use]
    pub fn offset(&self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn sample_count(&self) -> f64 {
        self.sample_count
    }
}

impl TryFrom<ParameterSnapshot> for CurveParams {
    type Error = crate::error::SpirographError;

    fn try_from(snapshot: ParameterSnapshot) -> Result<Self> {
        Self::new(&snapshot)
    }
}

/// Rolling-circle curve traced by a pin on a circle of radius `minor`
/// rolling inside a fixed circle of radius `major`.
///
/// `P(θ) = Δr·(cos θ, sin θ) + offset·(cos(Δr·θ/minor), sin(Δr·θ/minor))`
/// where `Δr = major - minor`.
#[derive(Debug, Clone, Copy)]
pub struct Spirograph {
    params: CurveParams,
    delta_r: f64,
    pin_rate: f64,
}

impl Spirograph {
    /// Creates the curve for validated parameters.
    #[must_use]
    pub fn new(params: CurveParams) -> Self {
        let delta_r = params.major_radius - params.minor_radius;
        Self {
            params,
            delta_r,
            pin_rate: delta_r / params.minor_radius,
        }
    }

    #[must_use]
    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    /// Distance between the two circle centers, `major - minor`.
    #[must_use]
    pub fn delta_r(&self) -> f64 {
        self.delta_r
    }

    /// Angle advanced per iteration, `2π / sample_count`.
    #[must_use]
    pub fn angular_step(&self) -> f64 {
        TAU / self.params.sample_count
    }

    /// Evaluates the curve at angle `theta`.
    #[must_use]
    pub fn evaluate(&self, theta: f64) -> Point2 {
        let pin = self.pin_rate * theta;
        Point2::new(
            self.delta_r * theta.cos() + self.params.offset * pin.cos(),
            self.delta_r * theta.sin() + self.params.offset * pin.sin(),
        )
    }

    /// Samples `iterations` points at `θ = i·Δθ` for `i` in `0..iterations`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn sample(&self, iterations: usize) -> Curve {
        let step = self.angular_step();
        let points = (0..iterations)
            .map(|i| self.evaluate(step * i as f64))
            .collect();
        Curve::new(points)
    }
}

/// Generates the spirograph polyline for `params`.
///
/// Always returns exactly `iterations` points, ordered by iteration index.
/// The sample count only sets the angular step, never the point count.
#[must_use]
pub fn generate(params: &CurveParams, iterations: usize) -> Curve {
    Spirograph::new(*params).sample(iterations)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::curve::ITERATIONS;
    use crate::error::SpirographError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn params(major: f64, minor: f64, offset: f64, samples: f64) -> CurveParams {
        CurveParams::new(&ParameterSnapshot::new(major, minor, offset, samples)).unwrap()
    }

    #[test]
    fn returns_fixed_point_count() {
        for samples in [2.0, 7.0, 30.0, 100.0] {
            let curve = generate(&params(100.0, 50.0, 25.0, samples), ITERATIONS);
            assert_eq!(curve.len(), ITERATIONS);
        }
    }

    #[test]
    fn points_follow_iteration_order() {
        let p = params(80.0, 30.0, 20.0, 12.0);
        let spiro = Spirograph::new(p);
        let curve = generate(&p, 50);
        let step = TAU / 12.0;
        for (i, point) in curve.points().iter().enumerate() {
            let expected = spiro.evaluate(step * f64::from(u32::try_from(i).unwrap()));
            assert_eq!(*point, expected);
        }
    }

    #[test]
    fn first_point_is_on_x_axis() {
        let curve = generate(&params(100.0, 50.0, 25.0, 50.0), 10);
        assert_abs_diff_eq!(curve.points()[0], Point2::new(75.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn generation_is_deterministic() {
        let p = params(73.0, 21.0, 17.0, 33.0);
        assert_eq!(generate(&p, ITERATIONS), generate(&p, ITERATIONS));
    }

    #[test]
    fn zero_offset_traces_circle_of_delta_r() {
        for (major, minor) in [(100.0, 50.0), (30.0, 80.0), (64.0, 3.0)] {
            let curve = generate(&params(major, minor, 0.0, 17.0), ITERATIONS);
            let radius = f64::abs(major - minor);
            for p in curve.points() {
                assert_relative_eq!(p.coords.norm(), radius, max_relative = 1e-9);
            }
        }
    }

    #[test]
    fn closes_after_sample_count_iterations() {
        let curve = generate(&params(100.0, 50.0, 25.0, 30.0), ITERATIONS);
        let pts = curve.points();
        assert_abs_diff_eq!(pts[0], pts[30], epsilon = 1e-9);
        assert_abs_diff_eq!(pts[1], pts[31], epsilon = 1e-9);
        assert!((pts[0] - pts[15]).norm() > 1.0);
    }

    #[test]
    fn equal_radii_collapse_to_offset_distance() {
        let curve = generate(&params(50.0, 50.0, 25.0, 50.0), ITERATIONS);
        for p in curve.points() {
            assert_relative_eq!(p.coords.norm(), 25.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn zero_minor_radius_is_rejected() {
        let err = CurveParams::new(&ParameterSnapshot::new(100.0, 0.0, 25.0, 50.0)).unwrap_err();
        assert!(matches!(
            err,
            SpirographError::Geometry(GeometryError::Degenerate(_))
        ));
    }

    #[test]
    fn non_positive_samples_are_rejected() {
        let snapshot = ParameterSnapshot::new(100.0, 50.0, 25.0, 0.0);
        assert!(CurveParams::try_from(snapshot).is_err());
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let snapshot = ParameterSnapshot::new(100.0, 50.0, f64::NAN, 10.0);
        let err = CurveParams::new(&snapshot).unwrap_err();
        assert!(matches!(
            err,
            SpirographError::Geometry(GeometryError::NonFinite("offset"))
        ));
    }

    #[test]
    fn angular_step_divides_full_turn() {
        let spiro = Spirograph::new(params(100.0, 50.0, 25.0, 4.0));
        assert_eq!(spiro.angular_step(), TAU / 4.0);
        assert_eq!(spiro.delta_r(), 50.0);
    }
}
