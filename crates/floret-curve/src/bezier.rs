//! Bezier spline evaluation via de Casteljau's algorithm.

use floret_math::{Point3, Vec3};

use crate::CurveError;

/// A Bezier spline of degree `n - 1` over `n` control points, with a bevel
/// radius used when the curve is swept into a tube mesh.
#[derive(Debug, Clone, PartialEq)]
pub struct BezierSpline {
    control_points: Vec<Point3>,
    bevel_radius: f64,
}

impl BezierSpline {
    /// Create a spline from control points and a bevel radius.
    ///
    /// # Errors
    ///
    /// Returns an error if fewer than two control points are given or the
    /// bevel radius is NaN, infinite, or negative.
    pub fn new(control_points: Vec<Point3>, bevel_radius: f64) -> Result<Self, CurveError> {
        if control_points.len() < 2 {
            return Err(CurveError::TooFewControlPoints(control_points.len()));
        }
        if !bevel_radius.is_finite() || bevel_radius < 0.0 {
            return Err(CurveError::InvalidBevelRadius(bevel_radius));
        }
        Ok(Self {
            control_points,
            bevel_radius,
        })
    }

    /// The control points.
    pub fn control_points(&self) -> &[Point3] {
        &self.control_points
    }

    /// Number of control points.
    pub fn num_control_points(&self) -> usize {
        self.control_points.len()
    }

    /// Polynomial degree (`control points - 1`).
    pub fn degree(&self) -> usize {
        self.control_points.len() - 1
    }

    /// The bevel (sweep) radius.
    pub fn bevel_radius(&self) -> f64 {
        self.bevel_radius
    }

    /// Move a single control point.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range.
    pub fn set_control_point(&mut self, index: usize, position: Point3) -> Result<(), CurveError> {
        let len = self.control_points.len();
        let slot = self
            .control_points
            .get_mut(index)
            .ok_or(CurveError::PointIndexOutOfRange { index, len })?;
        *slot = position;
        Ok(())
    }

    /// Apply `f` to every control point in place.
    pub fn map_points(&mut self, mut f: impl FnMut(&Point3) -> Point3) {
        for p in &mut self.control_points {
            *p = f(p);
        }
    }

    /// Evaluate the curve at parameter `t` in `[0, 1]` via de Casteljau.
    pub fn evaluate(&self, t: f64) -> Point3 {
        let mut pts: Vec<Vec3> = self.control_points.iter().map(|p| p.coords).collect();
        let n = pts.len();
        for level in 1..n {
            for i in 0..n - level {
                pts[i] = (1.0 - t) * pts[i] + t * pts[i + 1];
            }
        }
        Point3::from(pts[0])
    }

    /// First derivative at parameter `t`.
    ///
    /// Evaluates the degree `n - 1` derivative curve whose control vectors
    /// are `n * (P[i+1] - P[i])`.
    pub fn derivative(&self, t: f64) -> Vec3 {
        let n = self.degree() as f64;
        let mut diffs: Vec<Vec3> = self
            .control_points
            .windows(2)
            .map(|w| n * (w[1] - w[0]))
            .collect();
        let m = diffs.len();
        for level in 1..m {
            for i in 0..m - level {
                diffs[i] = (1.0 - t) * diffs[i] + t * diffs[i + 1];
            }
        }
        diffs[0]
    }

    /// Sample the curve into a polyline of `segments + 1` points at uniform
    /// parameter spacing.
    pub fn sample(&self, segments: usize) -> Vec<Point3> {
        let segments = segments.max(1);
        (0..=segments)
            .map(|i| self.evaluate(i as f64 / segments as f64))
            .collect()
    }
}
