//! Curve objects: one or more splines plus the petal template convention.

use floret_math::{Aabb, Point3};

use crate::{BezierSpline, CurveError};

/// Number of polyline samples per spline used for bounding-box estimation.
const BOUNDS_SAMPLES: usize = 32;

/// A curve object: an ordered set of Bezier splines.
///
/// The petal template convention is a single spline of exactly three
/// control points, authored so the body extends along +X from the origin:
/// points 0 and 2 are the free endpoints, point 1 the interior connector.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveObject {
    splines: Vec<BezierSpline>,
}

impl CurveObject {
    /// Create a curve object from splines.
    pub fn new(splines: Vec<BezierSpline>) -> Self {
        Self { splines }
    }

    /// Create a petal template from its three control points and bevel
    /// radius.
    ///
    /// # Errors
    ///
    /// Returns an error if the bevel radius is invalid.
    pub fn petal(points: [Point3; 3], bevel_radius: f64) -> Result<Self, CurveError> {
        let spline = BezierSpline::new(points.to_vec(), bevel_radius)?;
        Ok(Self {
            splines: vec![spline],
        })
    }

    /// The splines of this object.
    pub fn splines(&self) -> &[BezierSpline] {
        &self.splines
    }

    /// Check the petal template convention: exactly one spline with exactly
    /// three control points.
    ///
    /// # Errors
    ///
    /// Returns a named precondition error describing the violation.
    pub fn validate_petal_template(&self) -> Result<(), CurveError> {
        if self.splines.len() != 1 {
            return Err(CurveError::TemplateSplineCount(self.splines.len()));
        }
        let n = self.splines[0].num_control_points();
        if n != 3 {
            return Err(CurveError::TemplateControlPointCount(n));
        }
        Ok(())
    }

    /// Move one control point of one spline.
    ///
    /// # Errors
    ///
    /// Returns an error if either index is out of range.
    pub fn set_control_point(
        &mut self,
        spline: usize,
        point: usize,
        position: Point3,
    ) -> Result<(), CurveError> {
        let len = self.splines.len();
        let target = self
            .splines
            .get_mut(spline)
            .ok_or(CurveError::SplineIndexOutOfRange { index: spline, len })?;
        target.set_control_point(point, position)
    }

    /// Apply `f` to every control point of every spline in place.
    pub fn map_points(&mut self, mut f: impl FnMut(&Point3) -> Point3) {
        for spline in &mut self.splines {
            spline.map_points(&mut f);
        }
    }

    /// Local-space bounding box of the sampled curve geometry.
    ///
    /// Returns `None` if the object has no splines. The bevel radius does
    /// not inflate the box.
    pub fn local_bounds(&self) -> Option<Aabb> {
        let samples: Vec<Point3> = self
            .splines
            .iter()
            .flat_map(|s| s.sample(BOUNDS_SAMPLES))
            .collect();
        Aabb::from_points(samples.iter())
    }
}
