#![warn(missing_docs)]

//! Bezier curve templates for the floret petal-scattering kernel.
//!
//! A petal is authored as a curve object holding a single Bezier spline of
//! exactly three control points: the two free endpoints (points 0 and 2)
//! and an interior connector point (point 1) near the notional center. The
//! spline carries a bevel radius that the tessellator sweeps into a tube.
//!
//! Templates are value types. The scattering pipeline never mutates one;
//! every use clones it first and edits the clone.

mod bezier;
mod object;

pub use bezier::BezierSpline;
pub use object::CurveObject;

use thiserror::Error;

/// Errors from curve construction and editing.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CurveError {
    /// A spline needs at least two control points to define a curve.
    #[error("spline needs at least 2 control points, got {0}")]
    TooFewControlPoints(usize),

    /// Bevel radius is NaN, infinite, or negative.
    #[error("bevel radius must be finite and non-negative, got {0}")]
    InvalidBevelRadius(f64),

    /// A petal template must consist of exactly one spline.
    #[error("petal template must have exactly one spline, got {0}")]
    TemplateSplineCount(usize),

    /// A petal template spline must have exactly three control points.
    #[error("petal template spline must have exactly 3 control points, got {0}")]
    TemplateControlPointCount(usize),

    /// Spline index out of range for this curve object.
    #[error("spline index {index} out of range ({len} splines)")]
    SplineIndexOutOfRange {
        /// The requested spline index.
        index: usize,
        /// Number of splines in the object.
        len: usize,
    },

    /// Control point index out of range for the addressed spline.
    #[error("control point index {index} out of range ({len} points)")]
    PointIndexOutOfRange {
        /// The requested control point index.
        index: usize,
        /// Number of control points in the spline.
        len: usize,
    },
}
