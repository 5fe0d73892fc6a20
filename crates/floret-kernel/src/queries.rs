//! Geometry queries over edges and template bounds.

use floret_math::{Point3, Tolerance, Vec3};

/// Midpoint of the edge `(v0, v1)`.
pub fn edge_midpoint(v0: &Point3, v1: &Point3) -> Point3 {
    Point3::from((v0.coords + v1.coords) / 2.0)
}

/// Signed rotation angle from `reference_axis` to the edge direction,
/// in `[-π/2, π/2]`.
///
/// The angle magnitude is `asin(|axis × dir|)`; the sign flips when the
/// direction's X and Y components disagree in sign (down-right or up-left
/// quadrants). The Z component of the direction is ignored; edges are
/// assumed to lie in the sheet plane.
///
/// Returns `None` for a degenerate edge (`|v1 - v0|` below tolerance),
/// which callers skip rather than treat as fatal.
pub fn edge_rotation(
    v0: &Point3,
    v1: &Point3,
    reference_axis: &Vec3,
    tol: &Tolerance,
) -> Option<f64> {
    let delta = v1 - v0;
    let len = delta.norm();
    if tol.is_zero(len) {
        return None;
    }
    let dir = delta / len;
    let cross = reference_axis.normalize().cross(&dir);
    let mut rot = cross.norm().clamp(0.0, 1.0).asin();
    if (dir.y < 0.0 && dir.x > 0.0) || (dir.y > 0.0 && dir.x < 0.0) {
        rot = -rot;
    }
    Some(rot)
}

/// Maximum X coordinate among bounding-box corner points.
///
/// This is the "petal overhang": how far the template's body extends along
/// its local +X axis.
pub fn bounding_x_extent(corners: &[Point3; 8]) -> f64 {
    corners
        .iter()
        .map(|c| c.x)
        .fold(f64::NEG_INFINITY, f64::max)
}
